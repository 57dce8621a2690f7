//! Colored terminal output for release runs
//!
//! Progress goes to stdout, warnings and errors to stderr. Quiet mode keeps
//! only warnings and errors; verbose mode adds detail lines.

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
    stderr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose, self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            stderr: BufferWriter::stderr(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.emit(&self.stdout, "ℹ", ColorSpec::new().set_fg(Some(Color::Cyan)), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.emit(
                &self.stdout,
                "✓",
                ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
                message,
            );
        }
    }

    /// Print a progress line for a step that is starting
    pub fn progress(&self, message: &str) {
        if !self.quiet {
            self.emit(&self.stdout, "⋯", ColorSpec::new().set_fg(Some(Color::Magenta)), message);
        }
    }

    /// Print a detail line (verbose mode only)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            self.emit(&self.stdout, "→", ColorSpec::new().set_fg(Some(Color::Blue)), message);
        }
    }

    /// Print a warning (shown in quiet mode)
    pub fn warn(&self, message: &str) {
        self.emit(
            &self.stderr,
            "⚠",
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            message,
        );
    }

    /// Print an error (always shown)
    pub fn error(&self, message: &str) {
        if !self.emit(
            &self.stderr,
            "✗",
            ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true),
            message,
        ) {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print indented text to stderr, next to an error
    pub fn indent_err(&self, message: &str) {
        self.plain(&self.stderr, &format!("    {message}"));
    }

    fn emit(&self, writer: &BufferWriter, symbol: &str, spec: &ColorSpec, message: &str) -> bool {
        let mut buffer = writer.buffer();
        let written = buffer.set_color(spec).is_ok()
            && write!(&mut buffer, "{symbol}").is_ok()
            && buffer.reset().is_ok()
            && writeln!(&mut buffer, " {message}").is_ok();
        written && writer.print(&buffer).is_ok()
    }

    fn plain(&self, writer: &BufferWriter, message: &str) {
        let mut buffer = writer.buffer();
        if writeln!(&mut buffer, "{message}").is_ok() {
            let _ = writer.print(&buffer);
        }
    }
}
