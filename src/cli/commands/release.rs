//! Release command execution.

use crate::cli::RuntimeConfig;
use crate::config::ReleaseOptions;
use crate::error::{EXIT_CANCELLED, EXIT_FAILED, EXIT_SUCCESS, Result};
use crate::git::GitCli;
use crate::prompt::TerminalPrompter;
use crate::release::{ReleaseRun, RunOutcome, TaskStatus};

/// Run one release against the terminal and the system git
pub(super) async fn execute_release(options: ReleaseOptions, config: &RuntimeConfig) -> Result<i32> {
    let output = config.output();
    output.verbose(&format!("Project root: {}", options.dir.display()));

    let git = GitCli::new(&options.dir);
    let prompter = TerminalPrompter::new();

    let outcome = ReleaseRun::new(options, &git, &prompter, output)
        .execute()
        .await?;

    let report = match outcome {
        RunOutcome::Cancelled => {
            output.warn("Release cancelled");
            return Ok(EXIT_CANCELLED);
        }
        RunOutcome::Completed(report) => report,
    };

    output.verbose(&format!(
        "Modified files: {}",
        report
            .modified_files
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    match report.status() {
        TaskStatus::Finished => {
            output.success(&format!("🎉 Released v{} ({})", report.next_version, report.status()));
            Ok(EXIT_SUCCESS)
        }
        status => {
            let stopped_at = report.queue.failed.as_deref().unwrap_or("unknown step");
            output.error(&format!("Release {status}: stopped at '{stopped_at}'"));
            if !report.queue.skipped.is_empty() {
                output.indent_err(&format!("Not run: {}", report.queue.skipped.join(", ")));
            }
            Ok(EXIT_FAILED)
        }
    }
}
