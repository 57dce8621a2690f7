//! Kodegen Release Bump - version bumping and release orchestration.
//!
//! Resolves the next version, rewrites every project manifest, then commits,
//! tags and pushes as authorized.

use kodegen_release_bump::cli::{self, Args, OutputManager};
use kodegen_release_bump::error::EXIT_FAILED;
use kodegen_release_bump::git::DRY_ENV;
use std::process;

fn main() {
    env_logger::init();

    let args = cli::parse_args();

    // Collaborators read the dry-run flag from the environment for the whole run
    if args.dry {
        // SAFETY: the tokio runtime is not built yet, so this is the only thread
        unsafe {
            std::env::set_var(DRY_ENV, "true");
        }
    }

    process::exit(run(args));
}

#[tokio::main]
async fn run(args: Args) -> i32 {
    match cli::execute_command(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.indent_err("💡 Recovery suggestions:");
                for suggestion in suggestions {
                    output.indent_err(&suggestion);
                }
            }

            EXIT_FAILED
        }
    }
}
