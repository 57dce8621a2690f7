//! Command execution.
//!
//! Converts the outcome of a release run into user-facing output and an exit
//! code. This is the only place where cancellation turns into a process exit.

mod release;

use crate::cli::{Args, RuntimeConfig};
use crate::error::{EXIT_SETUP, Result};

use release::execute_release;

/// Execute the release described by parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    let config = RuntimeConfig::from(&args);

    if let Err(validation_error) = args.validate() {
        config
            .output()
            .error(&format!("Invalid arguments: {}", validation_error));
        return Ok(EXIT_SETUP);
    }

    let result = match args.to_options() {
        Ok(options) => execute_release(options, &config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            config.output().error(&format!("Release failed: {}", e));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.output().indent_err("💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.output().indent_err(&format!("  • {}", suggestion));
                }
            }

            Ok(e.exit_code())
        }
    }
}
