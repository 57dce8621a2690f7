//! Command line interface.
//!
//! Parses flags into release options, runs one release and maps the result
//! to a process exit code.

mod args;
pub mod commands;
mod output;

pub use args::{Args, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

/// Parse process arguments
pub fn parse_args() -> Args {
    Args::parse_args()
}
