//! # Kodegen Release Bump
//!
//! Version bumping and release orchestration for multi-project repositories.
//!
//! A release run discovers version-bearing manifests, resolves the next
//! version (explicitly or interactively), writes it into every manifest, then
//! commits, tags and pushes when authorized.
//!
//! ## Features
//!
//! - **Multi-project**: `Cargo.toml`, `package.json` and `pyproject.toml` side by side
//! - **Gated steps**: commit → tag → push, each pre-authorized by flag or confirmed
//! - **Fail-fast**: a failed step stops everything after it
//! - **Best-effort updates**: every manifest is attempted, failures are reported together
//! - **Dry run**: git commands are logged instead of executed
//!
//! ## Usage
//!
//! ```bash
//! kodegen_release_bump                        # interactive
//! kodegen_release_bump --version 1.4.0 --yes  # commit, tag, push without asking
//! kodegen_release_bump -r --dry               # recursive discovery, no git side effects
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod project;
pub mod prompt;
pub mod release;
pub mod version;

// Re-export main types for public API
pub use cli::Args;
pub use config::ReleaseOptions;
pub use error::{ReleaseError, Result};
pub use git::{GitCli, GitOperations};
pub use project::{ProjectFile, ProjectKind};
pub use prompt::{Answer, Prompter};
pub use release::{ReleaseRun, RunOutcome, RunReport, TaskStatus};
pub use version::{VersionBump, VersionBumper};
