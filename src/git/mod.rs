//! Git operations used by the commit, tag and push steps.
//!
//! The [`GitOperations`] trait is the seam between release steps and the
//! version-control tool. [`GitCli`] drives the system `git` binary.

mod command;

pub use command::{GitCli, dry_run_from_env};

use crate::error::Result;
use std::future::Future;
use std::path::PathBuf;

/// Environment variable that marks the whole process as a dry run
pub const DRY_ENV: &str = "DRY";

/// Parameters for the commit step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOptions {
    /// Log instead of committing
    pub dry: bool,
    /// Commit message
    pub message: String,
    /// Files to stage (ignored when `stage_all` is set)
    pub files: Vec<PathBuf>,
    /// Stage every change in the working tree
    pub stage_all: bool,
    /// Run commit hooks
    pub verify: bool,
}

/// Parameters for the tag step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions {
    /// Log instead of tagging
    pub dry: bool,
    /// Annotated tag message
    pub message: String,
    /// Tag name, e.g. `v1.2.3`
    pub tag_name: String,
}

/// Parameters for the push step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOptions {
    /// Log instead of pushing
    pub dry: bool,
    /// Push annotated tags reachable from the pushed commits
    pub follow_tags: bool,
}

/// Version-control operations required by a release run
pub trait GitOperations {
    /// Stage and commit the release changes
    fn commit(&self, options: &CommitOptions) -> impl Future<Output = Result<()>>;

    /// Create the release tag
    fn tag(&self, options: &TagOptions) -> impl Future<Output = Result<()>>;

    /// Push to the default remote
    fn push(&self, options: &PushOptions) -> impl Future<Output = Result<()>>;
}
