//! Commit, tag and push actions.

use super::gate::OptionalStep;
use super::queue::Task;
use super::status::TaskOutcome;
use super::updater::ModifiedFiles;
use crate::cli::OutputManager;
use crate::error::Result;
use crate::git::{CommitOptions, GitOperations, PushOptions, TagOptions};

/// Everything the optional steps need, fixed before any of them is queued
pub struct StepContext<'a, G> {
    /// Version-control backend
    pub git: &'a G,
    /// Progress output
    pub output: &'a OutputManager,
    /// Files written by the update step
    pub modified: &'a ModifiedFiles,
    /// Expanded commit and tag message
    pub message: String,
    /// Tag name, `v<version>`
    pub tag_name: String,
    /// Dry run
    pub dry: bool,
    /// Stage everything instead of only `modified`
    pub stage_all: bool,
    /// Run commit hooks
    pub verify: bool,
    /// Push with `--follow-tags`
    pub follow_tags: bool,
}

impl<'a, G: GitOperations> StepContext<'a, G> {
    /// Build the queue task for `step`
    pub fn task(&'a self, step: OptionalStep) -> Task<'a> {
        Task::new(step.name(), async move {
            let result = match step {
                OptionalStep::Commit => self.commit().await,
                OptionalStep::Tag => self.tag().await,
                OptionalStep::Push => self.push().await,
            };
            self.outcome(step, result)
        })
    }

    async fn commit(&self) -> Result<()> {
        let options = CommitOptions {
            dry: self.dry,
            message: self.message.clone(),
            // Read at execution time: the update step has run by now
            files: self.modified.snapshot(),
            stage_all: self.stage_all,
            verify: self.verify,
        };
        self.output.progress(&format!("Committing \"{}\"", self.message));
        self.git.commit(&options).await
    }

    async fn tag(&self) -> Result<()> {
        let options = TagOptions {
            dry: self.dry,
            message: self.message.clone(),
            tag_name: self.tag_name.clone(),
        };
        self.output.progress(&format!("Tagging {}", self.tag_name));
        self.git.tag(&options).await
    }

    async fn push(&self) -> Result<()> {
        let options = PushOptions {
            dry: self.dry,
            follow_tags: self.follow_tags,
        };
        self.output.progress("Pushing");
        self.git.push(&options).await
    }

    fn outcome(&self, step: OptionalStep, result: Result<()>) -> TaskOutcome {
        match result {
            Ok(()) => {
                let suffix = if self.dry { " (dry run)" } else { "" };
                self.output.success(&format!("{step} done{suffix}"));
                TaskOutcome::Succeeded
            }
            Err(e) => {
                log::error!("Step '{step}' failed: {e}");
                self.output.error(&format!("{step} failed: {e}"));
                TaskOutcome::Failed
            }
        }
    }
}
