//! Release run orchestration.
//!
//! A run resolves the next version, queues the mandatory version update, gates
//! the optional commit/tag/push steps, then executes the queue fail-fast:
//!
//! ```text
//! options → VersionResolver → [update version] → ConfirmationGate → [commit] [tag] [push] → TaskQueue::run_all
//! ```

mod gate;
mod message;
mod queue;
mod resolver;
mod status;
mod steps;
mod updater;

pub use gate::{ConfirmationGate, OptionalStep};
pub use message::{VERSION_PLACEHOLDER, format_message};
pub use queue::{QueueReport, Task, TaskQueue};
pub use resolver::{Resolution, VersionResolver};
pub use status::{TaskOutcome, TaskStatus};
pub use steps::StepContext;
pub use updater::{
    MAX_CONCURRENT_WRITES, ModifiedFiles, ProjectVersionUpdater, UPDATE_TASK_NAME, UpdateReport,
};

use crate::cli::OutputManager;
use crate::config::ReleaseOptions;
use crate::error::Result;
use crate::git::GitOperations;
use crate::prompt::{Answer, Prompter};
use semver::Version;
use std::path::PathBuf;

/// How a release run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The queue ran; see the report for its status
    Completed(RunReport),
    /// The operator cancelled a prompt; steps not yet started were abandoned
    Cancelled,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Version found in the main project file
    pub current_version: Option<String>,
    /// Version released
    pub next_version: Version,
    /// Tag name used by the tag step
    pub tag_name: String,
    /// Tasks in queue order, as they were queued
    pub queued: Vec<String>,
    /// Queue execution result
    pub queue: QueueReport,
    /// Files rewritten with the new version
    pub modified_files: Vec<PathBuf>,
}

impl RunReport {
    /// Final status of the run
    pub fn status(&self) -> TaskStatus {
        self.queue.status
    }
}

/// One release, start to finish
pub struct ReleaseRun<'a, G, P> {
    options: ReleaseOptions,
    git: &'a G,
    prompter: &'a P,
    output: &'a OutputManager,
}

impl<'a, G: GitOperations, P: Prompter> ReleaseRun<'a, G, P> {
    /// Prepare a run
    pub fn new(options: ReleaseOptions, git: &'a G, prompter: &'a P, output: &'a OutputManager) -> Self {
        Self {
            options,
            git,
            prompter,
            output,
        }
    }

    /// Execute the run.
    ///
    /// Setup failures are returned as errors before anything is queued.
    /// Cancellation at any prompt returns [`RunOutcome::Cancelled`].
    pub async fn execute(mut self) -> Result<RunOutcome> {
        if self.options.dry {
            self.output.warn("Dry run: git commands are logged, not executed");
        }

        let resolver = VersionResolver::new(self.prompter, self.output);
        let Resolution {
            current,
            next,
            files,
        } = match resolver.resolve(&self.options).await? {
            Answer::Answered(resolution) => resolution,
            Answer::Cancelled => return Ok(RunOutcome::Cancelled),
        };

        self.output.info(&format!(
            "Releasing {} → {} ({} project file(s))",
            current.as_deref().unwrap_or("unknown"),
            next,
            files.len()
        ));

        let modified = ModifiedFiles::new();
        let updater = ProjectVersionUpdater::new(self.output);
        let next_text = next.to_string();
        let context = StepContext {
            git: self.git,
            output: self.output,
            modified: &modified,
            message: format_message(&self.options.message, &next_text),
            tag_name: format!("v{next_text}"),
            dry: self.options.dry,
            stage_all: self.options.stage_all,
            verify: self.options.verify,
            follow_tags: self.options.follow_tags,
        };

        let mut queue = TaskQueue::new();
        let queued = queue.enqueue(updater.task(&next, &files, &modified));
        debug_assert!(queued, "update task must be queued first");

        let gate = ConfirmationGate::new(self.prompter);
        for step in OptionalStep::ORDER {
            match gate.gate(step, &mut self.options).await? {
                Answer::Answered(true) => {
                    let queued = queue.enqueue(context.task(step));
                    debug_assert!(queued, "{step} task not queued");
                }
                Answer::Answered(false) => log::debug!("Skipping {step}"),
                Answer::Cancelled => return Ok(RunOutcome::Cancelled),
            }
        }

        let queued: Vec<String> = queue.names().into_iter().map(str::to_string).collect();
        self.output.verbose(&format!("Steps: {}", queued.join(" → ")));

        let report = queue.run_all().await;
        Ok(RunOutcome::Completed(RunReport {
            current_version: current,
            next_version: next,
            tag_name: context.tag_name,
            queued,
            queue: report,
            modified_files: modified.snapshot(),
        }))
    }
}
