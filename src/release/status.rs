//! Run status and per-task outcomes.

use std::fmt;

/// Status of a release run
///
/// `Pending → Running` when the queue starts, then `Running → Failed` on the
/// first failed task or `Running → Finished` once the queue drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Queue built, nothing executed yet
    Pending,
    /// Queue is executing
    Running,
    /// A task failed; later tasks were not run
    Failed,
    /// Every queued task ran and succeeded
    Finished,
}

impl TaskStatus {
    /// Whether no further transition can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Failed | TaskStatus::Finished)
    }

    /// Lowercase status name
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Failed => "failed",
            TaskStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single task reports back to the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Task did its work
    Succeeded,
    /// Task failed; the queue stops
    Failed,
}

impl TaskOutcome {
    /// `Succeeded` for `true`, `Failed` for `false`
    pub fn from_success(success: bool) -> Self {
        if success {
            TaskOutcome::Succeeded
        } else {
            TaskOutcome::Failed
        }
    }
}
