//! FIFO task queue with fail-fast execution.

use super::status::{TaskOutcome, TaskStatus};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;

/// A named unit of work.
///
/// The action is a future that has not been polled yet, so building a task
/// does nothing until the queue awaits it.
pub struct Task<'a> {
    name: String,
    action: LocalBoxFuture<'a, TaskOutcome>,
}

impl<'a> Task<'a> {
    /// Create a task from a display name and its action
    pub fn new(name: impl Into<String>, action: impl Future<Output = TaskOutcome> + 'a) -> Self {
        Self {
            name: name.into(),
            action: action.boxed_local(),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Task<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("name", &self.name).finish_non_exhaustive()
    }
}

/// What happened when the queue ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueReport {
    /// Final status, always terminal
    pub status: TaskStatus,
    /// Tasks that ran and succeeded, in execution order
    pub completed: Vec<String>,
    /// Task that failed, if any
    pub failed: Option<String>,
    /// Tasks never started because an earlier one failed
    pub skipped: Vec<String>,
}

/// Ordered queue of release tasks
#[derive(Debug)]
pub struct TaskQueue<'a> {
    tasks: VecDeque<Task<'a>>,
    status: TaskStatus,
}

impl Default for TaskQueue<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TaskQueue<'a> {
    /// Create an empty, pending queue
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
            status: TaskStatus::Pending,
        }
    }

    /// Append a task. Returns whether the queue grew by exactly one.
    pub fn enqueue(&mut self, task: Task<'a>) -> bool {
        let before = self.tasks.len();
        log::debug!("Queued task '{}'", task.name);
        self.tasks.push_back(task);
        self.tasks.len() == before + 1
    }

    /// Names of queued tasks, in execution order
    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(Task::name).collect()
    }

    /// Current status
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Run every task in insertion order, stopping at the first failure.
    ///
    /// The status is checked before each task; once it is `Failed` the
    /// remaining actions are dropped without being polled.
    pub async fn run_all(mut self) -> QueueReport {
        self.status = TaskStatus::Running;
        let mut completed = Vec::new();
        let mut failed = None;
        let mut skipped = Vec::new();

        while let Some(task) = self.tasks.pop_front() {
            if self.status == TaskStatus::Failed {
                skipped.push(task.name);
                continue;
            }

            log::debug!("Running task '{}'", task.name);
            match task.action.await {
                TaskOutcome::Succeeded => completed.push(task.name),
                TaskOutcome::Failed => {
                    log::error!("Task '{}' failed", task.name);
                    self.status = TaskStatus::Failed;
                    failed = Some(task.name);
                }
            }
        }

        if self.status == TaskStatus::Running {
            self.status = TaskStatus::Finished;
        }
        if !skipped.is_empty() {
            log::warn!("Skipped after failure: {}", skipped.join(", "));
        }

        QueueReport {
            status: self.status,
            completed,
            failed,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recording<'a>(
        log: &'a RefCell<Vec<&'static str>>,
        name: &'static str,
        outcome: TaskOutcome,
    ) -> Task<'a> {
        Task::new(name, async move {
            log.borrow_mut().push(name);
            outcome
        })
    }

    #[test]
    fn test_enqueue_grows_by_one() {
        let mut queue = TaskQueue::new();
        assert!(queue.enqueue(Task::new("a", async { TaskOutcome::Succeeded })));
        assert!(queue.enqueue(Task::new("b", async { TaskOutcome::Succeeded })));
        assert_eq!(queue.names(), vec!["a", "b"]);
        assert_eq!(queue.status(), TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_runs_in_insertion_order() {
        let log = RefCell::new(Vec::new());
        let mut queue = TaskQueue::new();
        for name in ["first", "second", "third"] {
            queue.enqueue(recording(&log, name, TaskOutcome::Succeeded));
        }

        let report = queue.run_all().await;
        assert_eq!(report.status, TaskStatus::Finished);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
        assert_eq!(report.completed, vec!["first", "second", "third"]);
        assert!(report.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_fail_fast_skips_remaining() {
        let log = RefCell::new(Vec::new());
        let mut queue = TaskQueue::new();
        queue.enqueue(recording(&log, "ok", TaskOutcome::Succeeded));
        queue.enqueue(recording(&log, "broken", TaskOutcome::Failed));
        queue.enqueue(recording(&log, "never", TaskOutcome::Succeeded));

        let report = queue.run_all().await;
        assert_eq!(report.status, TaskStatus::Failed);
        assert_eq!(*log.borrow(), vec!["ok", "broken"]);
        assert_eq!(report.failed.as_deref(), Some("broken"));
        assert_eq!(report.skipped, vec!["never".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_queue_finishes() {
        let report = TaskQueue::new().run_all().await;
        assert_eq!(report.status, TaskStatus::Finished);
        assert!(report.status.is_terminal());
    }
}
