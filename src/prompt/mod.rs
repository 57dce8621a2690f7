//! Operator prompts.
//!
//! Every prompt resolves to an [`Answer`]: either a value or an explicit
//! cancellation. Callers pass cancellation up unchanged; only the top-level
//! command turns it into a process exit.

mod terminal;

pub use terminal::TerminalPrompter;

use crate::error::Result;
use semver::Version;
use std::future::Future;

/// Outcome of an interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    /// The operator answered
    Answered(T),
    /// The operator aborted the prompt (Esc, `q`, Ctrl-C)
    Cancelled,
}

impl<T> Answer<T> {
    /// Map the answered value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Answer<U> {
        match self {
            Answer::Answered(value) => Answer::Answered(f(value)),
            Answer::Cancelled => Answer::Cancelled,
        }
    }
}

/// Interactive questions asked during a release run
pub trait Prompter {
    /// Ask for the next version, seeded with the current one (if known)
    fn choose_version(
        &self,
        current: Option<&str>,
        preid: &str,
    ) -> impl Future<Output = Result<Answer<Version>>>;

    /// Ask a yes/no question
    fn confirm(&self, message: &str) -> impl Future<Output = Result<Answer<bool>>>;
}
