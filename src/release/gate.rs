//! Deciding which optional steps run.
//!
//! Steps are gated in the fixed order of [`OptionalStep::ORDER`]: a tag only
//! makes sense after the commit, and `--follow-tags` only after the tag.

use crate::config::ReleaseOptions;
use crate::error::Result;
use crate::prompt::{Answer, Prompter};
use std::fmt;

/// Steps that run after the version update when authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalStep {
    /// Commit the modified files
    Commit,
    /// Tag the release commit
    Tag,
    /// Push to the remote
    Push,
}

impl OptionalStep {
    /// Gate evaluation and execution order
    pub const ORDER: [OptionalStep; 3] = [OptionalStep::Commit, OptionalStep::Tag, OptionalStep::Push];

    /// Task name
    pub fn name(&self) -> &'static str {
        match self {
            OptionalStep::Commit => "commit",
            OptionalStep::Tag => "tag",
            OptionalStep::Push => "push",
        }
    }

    /// Question asked when the decision is open
    pub fn prompt(&self) -> &'static str {
        match self {
            OptionalStep::Commit => "Commit the version changes?",
            OptionalStep::Tag => "Create a release tag?",
            OptionalStep::Push => "Push to the remote?",
        }
    }

    /// Decision currently recorded in `options`
    pub fn decision(&self, options: &ReleaseOptions) -> Option<bool> {
        match self {
            OptionalStep::Commit => options.commit,
            OptionalStep::Tag => options.tag,
            OptionalStep::Push => options.push,
        }
    }

    fn record(&self, options: &mut ReleaseOptions, value: bool) {
        let slot = match self {
            OptionalStep::Commit => &mut options.commit,
            OptionalStep::Tag => &mut options.tag,
            OptionalStep::Push => &mut options.push,
        };
        *slot = Some(value);
    }
}

impl fmt::Display for OptionalStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves each optional step to run / skip / cancel
pub struct ConfirmationGate<'a, P> {
    prompter: &'a P,
}

impl<'a, P: Prompter> ConfirmationGate<'a, P> {
    /// Create a gate that asks through `prompter`
    pub fn new(prompter: &'a P) -> Self {
        Self { prompter }
    }

    /// Decide whether `step` runs.
    ///
    /// `--yes` forces true; an existing decision is reused; otherwise the
    /// operator is asked and the answer is recorded in `options`.
    pub async fn gate(&self, step: OptionalStep, options: &mut ReleaseOptions) -> Result<Answer<bool>> {
        if options.yes {
            step.record(options, true);
            return Ok(Answer::Answered(true));
        }

        if let Some(decided) = step.decision(options) {
            log::debug!("{step}: {decided} (preset)");
            return Ok(Answer::Answered(decided));
        }

        let answer = self.prompter.confirm(step.prompt()).await?;
        if let Answer::Answered(value) = answer {
            step.record(options, value);
        }
        Ok(answer)
    }
}
