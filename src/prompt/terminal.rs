//! Terminal prompts backed by `dialoguer`.
//!
//! dialoguer blocks on stdin, so each prompt runs on tokio's blocking pool.

use super::{Answer, Prompter};
use crate::error::{PromptError, Result};
use crate::version::{VersionBump, VersionBumper, is_valid_version, parse_version};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use semver::Version;

/// Prompts on the controlling terminal
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Create a terminal prompter
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    async fn choose_version(&self, current: Option<&str>, preid: &str) -> Result<Answer<Version>> {
        let base = match current.map(parse_version) {
            Some(Ok(version)) => version,
            Some(Err(e)) => {
                log::warn!("Current version is not semver ({e}), bumping from 0.0.0");
                Version::new(0, 0, 0)
            }
            None => Version::new(0, 0, 0),
        };
        let bumper = VersionBumper::new(base, preid)?;
        let shown_current = current.unwrap_or("unknown").to_string();

        let choices: Vec<(VersionBump, Version)> = VersionBump::ALL
            .into_iter()
            .map(|bump| (bump, bumper.bump(bump)))
            .collect();

        let mut items: Vec<String> = choices
            .iter()
            .map(|(bump, next)| format!("{:<11} {}", bump.name(), next))
            .collect();
        items.push("custom      ...".to_string());

        let prompt = format!("Current version {shown_current}");
        let selection = tokio::task::spawn_blocking(move || {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .items(&items)
                .default(0)
                .interact_opt()
        })
        .await
        .map_err(PromptError::from)?;

        let index = match interrupted_as_cancel(selection)? {
            Answer::Answered(Some(index)) => index,
            Answer::Answered(None) | Answer::Cancelled => return Ok(Answer::Cancelled),
        };

        if let Some((_, next)) = choices.get(index) {
            return Ok(Answer::Answered(next.clone()));
        }

        let seed = bumper.current().to_string();
        let custom = tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("Enter a custom version")
                .with_initial_text(seed)
                .validate_with(|input: &String| -> std::result::Result<(), String> {
                    if is_valid_version(input) {
                        Ok(())
                    } else {
                        Err(format!("'{input}' is not a valid semantic version"))
                    }
                })
                .interact_text()
        })
        .await
        .map_err(PromptError::from)?;

        match interrupted_as_cancel(custom)? {
            Answer::Answered(text) => parse_version(&text)
                .map(Answer::Answered)
                .map_err(|_| PromptError::InvalidCustomVersion { version: text }.into()),
            Answer::Cancelled => Ok(Answer::Cancelled),
        }
    }

    async fn confirm(&self, message: &str) -> Result<Answer<bool>> {
        let message = message.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(message)
                .default(true)
                .interact_opt()
        })
        .await
        .map_err(PromptError::from)?;

        Ok(match interrupted_as_cancel(answer)? {
            Answer::Answered(Some(value)) => Answer::Answered(value),
            Answer::Answered(None) | Answer::Cancelled => Answer::Cancelled,
        })
    }
}

/// Ctrl-C surfaces as an interrupted read; treat it like Esc
fn interrupted_as_cancel<T>(result: std::result::Result<T, dialoguer::Error>) -> Result<Answer<T>> {
    match result {
        Ok(value) => Ok(Answer::Answered(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => {
            Ok(Answer::Cancelled)
        }
        Err(e) => Err(PromptError::from(e).into()),
    }
}
