//! [`GitOperations`] over the system `git` binary.

use super::{CommitOptions, DRY_ENV, GitOperations, PushOptions, TagOptions};
use crate::error::{GitError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Whether the `DRY` environment variable requests a dry run
pub fn dry_run_from_env() -> bool {
    std::env::var(DRY_ENV)
        .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
        .unwrap_or(false)
}

/// Runs git commands in a working directory
#[derive(Debug, Clone)]
pub struct GitCli {
    work_dir: PathBuf,
}

impl GitCli {
    /// Create a git runner for `work_dir`
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Self {
        Self {
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    async fn run(&self, args: Vec<OsString>, dry: bool) -> Result<()> {
        let command = display_command(&args);

        if dry || dry_run_from_env() {
            log::info!("[dry run] {command}");
            return Ok(());
        }

        log::debug!("Running {command} in {}", self.work_dir.display());
        let output = tokio::process::Command::new("git")
            .args(&args)
            .current_dir(&self.work_dir)
            .output()
            .await
            .map_err(|e| GitError::Spawn {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl GitOperations for GitCli {
    async fn commit(&self, options: &CommitOptions) -> Result<()> {
        if options.stage_all {
            self.run(vec!["add".into(), "--all".into()], options.dry).await?;
        } else if !options.files.is_empty() {
            let mut add: Vec<OsString> = vec!["add".into(), "--".into()];
            add.extend(options.files.iter().map(|p| p.as_os_str().to_os_string()));
            self.run(add, options.dry).await?;
        }

        let mut commit: Vec<OsString> = vec!["commit".into(), "--message".into()];
        commit.push(options.message.clone().into());
        if !options.verify {
            commit.push("--no-verify".into());
        }
        self.run(commit, options.dry).await
    }

    async fn tag(&self, options: &TagOptions) -> Result<()> {
        let args: Vec<OsString> = vec![
            "tag".into(),
            "--annotate".into(),
            "--message".into(),
            options.message.clone().into(),
            options.tag_name.clone().into(),
        ];
        self.run(args, options.dry).await
    }

    async fn push(&self, options: &PushOptions) -> Result<()> {
        let mut args: Vec<OsString> = vec!["push".into()];
        if options.follow_tags {
            args.push("--follow-tags".into());
        }
        self.run(args, options.dry).await
    }
}

fn display_command(args: &[OsString]) -> String {
    let mut line = String::from("git");
    for arg in args {
        let arg = arg.to_string_lossy();
        line.push(' ');
        if arg.contains(char::is_whitespace) {
            line.push_str(&format!("{arg:?}"));
        } else {
            line.push_str(&arg);
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_display_command_quotes_spaces() {
        let args: Vec<OsString> = vec!["commit".into(), "--message".into(), "release: v1.0.0".into()];
        assert_eq!(
            display_command(&args),
            "git commit --message \"release: v1.0.0\""
        );
    }

    #[tokio::test]
    async fn test_dry_run_executes_nothing() {
        // Not a repository: any real git invocation would fail
        let temp = TempDir::new().expect("Failed to create temp dir");
        let git = GitCli::new(temp.path());

        let commit = CommitOptions {
            dry: true,
            message: "release: v1.0.0".to_string(),
            files: vec![temp.path().join("Cargo.toml")],
            stage_all: false,
            verify: true,
        };
        assert!(git.commit(&commit).await.is_ok());

        let tag = TagOptions {
            dry: true,
            message: "release: v1.0.0".to_string(),
            tag_name: "v1.0.0".to_string(),
        };
        assert!(git.tag(&tag).await.is_ok());
        assert!(git.push(&PushOptions { dry: true, follow_tags: true }).await.is_ok());
    }
}
