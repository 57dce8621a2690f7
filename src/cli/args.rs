//! Command line argument parsing and option layering.

use crate::config::{FileConfig, ReleaseOptions};
use crate::error::{CliError, Result};
use crate::project::ProjectKind;
use clap::Parser;
use path_absolutize::Absolutize;
use std::path::PathBuf;

/// Bump, commit, tag and push a release
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kodegen_release_bump",
    disable_version_flag = true,
    about = "Bump project versions, then commit, tag and push the release",
    long_about = "Find version-bearing manifests (Cargo.toml, package.json, pyproject.toml),
write the next version into all of them, then optionally commit, tag and push.

Usage:
  kodegen_release_bump                       # choose the bump interactively
  kodegen_release_bump --version 2.1.0 --yes # non-interactive release
  kodegen_release_bump -r --main npm --dry   # recursive discovery, dry run"
)]
pub struct Args {
    /// Project root
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Glob patterns to exclude from discovery, in addition to the defaults (comma separated)
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    pub excludes: Vec<String>,

    /// Do not exclude node_modules, target and .git
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Search subdirectories for project files
    #[arg(long, short = 'r')]
    pub recursive: bool,

    /// Project kind whose manifest holds the current version
    #[arg(long, value_enum, env = "RELEASE_MAIN")]
    pub main: Option<ProjectKind>,

    /// Next version; skips the interactive choice when valid
    #[arg(long = "version", value_name = "SEMVER")]
    pub release_version: Option<String>,

    /// Prerelease identifier for pre* bumps
    #[arg(long, value_name = "ID")]
    pub preid: Option<String>,

    /// Log git commands instead of running them
    #[arg(long)]
    pub dry: bool,

    /// Commit, tag and push without asking
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Commit the version changes
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub commit: Option<bool>,

    /// Tag the release commit
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub tag: Option<bool>,

    /// Push to the remote
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub push: Option<bool>,

    /// Commit and tag message; `%s` is replaced by the version
    #[arg(long, short = 'm', value_name = "TEMPLATE", env = "RELEASE_MESSAGE")]
    pub message: Option<String>,

    /// Stage all changes, not only the updated manifests
    #[arg(long)]
    pub all: bool,

    /// Skip git commit hooks
    #[arg(long)]
    pub no_verify: bool,

    /// Push without --follow-tags
    #[arg(long)]
    pub no_follow_tags: bool,

    /// Config file (default: release.toml or .release.toml in --dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show detailed progress
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.preid.as_deref().is_some_and(str::is_empty) {
            return Err("--preid must not be empty".to_string());
        }
        if self.excludes.iter().any(String::is_empty) {
            return Err("--excludes contains an empty pattern".to_string());
        }
        Ok(())
    }

    /// Build release options: defaults, then the config file, then these flags
    pub fn to_options(&self) -> Result<ReleaseOptions> {
        let dir = self.dir.absolutize()?.to_path_buf();
        if !dir.is_dir() {
            return Err(CliError::InvalidArguments {
                reason: format!("--dir {} is not a directory", dir.display()),
            }
            .into());
        }

        let mut options = ReleaseOptions {
            dir,
            ..ReleaseOptions::default()
        };
        if let Some(file) = FileConfig::discover(&options.dir, self.config.as_deref())? {
            file.apply_to(&mut options);
        }

        if self.no_default_excludes {
            options.drop_default_excludes();
        }
        options.extend_excludes(self.excludes.iter().cloned());
        if self.recursive {
            options.recursive = true;
        }
        if let Some(main) = self.main {
            options.main = main;
        }
        if let Some(preid) = &self.preid {
            options.preid = preid.clone();
        }
        if let Some(message) = &self.message {
            options.message = message.clone();
        }
        options.version = self.release_version.clone();
        options.dry = self.dry;
        options.yes = self.yes;
        options.commit = self.commit.or(options.commit);
        options.tag = self.tag.or(options.tag);
        options.push = self.push.or(options.push);
        if self.all {
            options.stage_all = true;
        }
        if self.no_verify {
            options.verify = false;
        }
        if self.no_follow_tags {
            options.follow_tags = false;
        }

        Ok(options)
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}
