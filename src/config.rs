//! Release options and the optional project config file.
//!
//! Options are layered: built-in defaults, then `release.toml` (or
//! `.release.toml`) in the project root, then command line flags.

use crate::error::{ConfigError, Result};
use crate::project::{DEFAULT_EXCLUDES, ProjectKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file names looked up in the project root, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["release.toml", ".release.toml"];

/// Default commit and tag message template
pub const DEFAULT_MESSAGE: &str = "release: v%s";

/// Default prerelease identifier
pub const DEFAULT_PREID: &str = "beta";

/// Everything a release run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// Project root
    pub dir: PathBuf,
    /// Glob patterns excluded from discovery, [`DEFAULT_EXCLUDES`] included
    pub excludes: Vec<String>,
    /// Search subdirectories
    pub recursive: bool,
    /// Category whose manifest holds the current version
    pub main: ProjectKind,
    /// Explicit next version
    pub version: Option<String>,
    /// Prerelease identifier for pre* bumps
    pub preid: String,
    /// Suppress version-control side effects
    pub dry: bool,
    /// Authorize every optional step without asking
    pub yes: bool,
    /// Commit decision, `None` until decided
    pub commit: Option<bool>,
    /// Tag decision, `None` until decided
    pub tag: Option<bool>,
    /// Push decision, `None` until decided
    pub push: Option<bool>,
    /// Commit/tag message template, `%s` is the version
    pub message: String,
    /// Stage every change instead of only the modified manifests
    pub stage_all: bool,
    /// Run commit hooks
    pub verify: bool,
    /// Push with `--follow-tags`
    pub follow_tags: bool,
}

impl ReleaseOptions {
    /// Add exclude patterns, keeping the ones already present
    pub fn extend_excludes<I: IntoIterator<Item = String>>(&mut self, patterns: I) {
        for pattern in patterns {
            if !self.excludes.contains(&pattern) {
                self.excludes.push(pattern);
            }
        }
    }

    /// Remove [`DEFAULT_EXCLUDES`], keeping configured patterns
    pub fn drop_default_excludes(&mut self) {
        self.excludes
            .retain(|pattern| !DEFAULT_EXCLUDES.contains(&pattern.as_str()));
    }
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            recursive: false,
            main: ProjectKind::Cargo,
            version: None,
            preid: DEFAULT_PREID.to_string(),
            dry: false,
            yes: false,
            commit: None,
            tag: None,
            push: None,
            message: DEFAULT_MESSAGE.to_string(),
            stage_all: false,
            verify: true,
            follow_tags: true,
        }
    }
}

/// Contents of `release.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    /// Glob patterns excluded from discovery, added to the defaults
    pub excludes: Option<Vec<String>>,
    /// Keep the built-in excludes (`node_modules`, `target`, `.git`)
    pub default_excludes: Option<bool>,
    /// Search subdirectories
    pub recursive: Option<bool>,
    /// Main project category
    pub main: Option<ProjectKind>,
    /// Prerelease identifier
    pub preid: Option<String>,
    /// Message template
    pub message: Option<String>,
    /// Commit decision
    pub commit: Option<bool>,
    /// Tag decision
    pub tag: Option<bool>,
    /// Push decision
    pub push: Option<bool>,
    /// Stage all changes
    pub all: Option<bool>,
    /// Run commit hooks
    pub verify: Option<bool>,
    /// Push with `--follow-tags`
    pub follow_tags: Option<bool>,
}

impl FileConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    /// Load `explicit` if given, otherwise the first config file found in `dir`
    pub fn discover(dir: &Path, explicit: Option<&Path>) -> Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load(path).map(Some);
        }
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.is_file() {
                log::debug!("Using config {}", path.display());
                return Self::load(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Apply this file's settings over `options`
    pub fn apply_to(self, options: &mut ReleaseOptions) {
        if self.default_excludes == Some(false) {
            options.drop_default_excludes();
        }
        if let Some(excludes) = self.excludes {
            options.extend_excludes(excludes);
        }
        if let Some(recursive) = self.recursive {
            options.recursive = recursive;
        }
        if let Some(main) = self.main {
            options.main = main;
        }
        if let Some(preid) = self.preid {
            options.preid = preid;
        }
        if let Some(message) = self.message {
            options.message = message;
        }
        options.commit = self.commit.or(options.commit);
        options.tag = self.tag.or(options.tag);
        options.push = self.push.or(options.push);
        if let Some(all) = self.all {
            options.stage_all = all;
        }
        if let Some(verify) = self.verify {
            options.verify = verify;
        }
        if let Some(follow_tags) = self.follow_tags {
            options.follow_tags = follow_tags;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_and_apply() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        fs::write(
            temp.path().join("release.toml"),
            "main = \"npm\"\nrecursive = true\ncommit = false\nmessage = \"chore: %s\"\nfollow-tags = false\n",
        )
        .unwrap();

        let config = FileConfig::discover(temp.path(), None).unwrap().unwrap();
        let mut options = ReleaseOptions::default();
        config.apply_to(&mut options);

        assert_eq!(options.main, ProjectKind::Npm);
        assert!(options.recursive);
        assert_eq!(options.commit, Some(false));
        assert_eq!(options.tag, None);
        assert_eq!(options.message, "chore: %s");
        assert!(!options.follow_tags);
        assert_eq!(options.excludes.len(), DEFAULT_EXCLUDES.len());
    }

    #[test]
    fn test_config_excludes_extend_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("release.toml");
        fs::write(&path, "excludes = [\"docs/**\", \"**/target/**\"]\n").unwrap();

        let mut options = ReleaseOptions::default();
        FileConfig::load(&path).unwrap().apply_to(&mut options);

        let mut expected: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
        expected.push("docs/**".to_string());
        assert_eq!(options.excludes, expected);
    }

    #[test]
    fn test_config_can_drop_default_excludes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("release.toml");
        fs::write(&path, "default-excludes = false\nexcludes = [\"docs/**\"]\n").unwrap();

        let mut options = ReleaseOptions::default();
        FileConfig::load(&path).unwrap().apply_to(&mut options);
        assert_eq!(options.excludes, vec!["docs/**".to_string()]);
    }

    #[test]
    fn test_missing_config_is_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(FileConfig::discover(temp.path(), None).unwrap(), None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("release.toml");
        fs::write(&path, "bogus = 1\n").unwrap();
        assert!(FileConfig::load(&path).is_err());
    }
}
