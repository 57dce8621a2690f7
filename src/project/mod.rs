//! Project file discovery and version field access.
//!
//! A project file is a manifest that carries a version: `Cargo.toml`,
//! `package.json` or `pyproject.toml`. Each is classified by [`ProjectKind`],
//! which is what `--main` selects on.

mod discovery;
mod manifest;

pub use discovery::{DEFAULT_EXCLUDES, discover_project_files};

use crate::error::Result;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Category of a project manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// Rust crate or workspace (`Cargo.toml`)
    Cargo,
    /// Node package (`package.json`)
    Npm,
    /// Python project (`pyproject.toml`)
    Python,
}

impl ProjectKind {
    /// All recognized kinds
    pub const ALL: [ProjectKind; 3] = [ProjectKind::Cargo, ProjectKind::Npm, ProjectKind::Python];

    /// Manifest file name for this kind
    pub fn file_name(&self) -> &'static str {
        match self {
            ProjectKind::Cargo => "Cargo.toml",
            ProjectKind::Npm => "package.json",
            ProjectKind::Python => "pyproject.toml",
        }
    }

    /// Classify a manifest by its file name
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.file_name() == name)
    }

    /// Category name as accepted by `--main`
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Cargo => "cargo",
            ProjectKind::Npm => "npm",
            ProjectKind::Python => "python",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    /// Absolute path to the manifest
    pub path: PathBuf,
    /// Path relative to the discovery root, for display
    pub relative_path: PathBuf,
    /// Manifest category
    pub kind: ProjectKind,
}

impl ProjectFile {
    /// Create a project file rooted at `root`
    pub fn new(root: &Path, path: PathBuf, kind: ProjectKind) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        Self {
            path,
            relative_path,
            kind,
        }
    }

    /// Read the version field. `Ok(None)` when the manifest has no version of its own.
    pub async fn read_version(&self) -> Result<Option<String>> {
        manifest::read_version(self).await
    }

    /// Write `version` into the manifest.
    ///
    /// Returns `Ok(false)` when the manifest inherits its version and was left untouched.
    pub async fn write_version(&self, version: &semver::Version) -> Result<bool> {
        manifest::write_version(self, version).await
    }
}
