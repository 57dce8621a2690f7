//! Current and next version resolution.

use crate::cli::OutputManager;
use crate::config::ReleaseOptions;
use crate::error::{ProjectError, Result};
use crate::project::{ProjectFile, discover_project_files};
use crate::prompt::{Answer, Prompter};
use crate::version::{is_valid_version, parse_version};
use semver::Version;

/// Resolved versions plus the files they apply to
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Version in the main project file, `None` for a project without one
    pub current: Option<String>,
    /// Version being released
    pub next: Version,
    /// Every discovered project file
    pub files: Vec<ProjectFile>,
}

/// Determines the current and next version of a project
pub struct VersionResolver<'a, P> {
    prompter: &'a P,
    output: &'a OutputManager,
}

impl<'a, P: Prompter> VersionResolver<'a, P> {
    /// Create a resolver
    pub fn new(prompter: &'a P, output: &'a OutputManager) -> Self {
        Self { prompter, output }
    }

    /// Discover project files and resolve `(current, next)`.
    ///
    /// Fails when nothing is discovered or the main file is missing. An invalid
    /// explicit version falls through to the interactive choice.
    pub async fn resolve(&self, options: &ReleaseOptions) -> Result<Answer<Resolution>> {
        let files = discover_project_files(&options.dir, &options.excludes, options.recursive)?;
        if files.is_empty() {
            return Err(ProjectError::NoProjectFilesFound {
                dir: options.dir.clone(),
            }
            .into());
        }

        let main = files
            .iter()
            .find(|file| file.kind == options.main)
            .ok_or_else(|| ProjectError::MainProjectFileMissing {
                kind: options.main.to_string(),
                found: files.len(),
            })?;

        let current = main.read_version().await?;
        self.output.verbose(&format!(
            "Main project file: {} (version {})",
            main.relative_path.display(),
            current.as_deref().unwrap_or("unknown")
        ));

        if let Some(explicit) = explicit_version(options, self.output) {
            return Ok(Answer::Answered(Resolution {
                current,
                next: explicit,
                files,
            }));
        }

        let next = self
            .prompter
            .choose_version(current.as_deref(), &options.preid)
            .await?;
        Ok(next.map(|next| Resolution {
            current,
            next,
            files,
        }))
    }
}

fn explicit_version(options: &ReleaseOptions, output: &OutputManager) -> Option<Version> {
    let raw = options.version.as_deref()?;
    if !is_valid_version(raw) {
        log::warn!("Ignoring invalid --version '{raw}'");
        output.warn(&format!(
            "'{raw}' is not a valid semantic version, choose one interactively"
        ));
        return None;
    }
    parse_version(raw).ok()
}
