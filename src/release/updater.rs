//! Writing the next version into every project file.
//!
//! Files are updated concurrently and independently: one failure never stops
//! the others. Results are collected after the batch is joined.

use super::queue::Task;
use super::status::TaskOutcome;
use crate::cli::OutputManager;
use crate::error::ReleaseError;
use crate::project::ProjectFile;
use futures::StreamExt;
use futures::stream;
use semver::Version;
use std::cell::RefCell;
use std::path::PathBuf;

/// Name of the mandatory first task
pub const UPDATE_TASK_NAME: &str = "update version";

/// Upper bound on concurrent manifest writes
pub const MAX_CONCURRENT_WRITES: usize = 16;

/// Paths successfully updated, in the order they completed
#[derive(Debug, Default)]
pub struct ModifiedFiles(RefCell<Vec<PathBuf>>);

impl ModifiedFiles {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append paths
    pub fn extend(&self, paths: impl IntoIterator<Item = PathBuf>) {
        self.0.borrow_mut().extend(paths);
    }

    /// Copy of the current list
    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.0.borrow().clone()
    }
}

/// Aggregated result of one update batch
#[derive(Debug, Default)]
pub struct UpdateReport {
    /// Files rewritten with the new version
    pub modified: Vec<PathBuf>,
    /// Files left alone because they inherit their version
    pub untouched: Vec<PathBuf>,
    /// Files that could not be updated
    pub failures: Vec<(PathBuf, ReleaseError)>,
}

impl UpdateReport {
    /// `Failed` if any file failed
    pub fn outcome(&self) -> TaskOutcome {
        TaskOutcome::from_success(self.failures.is_empty())
    }
}

/// Applies a version to a set of project files
pub struct ProjectVersionUpdater<'a> {
    output: &'a OutputManager,
}

impl<'a> ProjectVersionUpdater<'a> {
    /// Create an updater reporting progress to `output`
    pub fn new(output: &'a OutputManager) -> Self {
        Self { output }
    }

    /// Write `next` into every file, best effort across all of them
    pub async fn apply(&self, next: &Version, files: &[ProjectFile]) -> UpdateReport {
        let results: Vec<_> = stream::iter(files)
            .map(|file| async move {
                let result = file.write_version(next).await;
                match &result {
                    Ok(true) => self.output.success(&format!(
                        "{} → {}",
                        file.relative_path.display(),
                        next
                    )),
                    Ok(false) => self.output.verbose(&format!(
                        "{} inherits its version, skipped",
                        file.relative_path.display()
                    )),
                    Err(e) => {
                        log::error!("Updating {} failed: {}", file.path.display(), e);
                        self.output.error(&format!(
                            "Failed to update {}: {}",
                            file.relative_path.display(),
                            e
                        ));
                    }
                }
                (file.path.clone(), result)
            })
            .buffer_unordered(MAX_CONCURRENT_WRITES)
            .collect()
            .await;

        let mut report = UpdateReport::default();
        for (path, result) in results {
            match result {
                Ok(true) => report.modified.push(path),
                Ok(false) => report.untouched.push(path),
                Err(e) => report.failures.push((path, e)),
            }
        }
        report
    }

    /// The update step as a queue task, recording successes into `modified`
    pub fn task<'t>(
        &'t self,
        next: &'t Version,
        files: &'t [ProjectFile],
        modified: &'t ModifiedFiles,
    ) -> Task<'t> {
        Task::new(UPDATE_TASK_NAME, async move {
            let report = self.apply(next, files).await;
            modified.extend(report.modified.iter().cloned());
            if !report.failures.is_empty() {
                log::error!(
                    "{} of {} project file(s) failed to update",
                    report.failures.len(),
                    files.len()
                );
            }
            report.outcome()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectKind;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_partial_failure_collects_successes() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path();
        fs::write(root.join("Cargo.toml"), "[package]\nname = \"a\"\nversion = \"1.0.0\"\n")
            .unwrap();
        fs::write(root.join("package.json"), "{\n  \"name\": \"a\"\n}\n").unwrap();
        fs::write(root.join("pyproject.toml"), "[build-system]\nrequires = []\n").unwrap();

        let files = vec![
            ProjectFile::new(root, root.join("Cargo.toml"), ProjectKind::Cargo),
            ProjectFile::new(root, root.join("package.json"), ProjectKind::Npm),
            ProjectFile::new(root, root.join("pyproject.toml"), ProjectKind::Python),
        ];

        let output = OutputManager::new(false, true);
        let updater = ProjectVersionUpdater::new(&output);
        let report = updater.apply(&Version::new(1, 1, 0), &files).await;

        let mut modified = report.modified.clone();
        modified.sort();
        assert_eq!(modified, vec![root.join("Cargo.toml"), root.join("package.json")]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, root.join("pyproject.toml"));
        assert_eq!(report.outcome(), TaskOutcome::Failed);

        let json = fs::read_to_string(root.join("package.json")).unwrap();
        assert!(json.contains("\"version\": \"1.1.0\""));
    }
}
