//! Locating project manifests under a directory.

use super::{ProjectFile, ProjectKind};
use crate::error::{ProjectError, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Exclusions applied when none are configured
pub const DEFAULT_EXCLUDES: [&str; 3] = ["**/node_modules/**", "**/target/**", "**/.git/**"];

/// Find project manifests under `dir`.
///
/// Only `dir` itself is inspected unless `recursive` is set. `excludes` are glob
/// patterns matched against paths relative to `dir`. Results are sorted by path.
pub fn discover_project_files(
    dir: &Path,
    excludes: &[String],
    recursive: bool,
) -> Result<Vec<ProjectFile>> {
    let patterns = compile_patterns(excludes)?;
    let excluded = |relative: &Path| patterns.iter().any(|p| p.matches_path(relative));

    let mut files = Vec::new();

    if recursive {
        let walker = WalkDir::new(dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let relative = relative_to(dir, entry.path());
                // Test a child path too, so `**/target/**` prunes `target` itself
                !(excluded(&relative) || excluded(&relative.join("_")))
            });

        for entry in walker {
            let entry = entry.map_err(|e| ProjectError::Walk {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(kind) = entry.file_name().to_str().and_then(ProjectKind::from_file_name)
            else {
                continue;
            };
            if excluded(&relative_to(dir, entry.path())) {
                log::debug!("Excluded {}", entry.path().display());
                continue;
            }
            files.push(ProjectFile::new(dir, entry.into_path(), kind));
        }
    } else {
        for kind in ProjectKind::ALL {
            let path = dir.join(kind.file_name());
            if !path.is_file() {
                continue;
            }
            if excluded(Path::new(kind.file_name())) {
                log::debug!("Excluded {}", path.display());
                continue;
            }
            files.push(ProjectFile::new(dir, path, kind));
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!("Discovered {} project file(s) in {}", files.len(), dir.display());
    Ok(files)
}

fn compile_patterns(excludes: &[String]) -> Result<Vec<Pattern>> {
    excludes
        .iter()
        .map(|raw| {
            Pattern::new(raw).map_err(|e| {
                ProjectError::InvalidExclude {
                    pattern: raw.clone(),
                    reason: e.to_string(),
                }
                .into()
            })
        })
        .collect()
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn defaults() -> Vec<String> {
        DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
    }

    fn layout() -> TempDir {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let root = temp.path();
        fs::write(root.join("Cargo.toml"), "[package]\nname = \"root\"\n").unwrap();
        fs::write(root.join("package.json"), "{}\n").unwrap();
        fs::create_dir_all(root.join("crates/core")).unwrap();
        fs::write(root.join("crates/core/Cargo.toml"), "[package]\nname = \"core\"\n").unwrap();
        fs::create_dir_all(root.join("node_modules/dep")).unwrap();
        fs::write(root.join("node_modules/dep/package.json"), "{}\n").unwrap();
        fs::create_dir_all(root.join("legacy")).unwrap();
        fs::write(root.join("legacy/pyproject.toml"), "[project]\n").unwrap();
        temp
    }

    #[test]
    fn test_non_recursive_only_root() {
        let temp = layout();
        let files = discover_project_files(temp.path(), &defaults(), false).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.relative_path.clone()).collect();
        assert_eq!(names, vec![PathBuf::from("Cargo.toml"), PathBuf::from("package.json")]);
        assert_eq!(files[0].kind, ProjectKind::Cargo);
        assert_eq!(files[1].kind, ProjectKind::Npm);
    }

    #[test]
    fn test_recursive_honors_excludes() {
        let temp = layout();
        let mut excludes = defaults();
        excludes.push("legacy/**".to_string());
        let files = discover_project_files(temp.path(), &excludes, true).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.relative_path.clone()).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("Cargo.toml"),
                PathBuf::from("crates/core/Cargo.toml"),
                PathBuf::from("package.json"),
            ]
        );
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let files = discover_project_files(temp.path(), &[], true).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let temp = TempDir::new().unwrap();
        let result = discover_project_files(temp.path(), &["[".to_string()], false);
        assert!(result.is_err());
    }
}
