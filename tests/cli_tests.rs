//! End-to-end tests for the release binary.
//!
//! Every run uses `--dry` or declines the git steps, so no repository is needed.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn release_bump(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("kodegen_release_bump");
    cmd.arg("--dir")
        .arg(dir.path())
        .env_remove("RELEASE_MAIN")
        .env_remove("RELEASE_MESSAGE")
        .env_remove("DRY");
    cmd
}

fn cargo_project(version: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("Cargo.toml"),
        format!("[package]\nname = \"demo\"\nversion = \"{version}\" # bumped on release\n"),
    )
    .unwrap();
    dir
}

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        cargo_bin_cmd!("kodegen_release_bump")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--version"))
            .stdout(predicate::str::contains("--follow-tags"));
    }

    #[test]
    fn test_rejects_unknown_main_kind() {
        let dir = TempDir::new().unwrap();
        release_bump(&dir)
            .args(["--main", "maven"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("maven"));
    }

    #[test]
    fn test_empty_preid_is_invalid() {
        let dir = cargo_project("1.0.0");
        release_bump(&dir)
            .args(["--preid=", "--version", "1.0.1", "--yes", "--dry"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--preid"));
    }

    #[test]
    fn test_missing_dir_is_setup_error() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("kodegen_release_bump")
            .arg("--dir")
            .arg(dir.path().join("missing"))
            .args(["--version", "1.0.0", "--yes"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("not a directory"));
    }
}

mod releases {
    use super::*;

    #[test]
    fn test_no_project_files() {
        let dir = TempDir::new().unwrap();
        release_bump(&dir)
            .args(["--version", "1.0.0", "--yes", "--dry"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("No project files found"));
    }

    #[test]
    fn test_dry_run_release() {
        let dir = cargo_project("1.4.2");
        release_bump(&dir)
            .args(["--version", "2.0.0", "--yes", "--dry"])
            .assert()
            .success();

        let manifest = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
        assert!(manifest.contains("version = \"2.0.0\" # bumped on release"));
    }

    #[test]
    fn test_update_only_release() {
        let dir = cargo_project("0.1.0");
        fs::write(dir.path().join("package.json"), "{\n    \"name\": \"demo\",\n    \"version\": \"0.1.0\"\n}\n").unwrap();

        release_bump(&dir)
            .args([
                "--version",
                "v0.2.0",
                "--commit=false",
                "--tag=false",
                "--push=false",
            ])
            .assert()
            .success();

        let package = fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert_eq!(package, "{\n    \"name\": \"demo\",\n    \"version\": \"0.2.0\"\n}\n");
    }

    #[test]
    fn test_update_failure_exits_nonzero() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[dependencies]\nserde = \"1\"\n").unwrap();

        release_bump(&dir)
            .args(["--version", "1.0.0", "--yes", "--dry"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("stopped at 'update version'"));
    }

    #[test]
    fn test_config_file_supplies_main() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pyproject.toml"), "[project]\nname = \"demo\"\nversion = \"3.0.0\"\n").unwrap();
        fs::write(dir.path().join("release.toml"), "main = \"python\"\ncommit = false\ntag = false\npush = false\n").unwrap();

        release_bump(&dir)
            .args(["--version", "3.1.0"])
            .assert()
            .success();

        let pyproject = fs::read_to_string(dir.path().join("pyproject.toml")).unwrap();
        assert!(pyproject.contains("version = \"3.1.0\""));
    }

    #[test]
    fn test_main_kind_missing() {
        let dir = cargo_project("1.0.0");
        release_bump(&dir)
            .args(["--main", "npm", "--version", "1.0.1", "--yes", "--dry"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn test_recursive_virtual_workspace_finishes() {
        let dir = TempDir::new().unwrap();
        let root_manifest = "[workspace]\nmembers = [\"crates/*\"]\nresolver = \"2\"\n";
        fs::write(dir.path().join("Cargo.toml"), root_manifest).unwrap();
        for member in ["alpha", "beta"] {
            let member_dir = dir.path().join("crates").join(member);
            fs::create_dir_all(&member_dir).unwrap();
            fs::write(
                member_dir.join("Cargo.toml"),
                format!("[package]\nname = \"{member}\"\nversion = \"0.3.0\"\n"),
            )
            .unwrap();
        }

        release_bump(&dir)
            .args(["-r", "--version", "0.4.0", "--yes", "--dry"])
            .assert()
            .success();

        assert_eq!(
            fs::read_to_string(dir.path().join("Cargo.toml")).unwrap(),
            root_manifest
        );
        for member in ["alpha", "beta"] {
            let manifest =
                fs::read_to_string(dir.path().join("crates").join(member).join("Cargo.toml"))
                    .unwrap();
            assert!(manifest.contains("version = \"0.4.0\""));
        }
    }

    #[test]
    fn test_step_order_ignores_flag_order() {
        let dir = cargo_project("1.0.0");
        release_bump(&dir)
            .args(["--push", "--tag", "--commit", "--dry", "-v", "--version", "1.0.1"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Steps: update version → commit → tag → push",
            ))
            .stdout(predicate::str::is_match("(?s)Committing.*Tagging.*Pushing").unwrap());
    }
}
