//! Error types for release runs.
//!
//! Every failure that can stop a release before its task queue starts lives here,
//! together with actionable recovery suggestions. Per-file and per-step failures
//! during execution are reported as task outcomes instead (see `release::status`).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Exit code for a run that finished normally
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a run whose queued steps reported a failure
pub const EXIT_FAILED: i32 = 1;
/// Exit code for setup failures (nothing was queued)
pub const EXIT_SETUP: i32 = 2;
/// Exit code for operator cancellation
pub const EXIT_CANCELLED: i32 = 130;

/// Main error type for all release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Project file discovery and manifest errors
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    /// Version management errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Git operation errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    /// Configuration file errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Discovery and manifest errors
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Discovery found nothing to release
    #[error("No project files found in {dir}")]
    NoProjectFilesFound {
        /// Directory that was searched
        dir: PathBuf,
    },

    /// None of the discovered files has the main category
    #[error("Main project file of kind '{kind}' not found among {found} discovered file(s)")]
    MainProjectFileMissing {
        /// Requested category
        kind: String,
        /// Number of files that were discovered
        found: usize,
    },

    /// Exclusion pattern did not parse
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidExclude {
        /// Pattern as given
        pattern: String,
        /// Parser message
        reason: String,
    },

    /// Directory walk failed
    #[error("Failed to walk {path}: {reason}")]
    Walk {
        /// Path being walked
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Manifest could not be read or parsed
    #[error("Failed to read version from {path}: {reason}")]
    ManifestRead {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Manifest could not be updated
    #[error("Failed to write version to {path}: {reason}")]
    ManifestWrite {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Version management errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// Version parsing failed
    #[error("Failed to parse version '{version}': {source}")]
    ParseFailed {
        /// Version string
        version: String,
        /// Parsing error
        #[source]
        source: semver::Error,
    },

    /// Prerelease identifier is not a valid semver identifier
    #[error("Invalid prerelease identifier '{preid}'")]
    InvalidPreid {
        /// Identifier as given
        preid: String,
    },
}

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// git could not be started
    #[error("Failed to run `{command}`: {reason}")]
    Spawn {
        /// Command line
        command: String,
        /// Reason for the error
        reason: String,
    },

    /// git exited with a non-zero status
    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        /// Command line
        command: String,
        /// Exit status
        status: String,
        /// Captured stderr
        stderr: String,
    },
}

/// Interactive prompt errors
#[derive(Error, Debug)]
pub enum PromptError {
    /// Terminal interaction failed
    #[error("Terminal interaction failed: {0}")]
    Terminal(#[from] dialoguer::Error),

    /// Blocking prompt task panicked or was aborted
    #[error("Prompt task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Operator entered an invalid custom version
    #[error("Invalid custom version '{version}'")]
    InvalidCustomVersion {
        /// Text entered
        version: String,
    },
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// Config path
        path: PathBuf,
        /// IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this tool
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        /// Config path
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Project(ProjectError::NoProjectFilesFound { .. }) => vec![
                "Run from a directory containing Cargo.toml, package.json or pyproject.toml"
                    .to_string(),
                "Use --dir to point at the project root".to_string(),
                "Use --recursive to search subdirectories".to_string(),
            ],
            ReleaseError::Project(ProjectError::MainProjectFileMissing { .. }) => vec![
                "Use --main to choose one of the discovered project kinds".to_string(),
                "Check that --excludes does not filter out the main manifest".to_string(),
            ],
            ReleaseError::Project(ProjectError::InvalidExclude { .. }) => {
                vec!["Exclude patterns use glob syntax, e.g. 'packages/legacy/**'".to_string()]
            }
            ReleaseError::Config(_) => vec![
                "Fix or remove release.toml in the project root".to_string(),
            ],
            ReleaseError::Prompt(PromptError::Terminal(_)) => vec![
                "Run from an interactive terminal, or pass --version and --yes".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::Project(_) | ReleaseError::Config(_) | ReleaseError::Cli(_) => {
                EXIT_SETUP
            }
            _ => EXIT_FAILED,
        }
    }
}
