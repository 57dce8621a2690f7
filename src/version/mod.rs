//! Version validation and bumping.
//!
//! Versions are semantic versions (`MAJOR.MINOR.PATCH[-PRE][+BUILD]`), optionally
//! written with a single leading `v`.

mod bumper;

pub use bumper::{VersionBump, VersionBumper};

use crate::error::{Result, VersionError};
use semver::Version;

/// Check whether a string is a well-formed semantic version.
pub fn is_valid_version(version: &str) -> bool {
    parse_version(version).is_ok()
}

/// Parse a version string, tolerating one leading `v`.
pub fn parse_version(version: &str) -> Result<Version> {
    let trimmed = version.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(bare).map_err(|source| {
        VersionError::ParseFailed {
            version: version.to_string(),
            source,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_semver() {
        for v in ["0.0.0", "1.2.3", "10.20.30", "1.0.0-beta.1", "2.0.0+build.5", "v3.1.4"] {
            assert!(is_valid_version(v), "{v} should be valid");
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for v in ["abc", "", "1.2", "1", "1.2.3.4", "01.2.3", "vv1.2.3", "1.2.x"] {
            assert!(!is_valid_version(v), "{v} should be rejected");
        }
    }

    #[test]
    fn test_parse_strips_prefix() {
        let v = parse_version("v2.1.0").expect("valid version");
        assert_eq!(v, Version::new(2, 1, 0));
    }
}
