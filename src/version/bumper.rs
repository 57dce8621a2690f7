//! Semantic version bump computation.

use crate::error::{Result, VersionError};
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// Kind of bump offered to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    /// `1.2.3` → `2.0.0`
    Major,
    /// `1.2.3` → `1.3.0`
    Minor,
    /// `1.2.3` → `1.2.4`
    Patch,
    /// `1.2.3` → `2.0.0-beta.0`
    PreMajor,
    /// `1.2.3` → `1.3.0-beta.0`
    PreMinor,
    /// `1.2.3` → `1.2.4-beta.0`
    PrePatch,
    /// `1.2.4-beta.0` → `1.2.4-beta.1`, `1.2.3` → `1.2.4-beta.0`
    Prerelease,
}

impl VersionBump {
    /// All bumps in the order they are presented
    pub const ALL: [VersionBump; 7] = [
        VersionBump::Patch,
        VersionBump::Minor,
        VersionBump::Major,
        VersionBump::PrePatch,
        VersionBump::PreMinor,
        VersionBump::PreMajor,
        VersionBump::Prerelease,
    ];

    /// Short name shown in prompts
    pub fn name(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
            VersionBump::PreMajor => "premajor",
            VersionBump::PreMinor => "preminor",
            VersionBump::PrePatch => "prepatch",
            VersionBump::Prerelease => "prerelease",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Computes next versions from a base version
#[derive(Debug, Clone)]
pub struct VersionBumper {
    current: Version,
    preid: String,
}

impl VersionBumper {
    /// Create a bumper. Fails if `preid` is not a valid prerelease identifier.
    pub fn new(current: Version, preid: &str) -> Result<Self> {
        if preid.is_empty() || Prerelease::new(preid).is_err() {
            return Err(VersionError::InvalidPreid {
                preid: preid.to_string(),
            }
            .into());
        }
        Ok(Self {
            current,
            preid: preid.to_string(),
        })
    }

    /// Version being bumped from
    pub fn current(&self) -> &Version {
        &self.current
    }

    /// Compute the version produced by `bump`
    pub fn bump(&self, bump: VersionBump) -> Version {
        let cur = &self.current;
        let is_pre = !cur.pre.is_empty();
        match bump {
            // A prerelease of X.0.0 releases as X.0.0
            VersionBump::Major if is_pre && cur.minor == 0 && cur.patch == 0 => {
                Version::new(cur.major, 0, 0)
            }
            VersionBump::Major => Version::new(cur.major + 1, 0, 0),
            VersionBump::Minor if is_pre && cur.patch == 0 => Version::new(cur.major, cur.minor, 0),
            VersionBump::Minor => Version::new(cur.major, cur.minor + 1, 0),
            VersionBump::Patch if is_pre => Version::new(cur.major, cur.minor, cur.patch),
            VersionBump::Patch => Version::new(cur.major, cur.minor, cur.patch + 1),
            VersionBump::PreMajor => self.first_pre(Version::new(cur.major + 1, 0, 0)),
            VersionBump::PreMinor => self.first_pre(Version::new(cur.major, cur.minor + 1, 0)),
            VersionBump::PrePatch => {
                self.first_pre(Version::new(cur.major, cur.minor, cur.patch + 1))
            }
            VersionBump::Prerelease if is_pre => self.next_pre(),
            VersionBump::Prerelease => {
                self.first_pre(Version::new(cur.major, cur.minor, cur.patch + 1))
            }
        }
    }

    fn first_pre(&self, mut base: Version) -> Version {
        base.pre = self.prerelease(&format!("{}.0", self.preid));
        base
    }

    /// Increment the trailing numeric identifier, or restart under `preid`
    fn next_pre(&self) -> Version {
        let mut next = self.current.clone();
        next.build = BuildMetadata::EMPTY;
        let pre = self.current.pre.as_str();

        let text = match pre.rsplit_once('.') {
            Some((head, tail)) if head == self.preid => match tail.parse::<u64>() {
                Ok(n) => format!("{head}.{}", n + 1),
                Err(_) => format!("{pre}.0"),
            },
            None if pre == self.preid => format!("{pre}.0"),
            None => match pre.parse::<u64>() {
                Ok(n) => (n + 1).to_string(),
                Err(_) => format!("{}.0", self.preid),
            },
            Some(_) => format!("{}.0", self.preid),
        };
        next.pre = self.prerelease(&text);
        next
    }

    fn prerelease(&self, text: &str) -> Prerelease {
        // preid was validated in new(), numeric suffixes are always valid
        Prerelease::new(text).unwrap_or(Prerelease::EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bumper(v: &str) -> VersionBumper {
        VersionBumper::new(Version::parse(v).unwrap(), "beta").unwrap()
    }

    #[test]
    fn test_release_bumps() {
        let b = bumper("1.2.3");
        assert_eq!(b.bump(VersionBump::Patch).to_string(), "1.2.4");
        assert_eq!(b.bump(VersionBump::Minor).to_string(), "1.3.0");
        assert_eq!(b.bump(VersionBump::Major).to_string(), "2.0.0");
    }

    #[test]
    fn test_pre_bumps() {
        let b = bumper("1.2.3");
        assert_eq!(b.bump(VersionBump::PrePatch).to_string(), "1.2.4-beta.0");
        assert_eq!(b.bump(VersionBump::PreMinor).to_string(), "1.3.0-beta.0");
        assert_eq!(b.bump(VersionBump::PreMajor).to_string(), "2.0.0-beta.0");
        assert_eq!(b.bump(VersionBump::Prerelease).to_string(), "1.2.4-beta.0");
    }

    #[test]
    fn test_prerelease_increments() {
        assert_eq!(
            bumper("1.2.4-beta.0").bump(VersionBump::Prerelease).to_string(),
            "1.2.4-beta.1"
        );
        assert_eq!(
            bumper("1.2.4-alpha.3").bump(VersionBump::Prerelease).to_string(),
            "1.2.4-beta.0"
        );
    }

    #[test]
    fn test_release_from_prerelease() {
        assert_eq!(bumper("2.0.0-beta.2").bump(VersionBump::Major).to_string(), "2.0.0");
        assert_eq!(bumper("1.3.0-beta.2").bump(VersionBump::Minor).to_string(), "1.3.0");
        assert_eq!(bumper("1.2.4-beta.2").bump(VersionBump::Patch).to_string(), "1.2.4");
    }

    #[test]
    fn test_rejects_bad_preid() {
        assert!(VersionBumper::new(Version::new(1, 0, 0), "").is_err());
        assert!(VersionBumper::new(Version::new(1, 0, 0), "be ta").is_err());
    }
}
