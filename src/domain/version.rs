use crate::domain::prerelease::PreRelease;
use crate::error::{Result, VersionError};
use std::cmp::Ordering;
use std::fmt;

/// Semantic version with an optional structured pre-release label
///
/// Ordering follows SemVer precedence: the core triple first, then a version
/// carrying a pre-release sorts before the same core without one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<PreRelease>,
}

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Parse a SemVer string (e.g. "1.2.3" or "1.2.3-rc.1")
    ///
    /// Build metadata is accepted and discarded. The pre-release, when present,
    /// must be exactly `kind.index`.
    pub fn parse(s: &str) -> Result<Self> {
        let parsed = semver::Version::parse(s)
            .map_err(|e| VersionError::parse(format!("Invalid version '{}': {}", s, e)))?;

        let prerelease = if parsed.pre.is_empty() {
            None
        } else {
            Some(PreRelease::parse(parsed.pre.as_str())?)
        };

        Ok(Version {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            prerelease,
        })
    }

    /// Attach a pre-release label, replacing any existing one
    pub fn with_prerelease(&self, kind: impl Into<String>, index: u64) -> Self {
        Version {
            prerelease: Some(PreRelease::new(kind, index)),
            ..self.core()
        }
    }

    /// The same major.minor.patch without a pre-release
    pub fn core(&self) -> Self {
        Version::new(self.major, self.minor, self.patch)
    }

    /// The release that follows this version: the core of a pre-release,
    /// otherwise the next patch.
    pub fn next_patch(&self) -> Self {
        if self.is_prerelease() {
            self.core()
        } else {
            Version::new(self.major, self.minor, self.patch + 1)
        }
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_prerelease() {
        let v = Version::parse("1.2.3-rc.4").unwrap();
        assert_eq!(v, Version::new(1, 2, 3).with_prerelease("rc", 4));
    }

    #[test]
    fn test_version_parse_discards_build_metadata() {
        let v = Version::parse("1.2.3+retag").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("v1.2.3").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("01.2.3").is_err());
        assert!(Version::parse("1.2.3-rc").is_err());
    }

    #[test]
    fn test_next_patch() {
        assert_eq!(Version::new(1, 0, 5).next_patch(), Version::new(1, 0, 6));
        let rc = Version::new(2, 0, 0).with_prerelease("rc", 1);
        assert_eq!(rc.next_patch(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_prerelease_sorts_before_release() {
        let pre = Version::new(1, 0, 0).with_prerelease("pre", 7);
        assert!(pre < Version::new(1, 0, 0));
        assert!(pre > Version::new(0, 9, 9));
    }

    #[test]
    fn test_core_ordering() {
        let mut versions = vec![
            Version::new(1, 10, 0),
            Version::new(1, 2, 0),
            Version::new(0, 99, 99),
            Version::new(1, 2, 0).with_prerelease("rc", 0),
        ];
        versions.sort();
        let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["0.99.99", "1.2.0-rc.0", "1.2.0", "1.10.0"]);
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(
            Version::new(1, 0, 0).with_prerelease("foo", 2).to_string(),
            "1.0.0-foo.2"
        );
    }
}
