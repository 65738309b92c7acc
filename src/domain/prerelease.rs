//! Pre-release labels of the form `kind.index`
//!
//! Only the two-identifier shape is modelled: a kind (`pre`, `rc`, a feature
//! branch label, ...) followed by a numeric index.
//! According to semver.org: https://semver.org/#spec-item-11

use crate::error::{Result, VersionError};
use std::cmp::Ordering;
use std::fmt;

/// Structured pre-release label, e.g. `pre.3` or `foo.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreRelease {
    /// First identifier
    pub kind: String,
    /// Numeric second identifier
    pub index: u64,
}

impl PreRelease {
    pub fn new(kind: impl Into<String>, index: u64) -> Self {
        PreRelease {
            kind: kind.into(),
            index,
        }
    }

    /// Parse a pre-release label from a string
    ///
    /// Accepts exactly `kind.index` where `kind` is a non-empty run of
    /// `[0-9A-Za-z-]` and `index` is a decimal number without leading zeros.
    ///
    /// # Examples
    /// ```ignore
    /// let pr = PreRelease::parse("rc.2")?;
    /// assert_eq!(pr.kind, "rc");
    /// assert_eq!(pr.index, 2);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let (kind, index) = s
            .split_once('.')
            .ok_or_else(|| VersionError::parse(format!("'{}' is not of the form kind.index", s)))?;

        if !is_identifier(kind) {
            return Err(VersionError::parse(format!(
                "invalid pre-release kind '{}'",
                kind
            )));
        }

        if !is_numeric_identifier(index) {
            return Err(VersionError::parse(format!(
                "invalid pre-release index '{}'",
                index
            )));
        }

        let index = index.parse::<u64>().map_err(|_| {
            VersionError::parse(format!("pre-release index '{}' is out of range", index))
        })?;

        Ok(PreRelease::new(kind, index))
    }
}

/// A non-empty SemVer identifier made of `[0-9A-Za-z-]`
pub(crate) fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_numeric_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit())
        && (s == "0" || !s.starts_with('0'))
}

/// SemVer identifier precedence: numeric identifiers compare numerically and
/// sort before alphanumeric ones, which compare in ASCII order.
fn compare_identifiers(a: &str, b: &str) -> Ordering {
    let a_numeric = a.chars().all(|c| c.is_ascii_digit());
    let b_numeric = b.chars().all(|c| c.is_ascii_digit());

    match (a_numeric, b_numeric) {
        (true, true) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_identifiers(&self.kind, &other.kind).then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.index)
    }
}
