//! Rendering of versions into strings

use crate::domain::Version;

/// Render `{prefix}{major}.{minor}.{patch}[-{kind}.{index}]`
///
/// # Example
/// ```
/// use git_semver::domain::Version;
/// use git_semver::output::formatter::format_version;
///
/// let v = Version::new(1, 0, 6).with_prerelease("foo", 0);
/// assert_eq!(format_version(&v, "v"), "v1.0.6-foo.0");
/// ```
pub fn format_version(version: &Version, version_prefix: &str) -> String {
    format!("{}{}", version_prefix, version)
}

/// The pre-release part alone, empty when absent
pub fn format_prerelease(version: &Version) -> String {
    version
        .prerelease
        .as_ref()
        .map(|pre| pre.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_release() {
        assert_eq!(format_version(&Version::new(1, 2, 3), ""), "1.2.3");
    }

    #[test]
    fn test_format_with_prefix() {
        assert_eq!(format_version(&Version::new(0, 10, 0), "v"), "v0.10.0");
    }

    #[test]
    fn test_format_prerelease() {
        let v = Version::new(1, 0, 0).with_prerelease("pre", 12);
        assert_eq!(format_version(&v, ""), "1.0.0-pre.12");
        assert_eq!(format_prerelease(&v), "pre.12");
        assert_eq!(format_prerelease(&Version::new(1, 0, 0)), "");
    }

    #[test]
    fn test_rendering_round_trips() {
        let versions = vec![
            Version::new(0, 0, 0),
            Version::new(10, 20, 30),
            Version::new(1, 0, 6).with_prerelease("foo", 1),
            Version::new(3, 1, 4).with_prerelease("9", 0),
        ];

        for v in versions {
            let rendered = format_version(&v, "release-");
            let stripped = rendered.strip_prefix("release-").unwrap();
            assert_eq!(Version::parse(stripped).unwrap(), v);
        }
    }
}
