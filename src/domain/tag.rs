use crate::domain::version::Version;
use crate::error::Result;
use crate::git::CommitId;

/// A git tag with its version, when the name carries one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub points_to: CommitId,
    pub parsed_version: Option<Version>,
}

impl Tag {
    /// A tag whose name parsed as a version
    pub fn new(name: impl Into<String>, points_to: CommitId, version: Version) -> Self {
        Tag {
            name: name.into(),
            points_to,
            parsed_version: Some(version),
        }
    }

    /// A tag whose name carries no usable version
    pub fn unversioned(name: impl Into<String>, points_to: CommitId) -> Self {
        Tag {
            name: name.into(),
            points_to,
            parsed_version: None,
        }
    }

    /// Build a tag from its name, parsing the version after the prefix
    pub fn from_name(name: impl Into<String>, points_to: CommitId, prefix: &TagPrefix) -> Self {
        let name = name.into();
        match prefix.parse(&name) {
            Some(version) => Tag::new(name, points_to, version),
            None => Tag::unversioned(name, points_to),
        }
    }
}

/// Tag naming prefix (e.g. "", "v", "release-")
#[derive(Debug, Clone, Copy)]
pub struct TagPrefix<'a> {
    prefix: &'a str,
}

impl<'a> TagPrefix<'a> {
    pub fn new(prefix: &'a str) -> Self {
        TagPrefix { prefix }
    }

    /// The part of a tag name after the prefix, `None` without the prefix
    pub fn strip<'t>(&self, tag: &'t str) -> Option<&'t str> {
        tag.strip_prefix(self.prefix)
    }

    /// Extract the version from a tag name
    /// Example: prefix="v", tag="v1.2.3" -> Some(1.2.3)
    pub fn parse(&self, tag: &str) -> Option<Version> {
        self.try_parse(tag).and_then(|parsed| parsed.ok())
    }

    /// Like [Self::parse], keeping the reason a prefixed tag was rejected
    ///
    /// # Returns
    /// * `None` - the tag does not carry the prefix
    /// * `Some(Err)` - prefixed, but the remainder is not a usable version
    pub fn try_parse(&self, tag: &str) -> Option<Result<Version>> {
        self.strip(tag).map(Version::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CommitId {
        CommitId::new(s)
    }

    #[test]
    fn test_tag_without_prefix() {
        let tag = Tag::from_name("1.2.3", id("c1"), &TagPrefix::new(""));
        assert_eq!(tag.parsed_version, Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_tag_with_prefix() {
        let tag = Tag::from_name("v1.2.3", id("c1"), &TagPrefix::new("v"));
        assert_eq!(tag.parsed_version, Some(Version::new(1, 2, 3)));
        assert_eq!(tag.points_to, id("c1"));
    }

    #[test]
    fn test_prefixed_tag_without_configured_prefix() {
        let tag = Tag::from_name("v1.2.3", id("c1"), &TagPrefix::new(""));
        assert_eq!(tag.parsed_version, None);
    }

    #[test]
    fn test_tag_missing_prefix() {
        let tag = Tag::from_name("1.2.3", id("c1"), &TagPrefix::new("release-"));
        assert_eq!(tag.parsed_version, None);
    }

    #[test]
    fn test_non_version_tag() {
        let tag = Tag::from_name("nightly", id("c1"), &TagPrefix::new(""));
        assert_eq!(tag, Tag::unversioned("nightly", id("c1")));
    }

    #[test]
    fn test_strip() {
        let prefix = TagPrefix::new("release-");
        assert_eq!(prefix.strip("release-1.2"), Some("1.2"));
        assert_eq!(prefix.strip("v1.2"), None);
        assert_eq!(TagPrefix::new("").strip("1.2"), Some("1.2"));
    }

    #[test]
    fn test_try_parse_keeps_reason() {
        let prefix = TagPrefix::new("v");
        assert!(prefix.try_parse("1.2.3").is_none());
        assert!(prefix.try_parse("v1.2").unwrap().is_err());
        assert_eq!(
            prefix.try_parse("v1.2.3").unwrap().unwrap(),
            Version::new(1, 2, 3)
        );
    }
}
