//! Output record surfaced to the calling environment.
//!
//! The record is written to stdout only; diagnostics go to stderr so a
//! consumer can `source` or parse stdout directly.

pub mod formatter;

use crate::engine::ResolvedVersion;
use serde::Serialize;
use std::io::{self, Write};

pub use formatter::{format_prerelease, format_version};

/// Serialization of the output record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `key=value` lines
    #[default]
    Kv,
    /// A single JSON object
    Json,
}

/// Named outputs of one resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VersionOutput {
    pub version: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: String,
    pub is_prerelease: bool,
    pub branch: String,
    pub commits_since_tag: usize,
    pub base_tag: String,
}

impl VersionOutput {
    pub fn from_resolved(resolved: &ResolvedVersion, version_prefix: &str) -> Self {
        let version = &resolved.version;
        VersionOutput {
            version: format_version(version, version_prefix),
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            prerelease: format_prerelease(version),
            is_prerelease: version.is_prerelease(),
            branch: resolved.context.name.clone(),
            commits_since_tag: resolved.commits_since_tag,
            base_tag: resolved.base_tag.clone().unwrap_or_default(),
        }
    }

    /// Fallback record emitted when resolution failed and failing is disabled
    pub fn sentinel() -> Self {
        VersionOutput {
            version: "0.0.0".to_string(),
            major: 0,
            minor: 0,
            patch: 0,
            prerelease: String::new(),
            is_prerelease: false,
            branch: String::new(),
            commits_since_tag: 0,
            base_tag: String::new(),
        }
    }

    /// Ordered `(key, value)` pairs as they appear in `kv` output
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("version", self.version.clone()),
            ("major", self.major.to_string()),
            ("minor", self.minor.to_string()),
            ("patch", self.patch.to_string()),
            ("prerelease", self.prerelease.clone()),
            ("is-prerelease", self.is_prerelease.to_string()),
            ("branch", self.branch.clone()),
            ("commits-since-tag", self.commits_since_tag.to_string()),
            ("base-tag", self.base_tag.clone()),
        ]
    }

    /// Write the record in the requested format
    pub fn write_to<W: Write>(&self, mut writer: W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Kv => {
                for (key, value) in self.pairs() {
                    writeln!(writer, "{}={}", key, value)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, self)?;
                writeln!(writer)?;
            }
        }
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::{BranchContext, Version};

    fn resolved(version: Version, tag: Option<&str>, commits: usize) -> ResolvedVersion {
        ResolvedVersion {
            base: Version::new(1, 0, 5),
            base_tag: tag.map(str::to_string),
            commits_since_tag: commits,
            context: BranchContext::classify("feature/foo", &Config::default()).unwrap(),
            version,
            warnings: Vec::new(),
        }
    }

    fn render(output: &VersionOutput, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        output.write_to(&mut buf, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_kv_output() {
        let r = resolved(
            Version::new(1, 0, 6).with_prerelease("foo", 1),
            Some("v1.0.5"),
            2,
        );
        let output = VersionOutput::from_resolved(&r, "v");
        let text = render(&output, OutputFormat::Kv);

        assert_eq!(
            text,
            "version=v1.0.6-foo.1\n\
             major=1\n\
             minor=0\n\
             patch=6\n\
             prerelease=foo.1\n\
             is-prerelease=true\n\
             branch=feature/foo\n\
             commits-since-tag=2\n\
             base-tag=v1.0.5\n"
        );
    }

    #[test]
    fn test_json_output() {
        let r = resolved(Version::new(2, 0, 1), None, 3);
        let output = VersionOutput::from_resolved(&r, "");
        let value: serde_json::Value =
            serde_json::from_str(&render(&output, OutputFormat::Json)).unwrap();

        assert_eq!(value["version"], "2.0.1");
        assert_eq!(value["major"], 2);
        assert_eq!(value["prerelease"], "");
        assert_eq!(value["is-prerelease"], false);
        assert_eq!(value["base-tag"], "");
        assert_eq!(value["commits-since-tag"], 3);
    }

    #[test]
    fn test_sentinel() {
        let output = VersionOutput::sentinel();
        assert_eq!(output.version, "0.0.0");
        assert!(!output.is_prerelease);
        assert!(render(&output, OutputFormat::Kv).starts_with("version=0.0.0\n"));
    }
}
