use crate::domain::Version;
use crate::error::{Result, VersionError};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// File names looked up in the repository working directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &[".git-semver.toml", ".git-semver.yml", ".git-semver.yaml"];

/// How commits past the latest tag on a main branch are versioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainBranchBehavior {
    /// Every commit is a release: the next patch, no pre-release
    #[default]
    Release,
    /// Commits are pre-releases of the next patch until tagged
    Pre,
}

impl FromStr for MainBranchBehavior {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "release" => Ok(MainBranchBehavior::Release),
            "pre" => Ok(MainBranchBehavior::Pre),
            _ => Err(VersionError::config(
                "mainBranchBehavior",
                format!("'{}' is not one of: release, pre", s),
            )),
        }
    }
}

impl fmt::Display for MainBranchBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainBranchBehavior::Release => f.write_str("release"),
            MainBranchBehavior::Pre => f.write_str("pre"),
        }
    }
}

/// Validated versioning policy.
///
/// Immutable once loaded and passed explicitly to every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub main_branches: Vec<String>,
    pub main_branch_behavior: MainBranchBehavior,
    pub tag_prefix: String,
    pub version_prefix: String,
    pub initial_version: Version,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            main_branches: vec!["main".to_string(), "master".to_string()],
            main_branch_behavior: MainBranchBehavior::Release,
            tag_prefix: String::new(),
            version_prefix: String::new(),
            initial_version: Version::new(1, 0, 0),
        }
    }
}

/// The configuration document as written, before validation.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default, alias = "main_branches")]
    main_branches: Option<Vec<String>>,

    #[serde(default, alias = "main_branch_behavior")]
    main_branch_behavior: Option<String>,

    #[serde(default, alias = "tag_prefix")]
    tag_prefix: Option<String>,

    #[serde(default, alias = "version_prefix")]
    version_prefix: Option<String>,

    #[serde(default, alias = "initial_version")]
    initial_version: Option<String>,
}

impl RawConfig {
    fn validate(self) -> Result<Config> {
        let defaults = Config::default();

        let main_branches = match self.main_branches {
            Some(branches) => {
                for branch in &branches {
                    if branch.is_empty() {
                        return Err(VersionError::config(
                            "mainBranches",
                            "branch names must not be empty",
                        ));
                    }
                    if branch.chars().any(char::is_whitespace) {
                        return Err(VersionError::config(
                            "mainBranches",
                            format!("branch name '{}' contains whitespace", branch),
                        ));
                    }
                }
                branches
            }
            None => defaults.main_branches,
        };

        let main_branch_behavior = match self.main_branch_behavior {
            Some(value) => value.parse()?,
            None => defaults.main_branch_behavior,
        };

        let tag_prefix = validate_prefix("tagPrefix", self.tag_prefix)?;
        let version_prefix = validate_prefix("versionPrefix", self.version_prefix)?;

        let initial_version = match self.initial_version {
            Some(value) => {
                let version = Version::parse(&value)
                    .map_err(|e| VersionError::config("initialVersion", e.to_string()))?;
                if version.is_prerelease() {
                    return Err(VersionError::config(
                        "initialVersion",
                        format!("'{}' must not carry a pre-release", value),
                    ));
                }
                version
            }
            None => defaults.initial_version,
        };

        Ok(Config {
            main_branches,
            main_branch_behavior,
            tag_prefix,
            version_prefix,
            initial_version,
        })
    }
}

fn validate_prefix(field: &str, value: Option<String>) -> Result<String> {
    let value = value.unwrap_or_default();
    if value.chars().any(char::is_whitespace) {
        return Err(VersionError::config(
            field,
            format!("'{}' must not contain whitespace", value),
        ));
    }
    Ok(value)
}

/// Document syntax, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.yml`/`.yaml` are YAML, everything else is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// An explicit path was given but no file exists there
    Missing(PathBuf),
    Defaults,
}

/// A validated configuration together with its origin
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

impl Config {
    /// Parse and validate a configuration document
    pub fn parse(contents: &str, format: ConfigFormat, path: &Path) -> Result<Config> {
        let parse_error = |message: String| VersionError::ConfigParse {
            path: path.to_path_buf(),
            message,
        };

        let raw: RawConfig = if contents.trim().is_empty() {
            RawConfig::default()
        } else {
            match format {
                ConfigFormat::Toml => {
                    toml::from_str(contents).map_err(|e| parse_error(e.to_string()))?
                }
                ConfigFormat::Yaml => {
                    serde_saphyr::from_str(contents).map_err(|e| parse_error(e.to_string()))?
                }
            }
        };

        raw.validate()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.git-semver.toml`, `.git-semver.yml`, `.git-semver.yaml` in `search_root`
/// 3. `git-semver/config.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// A custom path that does not exist falls back to defaults and is reported
/// through [`ConfigSource::Missing`].
///
/// # Returns
/// * `Ok(LoadedConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&Path>, search_root: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = config_path {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(LoadedConfig {
                config: Config::default(),
                source: ConfigSource::Missing(path.to_path_buf()),
            });
        }
        return load_file(path);
    }

    let discovered = search_root
        .into_iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .chain(dirs::config_dir().map(|dir| dir.join("git-semver").join("config.toml")))
        .find(|candidate| candidate.is_file());

    match discovered {
        Some(path) => load_file(&path),
        None => {
            debug!("no config file found, using defaults");
            Ok(LoadedConfig {
                config: Config::default(),
                source: ConfigSource::Defaults,
            })
        }
    }
}

fn load_file(path: &Path) -> Result<LoadedConfig> {
    let contents = fs::read_to_string(path).map_err(|e| VersionError::ConfigParse {
        path: path.to_path_buf(),
        message: format!("cannot read file: {}", e),
    })?;

    let config = Config::parse(&contents, ConfigFormat::from_path(path), path)?;
    debug!(path = %path.display(), ?config, "loaded config");

    Ok(LoadedConfig {
        config,
        source: ConfigSource::File(path.to_path_buf()),
    })
}
