use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for version resolution
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Repository error at '{}': {message}", path.display())]
    Repository { path: PathBuf, message: String },

    #[error("Configuration error in field '{field}': {message}")]
    Config { field: String, message: String },

    #[error("Configuration error in '{}': {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("Invalid branch name '{name}': {reason}")]
    BranchName { name: String, reason: String },

    #[error("Repository '{path}' has no commits; there is no version to assign")]
    EmptyHistory { path: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),
}

/// Convenience type alias for Results in git-semver
pub type Result<T> = std::result::Result<T, VersionError>;

/// The component category an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Repository,
    Config,
    BranchName,
    EmptyHistory,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Repository => "repository",
            ErrorKind::Config => "config",
            ErrorKind::BranchName => "branch",
            ErrorKind::EmptyHistory => "empty-history",
        };
        f.write_str(label)
    }
}

impl VersionError {
    /// Create a repository error with context
    pub fn repository(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        VersionError::Repository {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a configuration error naming the offending field
    pub fn config(field: impl Into<String>, msg: impl Into<String>) -> Self {
        VersionError::Config {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a branch name error with context
    pub fn branch_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        VersionError::BranchName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a version parsing error
    pub fn parse(msg: impl Into<String>) -> Self {
        VersionError::Parse(msg.into())
    }

    pub fn empty_history(path: impl Into<String>) -> Self {
        VersionError::EmptyHistory { path: path.into() }
    }

    /// Which component the failure is attributed to
    pub fn kind(&self) -> ErrorKind {
        match self {
            VersionError::Repository { .. } | VersionError::Git(_) => ErrorKind::Repository,
            VersionError::Config { .. }
            | VersionError::ConfigParse { .. }
            | VersionError::Parse(_) => ErrorKind::Config,
            VersionError::BranchName { .. } => ErrorKind::BranchName,
            VersionError::EmptyHistory { .. } => ErrorKind::EmptyHistory,
        }
    }
}
