use std::fmt;
use std::path::PathBuf;

/// Warnings that occur when resolving a version near repository boundaries.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// An explicit config path does not exist; defaults were used
    ConfigNotFound { path: PathBuf },
    /// No reachable tag carries a version; the initial version was used
    NoVersionTags { initial_version: String },
    /// Tag carries the configured prefix but the rest is not a usable version
    UnparsableTag { tag: String, reason: String },
    /// HEAD sits on a version tag while on a feature branch
    FeatureBranchOnTag { branch: String, tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::ConfigNotFound { path } => {
                write!(
                    f,
                    "Config file '{}' not found, using defaults",
                    path.display()
                )
            }
            BoundaryWarning::NoVersionTags { initial_version } => {
                write!(
                    f,
                    "No version tags reachable from HEAD, starting from initial version {}",
                    initial_version
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Ignoring tag '{}': {}", tag, reason)
            }
            BoundaryWarning::FeatureBranchOnTag { branch, tag } => {
                write!(
                    f,
                    "Branch '{}' has no commits past tag '{}', using the tagged version",
                    branch, tag
                )
            }
        }
    }
}
