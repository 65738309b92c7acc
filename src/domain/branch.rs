use crate::config::Config;
use crate::error::{Result, VersionError};

/// Longest feature label emitted, in characters
pub const MAX_LABEL_LEN: usize = 40;

/// Represents the current branch with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_main: bool,
    /// Pre-release kind for feature branches, `None` on main branches
    pub feature_label: Option<String>,
}

impl BranchContext {
    /// Classify a branch against the configured main branches
    ///
    /// Main branches are matched exactly (case-sensitive) after stripping a
    /// leading `refs/heads/`. Any other branch is a feature branch and must
    /// sanitize to a usable pre-release label.
    pub fn classify(name: &str, config: &Config) -> Result<Self> {
        let name = name.strip_prefix("refs/heads/").unwrap_or(name);

        if name.is_empty() {
            return Err(VersionError::branch_name(name, "branch name is empty"));
        }

        if config.main_branches.iter().any(|main| main == name) {
            return Ok(BranchContext {
                name: name.to_string(),
                is_main: true,
                feature_label: None,
            });
        }

        Ok(BranchContext {
            name: name.to_string(),
            is_main: false,
            feature_label: Some(sanitize_label(name)?),
        })
    }
}

/// Turn a branch name into a legal SemVer pre-release identifier
///
/// - the leading category segment is dropped (`feature/foo` -> `foo`)
/// - remaining path segments are joined with `-`
/// - ASCII letters are lowercased; anything outside `[a-z0-9-]` becomes `-`
/// - repeated `-` collapse, edges are trimmed, length is capped at
///   [`MAX_LABEL_LEN`]
/// - an all-digit label gets a `branch-` prefix
pub fn sanitize_label(name: &str) -> Result<String> {
    let segments: Vec<&str> = name.split('/').filter(|s| !s.is_empty()).collect();
    let segments = if segments.len() > 1 {
        &segments[1..]
    } else {
        &segments[..]
    };
    let joined = segments.join("-");

    let mut label = String::with_capacity(joined.len());
    for c in joined.chars() {
        let mapped = match c {
            'a'..='z' | '0'..='9' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '-',
        };
        if mapped == '-' && (label.is_empty() || label.ends_with('-')) {
            continue;
        }
        label.push(mapped);
    }

    let mut label: String = label.trim_end_matches('-').chars().take(MAX_LABEL_LEN).collect();
    while label.ends_with('-') {
        label.pop();
    }

    if label.is_empty() {
        return Err(VersionError::branch_name(
            name,
            "contains no characters usable in a pre-release identifier",
        ));
    }

    if label.chars().all(|c| c.is_ascii_digit()) {
        label = format!("branch-{}", label);
    }

    Ok(label)
}
