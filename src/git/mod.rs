//! History reading abstraction layer
//!
//! This module provides a trait-based abstraction over the parts of a git
//! repository that version resolution reads, allowing for multiple
//! implementations including real git repositories and in-memory histories
//! for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. Implementations read
//! the whole reachable history once and hand back an immutable
//! [CommitGraph]; every later query runs against that snapshot.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use git_semver::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let graph = repo.read_history()?;
//! for (tag, distance) in graph.reachable_tags() {
//!     println!("{} is {} commits behind HEAD", tag.name, distance);
//! }
//! # Ok(())
//! # }
//! ```

pub mod graph;
pub mod mock;
pub mod repository;

pub use graph::CommitGraph;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::fmt;

/// Opaque commit identifier (the full hash for real repositories)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        CommitId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for diagnostics
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(7) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<git2::Oid> for CommitId {
    fn from(oid: git2::Oid) -> Self {
        CommitId(oid.to_string())
    }
}

/// A tag name and the commit it peels to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub target: CommitId,
}

/// Read access to a repository's history
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to
/// [crate::error::VersionError::Repository] or let them convert through
/// [crate::error::VersionError::Git].
pub trait Repository {
    /// Read every commit reachable from HEAD and every tag, in one pass
    ///
    /// An unborn HEAD (no commits yet) yields an empty graph rather than an
    /// error, so callers can report it as an empty history.
    fn read_history(&self) -> Result<CommitGraph>;

    /// The checked-out branch name
    ///
    /// # Returns
    /// * `Ok(Some(name))` - HEAD points at a branch
    /// * `Ok(None)` - HEAD is detached
    fn current_branch(&self) -> Result<Option<String>>;

    /// Path (or label) used in diagnostics
    fn location(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_id_short() {
        let id = CommitId::new("0123456789abcdef");
        assert_eq!(id.short(), "0123456");
        assert_eq!(CommitId::new("c1").short(), "c1");
    }

    #[test]
    fn test_commit_id_from_oid() {
        let oid = git2::Oid::from_bytes(&[0xab; 20]).unwrap();
        let id = CommitId::from(oid);
        assert_eq!(id.as_str(), "ab".repeat(20));
    }
}
