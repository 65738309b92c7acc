use crate::error::{Result, VersionError};
use crate::git::{CommitId, TagRef};
use std::collections::{HashMap, VecDeque};
use tracing::trace;

/// Immutable snapshot of the history reachable from HEAD
///
/// Built once per invocation by a [crate::git::Repository] and never mutated.
/// Distances are measured along the shortest parent path, so a commit merged
/// in through a second parent is as close as its shortest route to HEAD.
#[derive(Debug, Clone)]
pub struct CommitGraph {
    origin: String,
    head: Option<CommitId>,
    parents: HashMap<CommitId, Vec<CommitId>>,
    tags: Vec<TagRef>,
    shallow: bool,
}

impl CommitGraph {
    /// A history with no commits (unborn HEAD)
    pub fn empty(origin: impl Into<String>) -> Self {
        CommitGraph {
            origin: origin.into(),
            head: None,
            parents: HashMap::new(),
            tags: Vec::new(),
            shallow: false,
        }
    }

    /// Assemble a graph from commits with ordered parent lists
    ///
    /// Parents that are not themselves listed (the boundary of a shallow
    /// clone) are treated as absent.
    pub fn new(
        origin: impl Into<String>,
        head: CommitId,
        commits: impl IntoIterator<Item = (CommitId, Vec<CommitId>)>,
        tags: Vec<TagRef>,
        shallow: bool,
    ) -> Self {
        let mut parents: HashMap<CommitId, Vec<CommitId>> = commits.into_iter().collect();
        parents.entry(head.clone()).or_default();

        CommitGraph {
            origin: origin.into(),
            head: Some(head),
            parents,
            tags,
            shallow,
        }
    }

    /// Repository path or label for diagnostics
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn head(&self) -> Option<&CommitId> {
        self.head.as_ref()
    }

    /// HEAD, or [VersionError::EmptyHistory] when there are no commits
    pub fn require_head(&self) -> Result<&CommitId> {
        self.head
            .as_ref()
            .ok_or_else(|| VersionError::empty_history(&self.origin))
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Whether the history was truncated by a shallow clone
    pub fn is_shallow(&self) -> bool {
        self.shallow
    }

    /// Number of commits held in the snapshot
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn parents(&self, id: &CommitId) -> &[CommitId] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All tag references read from the repository
    pub fn tags(&self) -> &[TagRef] {
        &self.tags
    }

    /// Shortest distance from HEAD to every reachable commit
    ///
    /// A single breadth-first traversal over parent edges; HEAD is at
    /// distance 0, its parents at 1, and so on.
    pub fn distances_from_head(&self) -> HashMap<&CommitId, usize> {
        let mut distances = HashMap::with_capacity(self.parents.len());
        let Some(head) = self.head.as_ref() else {
            return distances;
        };

        let mut queue = VecDeque::new();
        distances.insert(head, 0);
        queue.push_back((head, 0usize));

        while let Some((id, distance)) = queue.pop_front() {
            for parent in self.parents(id) {
                let Some((known, _)) = self.parents.get_key_value(parent) else {
                    continue;
                };
                if !distances.contains_key(known) {
                    distances.insert(known, distance + 1);
                    queue.push_back((known, distance + 1));
                }
            }
        }

        trace!(reachable = distances.len(), "walked history from HEAD");
        distances
    }

    /// Commits strictly after `ancestor` up to and including HEAD
    ///
    /// # Returns
    /// * `Some(count)` - `ancestor` is reachable from HEAD
    /// * `None` - `ancestor` is not an ancestor of HEAD
    pub fn commits_between(&self, ancestor: &CommitId) -> Option<usize> {
        self.distances_from_head().get(ancestor).copied()
    }

    /// Tags whose target is reachable from HEAD, with their distance
    ///
    /// Sorted by distance, then by name.
    pub fn reachable_tags(&self) -> Vec<(&TagRef, usize)> {
        let distances = self.distances_from_head();
        self.reachable_tags_with(&distances)
    }

    /// [Self::reachable_tags] against a precomputed distance map
    pub fn reachable_tags_with(
        &self,
        distances: &HashMap<&CommitId, usize>,
    ) -> Vec<(&TagRef, usize)> {
        let mut reachable: Vec<(&TagRef, usize)> = self
            .tags
            .iter()
            .filter_map(|tag| distances.get(&tag.target).map(|&d| (tag, d)))
            .collect();
        reachable.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.name.cmp(&b.name)));
        reachable
    }

    /// Number of commits reachable from HEAD, HEAD included
    pub fn reachable_count(&self) -> usize {
        self.distances_from_head().len()
    }
}
