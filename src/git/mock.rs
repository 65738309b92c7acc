use crate::error::Result;
use crate::git::{CommitGraph, CommitId, Repository, TagRef};

/// In-memory repository for testing without actual git operations
///
/// Commits are named by the caller and must be added parents-first. Adding a
/// commit moves HEAD onto it, the way `git commit` does.
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    commits: Vec<(CommitId, Vec<CommitId>)>,
    tags: Vec<TagRef>,
    head: Option<CommitId>,
    branch: Option<String>,
    shallow: bool,
}

impl MockRepository {
    /// Create a new empty mock repository on branch `main`
    pub fn new() -> Self {
        MockRepository {
            branch: Some("main".to_string()),
            ..Default::default()
        }
    }

    /// Add a commit and move HEAD onto it
    pub fn commit(&mut self, id: &str, parents: &[&str]) -> &mut Self {
        let parents = parents.iter().map(|p| CommitId::new(*p)).collect();
        self.commits.push((CommitId::new(id), parents));
        self.head = Some(CommitId::new(id));
        self
    }

    /// Add `count` commits in a line on top of HEAD, named `{prefix}1..`
    pub fn linear(&mut self, prefix: &str, count: usize) -> &mut Self {
        for n in 1..=count {
            let id = format!("{}{}", prefix, n);
            let parent = self.head.clone();
            let parents: Vec<&str> = parent.iter().map(CommitId::as_str).collect();
            self.commit(&id, &parents);
        }
        self
    }

    /// Add a tag pointing to a commit
    pub fn tag(&mut self, name: &str, target: &str) -> &mut Self {
        self.tags.push(TagRef {
            name: name.to_string(),
            target: CommitId::new(target),
        });
        self
    }

    /// Tag the current HEAD
    pub fn tag_head(&mut self, name: &str) -> &mut Self {
        if let Some(head) = self.head.clone() {
            self.tag(name, head.as_str());
        }
        self
    }

    /// Move HEAD to an existing commit
    pub fn checkout(&mut self, id: &str) -> &mut Self {
        self.head = Some(CommitId::new(id));
        self
    }

    /// Set the branch name; `None` means detached HEAD
    pub fn set_branch(&mut self, branch: Option<&str>) -> &mut Self {
        self.branch = branch.map(str::to_string);
        self
    }

    pub fn set_shallow(&mut self, shallow: bool) -> &mut Self {
        self.shallow = shallow;
        self
    }

    pub fn head(&self) -> Option<&CommitId> {
        self.head.as_ref()
    }
}

impl Repository for MockRepository {
    fn read_history(&self) -> Result<CommitGraph> {
        match &self.head {
            None => Ok(CommitGraph::empty(self.location())),
            Some(head) => Ok(CommitGraph::new(
                self.location(),
                head.clone(),
                self.commits.iter().cloned(),
                self.tags.clone(),
                self.shallow,
            )),
        }
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
