use crate::error::{Result, VersionError};
use crate::git::{CommitGraph, CommitId, TagRef};
use git2::{ErrorCode, ObjectType, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    path: PathBuf,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            VersionError::repository(path, format!("not a git repository: {}", e.message()))
        })?;

        let path = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();
        debug!(path = %path.display(), "opened repository");

        Ok(Git2Repository { repo, path })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        let path = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();
        Git2Repository { repo, path }
    }

    /// Attach the repository path to a git failure
    fn error(&self, what: &str, e: git2::Error) -> VersionError {
        VersionError::repository(&self.path, format!("{}: {}", what, e.message()))
    }

    /// The working directory, where project config files live
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn read_tags(&self) -> Result<Vec<TagRef>> {
        let names = self
            .repo
            .tag_names(None)
            .map_err(|e| self.error("cannot list tags", e))?;
        let mut tags = Vec::with_capacity(names.len());

        for name in names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(e) => {
                    debug!(tag = name, error = %e, "cannot resolve tag, skipping");
                    continue;
                }
            };

            // Annotated tags peel through the tag object; tags of trees or
            // blobs have no commit and take no part in versioning.
            match reference.peel(ObjectType::Commit) {
                Ok(object) => tags.push(TagRef {
                    name: name.to_string(),
                    target: object.id().into(),
                }),
                Err(e) => trace!(tag = name, error = %e, "tag does not point at a commit"),
            }
        }

        Ok(tags)
    }
}

impl super::Repository for Git2Repository {
    fn read_history(&self) -> Result<CommitGraph> {
        let origin = self.location();

        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                debug!("HEAD is unborn, history is empty");
                return Ok(CommitGraph::empty(origin));
            }
            Err(e) => return Err(self.error("cannot read HEAD", e)),
        };

        let head_oid = head
            .peel_to_commit()
            .map_err(|e| self.error("HEAD is not a commit", e))?
            .id();

        let mut revwalk = self
            .repo
            .revwalk()
            .map_err(|e| self.error("cannot walk history", e))?;
        revwalk
            .push(head_oid)
            .map_err(|e| self.error("cannot walk history from HEAD", e))?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(|e| self.error("history is unreadable", e))?;
            let commit = self
                .repo
                .find_commit(oid)
                .map_err(|e| self.error(&format!("cannot read commit {}", oid), e))?;
            let parents: Vec<CommitId> = commit.parent_ids().map(CommitId::from).collect();
            commits.push((CommitId::from(oid), parents));
        }

        let tags = self.read_tags()?;
        let shallow = self.repo.is_shallow();
        debug!(
            commits = commits.len(),
            tags = tags.len(),
            shallow,
            "read repository history"
        );

        Ok(CommitGraph::new(
            origin,
            CommitId::from(head_oid),
            commits,
            tags,
            shallow,
        ))
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let head = self
            .repo
            .head()
            .map_err(|e| VersionError::repository(&self.path, e.message()))?;

        if head.is_branch() {
            Ok(head.shorthand().map(str::to_string))
        } else {
            debug!("HEAD is detached");
            Ok(None)
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
