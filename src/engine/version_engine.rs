use crate::boundary::BoundaryWarning;
use crate::config::{Config, MainBranchBehavior};
use crate::domain::{sanitize_label, BranchContext, Tag, TagPrefix, Version};
use crate::error::{Result, VersionError};
use crate::git::CommitGraph;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Pre-release kind used on main branches in `pre` mode
pub const MAIN_PRERELEASE_KIND: &str = "pre";

/// Outcome of version resolution for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVersion {
    /// Version of the selected tag, or the initial version without one
    pub base: Version,
    /// Name of the selected tag
    pub base_tag: Option<String>,
    /// Commits after the base tag up to HEAD; the whole history without a tag
    pub commits_since_tag: usize,
    pub context: BranchContext,
    /// The concrete version after applying the branch rules
    pub version: Version,
    pub warnings: Vec<BoundaryWarning>,
}

/// Best version tag seen so far during base discovery
struct Candidate {
    tag: Tag,
    version: Version,
    distance: usize,
}

impl Candidate {
    /// Greater version wins, then the closer tag, then the smaller name
    fn beats(&self, other: &Candidate) -> bool {
        self.version
            .cmp(&other.version)
            .then_with(|| other.distance.cmp(&self.distance))
            .then_with(|| other.tag.name.cmp(&self.tag.name))
            == Ordering::Greater
    }
}

/// Derives a version from a history snapshot and a branch context
pub struct VersionEngine<'a> {
    config: &'a Config,
}

impl<'a> VersionEngine<'a> {
    /// Create a new version engine
    pub fn new(config: &'a Config) -> Self {
        VersionEngine { config }
    }

    /// Resolve the version for HEAD
    ///
    /// # Errors
    /// * [VersionError::EmptyHistory] - the graph has no commits
    /// * [VersionError::Repository] - the clone is shallow and no version tag
    ///   is reachable within its depth
    /// * [VersionError::BranchName] - a feature context whose name cannot be
    ///   turned into a label
    pub fn resolve(
        &self,
        graph: &CommitGraph,
        context: BranchContext,
    ) -> Result<ResolvedVersion> {
        let head = graph.require_head()?;
        let distances = graph.distances_from_head();
        let prefix = TagPrefix::new(&self.config.tag_prefix);
        let mut warnings = Vec::new();

        let reachable = graph.reachable_tags_with(&distances);
        trace!(total = graph.tags().len(), reachable = reachable.len(), "scanning tags");

        let mut best: Option<Candidate> = None;
        for (tag_ref, distance) in reachable {
            let tag = Tag::from_name(tag_ref.name.as_str(), tag_ref.target.clone(), &prefix);
            let Some(version) = tag.parsed_version.clone() else {
                if let Some(warning) = rejected_tag_warning(&prefix, &tag.name) {
                    warnings.push(warning);
                }
                trace!(tag = %tag.name, "tag is not a version");
                continue;
            };

            let candidate = Candidate {
                tag,
                version,
                distance,
            };

            if best.as_ref().map_or(true, |current| candidate.beats(current)) {
                best = Some(candidate);
            }
        }

        if best.is_none() && graph.is_shallow() {
            return Err(VersionError::repository(
                graph.origin(),
                "history is shallow and no version tag is reachable within it; \
                 fetch the full history (git fetch --unshallow --tags)",
            ));
        }

        let (base, base_tag, commits_since_tag) = match best {
            Some(candidate) => {
                debug!(
                    tag = %candidate.tag.name,
                    commit = candidate.tag.points_to.short(),
                    distance = candidate.distance,
                    "selected base tag"
                );
                (candidate.version, Some(candidate.tag.name), candidate.distance)
            }
            None => {
                let initial = self.config.initial_version.clone();
                warnings.push(BoundaryWarning::NoVersionTags {
                    initial_version: initial.to_string(),
                });
                (initial, None, distances.len())
            }
        };

        if let (false, Some(tag), 0) = (context.is_main, &base_tag, commits_since_tag) {
            warnings.push(BoundaryWarning::FeatureBranchOnTag {
                branch: context.name.clone(),
                tag: tag.clone(),
            });
        }

        let tagged = base_tag.is_some();
        let version = self.apply_branch_mode(&base, tagged, commits_since_tag, &context)?;
        debug!(
            head = head.short(),
            branch = %context.name,
            %base,
            commits_since_tag,
            %version,
            "resolved version"
        );

        Ok(ResolvedVersion {
            base,
            base_tag,
            commits_since_tag,
            context,
            version,
            warnings,
        })
    }

    /// Apply the branch rules to a base version
    ///
    /// Feature branches always target the release after the base. On main
    /// branches without a tag the root commit stands for the initial version,
    /// so there the initial version is itself the next version.
    pub fn apply_branch_mode(
        &self,
        base: &Version,
        tagged: bool,
        commits: usize,
        context: &BranchContext,
    ) -> Result<Version> {
        // A tag always finalizes the version it names.
        if tagged && commits == 0 {
            return Ok(base.clone());
        }

        let index = commits.saturating_sub(1) as u64;

        if !context.is_main {
            let label = match &context.feature_label {
                Some(label) => label.clone(),
                None => sanitize_label(&context.name)?,
            };
            return Ok(base.next_patch().with_prerelease(label, index));
        }

        let next = if tagged { base.next_patch() } else { base.clone() };

        let version = match self.config.main_branch_behavior {
            MainBranchBehavior::Release if tagged || commits <= 1 => next,
            MainBranchBehavior::Release => next.next_patch(),
            MainBranchBehavior::Pre => next.with_prerelease(MAIN_PRERELEASE_KIND, index),
        };
        Ok(version)
    }
}

/// Warning for a prefixed tag that is probably meant as a version
/// (`1.2`, `2.0.0-rc`) but does not parse as one
fn rejected_tag_warning(prefix: &TagPrefix, name: &str) -> Option<BoundaryWarning> {
    let rest = prefix.strip(name)?;
    if !looks_like_version(rest) {
        return None;
    }
    match prefix.try_parse(name)? {
        Ok(_) => None,
        Err(e) => Some(BoundaryWarning::UnparsableTag {
            tag: name.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn looks_like_version(rest: &str) -> bool {
    rest.starts_with(|c: char| c.is_ascii_digit())
}
