//! Main workflow orchestration logic
//!
//! Wires the components in their one-directional order: config and history
//! feed the branch classifier and the version engine, whose result feeds the
//! output record. Kept apart from `main.rs` so the workflow can be driven
//! programmatically and against in-memory repositories.

use std::path::PathBuf;

use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::config::{self, Config, ConfigSource};
use crate::domain::BranchContext;
use crate::engine::{ResolvedVersion, VersionEngine};
use crate::error::{Result, VersionError};
use crate::git::{CommitGraph, Git2Repository, Repository};
use crate::output::VersionOutput;

/// Arguments for the resolve workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveArgs {
    /// Repository path; discovered upward from here
    pub repo_path: PathBuf,

    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Branch name overriding the checked-out one
    pub branch: Option<String>,
}

impl Default for ResolveArgs {
    fn default() -> Self {
        ResolveArgs {
            repo_path: PathBuf::from("."),
            config_path: None,
            branch: None,
        }
    }
}

/// Result of a successful resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOutcome {
    pub config: Config,
    pub resolved: ResolvedVersion,
    pub output: VersionOutput,
    /// Config-level and engine-level warnings, in that order
    pub warnings: Vec<BoundaryWarning>,
}

/// Resolve the version of a repository on disk
///
/// Opens the repository and reads its history, then loads configuration
/// (explicit path, then files in the working directory, then the user config
/// directory). An empty history is reported before any config problem.
pub fn run_resolve(args: &ResolveArgs) -> Result<ResolveOutcome> {
    let repo = Git2Repository::open(&args.repo_path)?;
    let graph = repo.read_history()?;
    graph.require_head()?;

    let loaded = config::load_config(args.config_path.as_deref(), repo.workdir())?;

    let mut warnings = Vec::new();
    if let ConfigSource::Missing(path) = &loaded.source {
        warnings.push(BoundaryWarning::ConfigNotFound { path: path.clone() });
    }

    let mut outcome = resolve_graph(&repo, &graph, loaded.config, args.branch.as_deref())?;
    warnings.append(&mut outcome.warnings);
    outcome.warnings = warnings;
    Ok(outcome)
}

/// Resolve the version for any [Repository] with an already-loaded config
pub fn resolve_with<R: Repository>(
    repo: &R,
    config: Config,
    branch_override: Option<&str>,
) -> Result<ResolveOutcome> {
    let graph = repo.read_history()?;
    resolve_graph(repo, &graph, config, branch_override)
}

/// Resolve against a history snapshot already read from `repo`
///
/// Steps:
/// 1. Fail on an empty history
/// 2. Determine the branch (override, else HEAD's branch)
/// 3. Classify the branch
/// 4. Run the version engine and build the output record
pub fn resolve_graph<R: Repository>(
    repo: &R,
    graph: &CommitGraph,
    config: Config,
    branch_override: Option<&str>,
) -> Result<ResolveOutcome> {
    graph.require_head()?;

    let branch = match branch_override {
        Some(branch) => branch.to_string(),
        None => repo.current_branch()?.ok_or_else(|| {
            VersionError::repository(
                repo.location(),
                "HEAD is detached; pass the branch name with --branch",
            )
        })?,
    };
    debug!(%branch, "classifying branch");

    let context = BranchContext::classify(&branch, &config)?;
    let resolved = VersionEngine::new(&config).resolve(graph, context)?;
    let output = VersionOutput::from_resolved(&resolved, &config.version_prefix);
    let warnings = resolved.warnings.clone();

    Ok(ResolveOutcome {
        config,
        resolved,
        output,
        warnings,
    })
}
