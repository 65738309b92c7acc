use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::debug;

use git_semver::cli::{run_resolve, ResolveArgs};
use git_semver::logging;
use git_semver::output::{OutputFormat, VersionOutput};
use git_semver::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-semver",
    version,
    about = "Compute a semantic version from git history, tags and branch"
)]
struct Args {
    #[arg(short = 'C', long = "repo", default_value = ".", help = "Repository path")]
    repo: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        short,
        long,
        env = "GIT_SEMVER_BRANCH",
        help = "Branch name to version (defaults to the checked-out branch)"
    )]
    branch: Option<String>,

    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        value_name = "BOOL",
        help = "Exit non-zero when no version can be resolved; when false, emit 0.0.0 instead"
    )]
    fail_on_error: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Kv, help = "Output format")]
    format: OutputFormat,

    #[arg(short, long, action = ArgAction::Count, help = "More logging (-v debug, -vv trace)")]
    verbose: u8,

    #[arg(short, long, help = "Only log errors")]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(logging::env_filter(args.quiet, args.verbose));

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let resolve_args = ResolveArgs {
        repo_path: args.repo.clone(),
        config_path: args.config.clone(),
        branch: args.branch.clone(),
    };
    debug!(?resolve_args, fail_on_error = args.fail_on_error, "starting");

    let stdout = io::stdout().lock();
    match run_resolve(&resolve_args) {
        Ok(outcome) => {
            for warning in &outcome.warnings {
                ui::display_boundary_warning(warning);
            }
            outcome
                .output
                .write_to(stdout, args.format)
                .context("failed to write version output")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if args.fail_on_error => {
            debug!(kind = %err.kind(), "version resolution failed");
            ui::display_failure(&err);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            ui::display_suppressed_failure(&err);
            VersionOutput::sentinel()
                .write_to(stdout, args.format)
                .context("failed to write fallback output")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
