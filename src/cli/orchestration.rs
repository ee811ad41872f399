//! Main workflow orchestration logic
//!
//! Turns CLI-level arguments plus configuration into a wired-up
//! [ReleaseHandler] and runs the requested operation. Kept apart from
//! main.rs so the workflow can be driven programmatically without clap.

use anyhow::{Context, Result};
use log::info;

use crate::assets::AssetCollector;
use crate::changelog::ChangelogLoader;
use crate::config::Config;
use crate::domain::TagMessageTemplate;
use crate::git;
use crate::github::{GitHubToken, GithubRepository, ReleaseRepository, RepositorySlug};
use crate::release::{CreateOutcome, DeleteOutcome, ReleaseHandler, ReleaseOptions};

/// Operation requested on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseCommand {
    Create {
        tag: String,
        commit: Option<String>,
        dry_run: bool,
    },
    Delete {
        tag: String,
    },
}

impl ReleaseCommand {
    pub fn tag(&self) -> &str {
        match self {
            ReleaseCommand::Create { tag, .. } | ReleaseCommand::Delete { tag } => tag,
        }
    }
}

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Explicit OWNER/NAME, overriding configuration and git remote
    pub repo: Option<String>,
    pub command: ReleaseCommand,
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    Created(CreateOutcome),
    Deleted(DeleteOutcome),
}

/// Pick the repository to operate on
///
/// Order: explicit `OWNER/NAME`, then `[repository]` in the config, then
/// the configured remote of the local checkout.
pub fn resolve_slug(explicit: Option<&str>, config: &Config) -> Result<RepositorySlug> {
    if let Some(slug) = explicit {
        return Ok(slug.parse()?);
    }
    if let Some(slug) = config.repository.slug()? {
        return Ok(slug);
    }
    git::detect_slug(".", &config.repository.remote).with_context(|| {
        format!(
            "Cannot determine the GitHub repository from remote '{}'; pass --repo OWNER/NAME",
            config.repository.remote
        )
    })
}

/// Release options derived from configuration
pub fn release_options(config: &Config) -> ReleaseOptions {
    ReleaseOptions {
        default_branch: config.repository.default_branch.clone(),
        tag_message: TagMessageTemplate::new(&config.release.tag_message),
    }
}

/// Run one command against an already resolved repository handle
///
/// Collaborators (changelog, assets) are built from `config`.
pub fn execute<R: ReleaseRepository>(
    command: &ReleaseCommand,
    repo: &R,
    config: &Config,
) -> crate::error::Result<WorkflowResult> {
    let tag = command.tag();
    let changelog = ChangelogLoader::new(&config.changelog.path);
    let assets = AssetCollector::new(
        &config.assets.base_dir,
        config.assets.patterns.clone(),
        tag,
    );
    let handler =
        ReleaseHandler::new(tag, repo, &changelog, &assets).with_options(release_options(config));

    match command {
        ReleaseCommand::Create {
            commit, dry_run, ..
        } => handler
            .create(commit.as_deref(), *dry_run)
            .map(WorkflowResult::Created),
        ReleaseCommand::Delete { .. } => handler.delete().map(WorkflowResult::Deleted),
    }
}

/// Main release workflow
///
/// 1. Resolve the GitHub repository
/// 2. Build an authenticated handle with `token`
/// 3. Run create or delete
///
/// Errors from `execute` keep their [crate::error::ReleaseError] type inside
/// the returned `anyhow::Error`, so callers can still detect a collision.
pub fn run_release_workflow(
    args: WorkflowArgs,
    config: Config,
    token: GitHubToken,
) -> Result<WorkflowResult> {
    let slug = resolve_slug(args.repo.as_deref(), &config)?;
    let repo = GithubRepository::new(slug, token, config.repository.endpoints())?;
    info!("operating on {}", repo.slug());

    Ok(execute(&args.command, &repo, &config)?)
}
