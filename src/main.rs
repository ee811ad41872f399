use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use gh_release::cli::orchestration::{self, ReleaseCommand, WorkflowArgs, WorkflowResult};
use gh_release::config;
use gh_release::error::ReleaseError;
use gh_release::github::GitHubToken;
use gh_release::release::{CreateOutcome, Removal};
use gh_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "gh-release",
    version,
    about = "Create and delete GitHub releases from changelog entries"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, value_name = "OWNER/NAME", help = "GitHub repository to operate on")]
    repo: Option<String>,

    #[arg(short, long, help = "Log HTTP calls and workflow steps")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tag a commit and publish a release with its assets (dry run by default)
    Create {
        /// Tag (and release name) to create
        tag: String,

        #[arg(long, help = "Commit to tag instead of the default branch tip")]
        commit: Option<String>,

        #[arg(long, help = "Actually create the tag and release")]
        no_dry_run: bool,
    },
    /// Delete a tag reference and its release
    Delete {
        /// Tag whose reference and release are removed
        tag: String,
    },
}

impl From<Command> for ReleaseCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Create {
                tag,
                commit,
                no_dry_run,
            } => ReleaseCommand::Create {
                tag,
                commit,
                dry_run: !no_dry_run,
            },
            Command::Delete { tag } => ReleaseCommand::Delete { tag },
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    if verbose {
        builder.filter_module("gh_release", LevelFilter::Debug);
    }
    builder.parse_default_env().init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Token first: nothing else is worth doing without it
    let token = match GitHubToken::from_env() {
        Ok(token) => token,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = WorkflowArgs {
        repo: args.repo,
        command: args.command.into(),
    };

    match orchestration::run_release_workflow(workflow_args, config, token) {
        Ok(WorkflowResult::Created(CreateOutcome::DryRun(params))) => {
            ui::display_status(&format!(
                "Dry run only; re-run with --no-dry-run to publish '{}'",
                params.tag
            ));
        }
        Ok(WorkflowResult::Created(CreateOutcome::Published { release, assets })) => {
            ui::display_success(&format!(
                "Published release {} with {} asset(s)",
                release.tag_name,
                assets.len()
            ));
        }
        Ok(WorkflowResult::Deleted(outcome)) => {
            if outcome.tag == Removal::Absent && outcome.release == Removal::Absent {
                ui::display_status("Nothing to delete");
            }
        }
        Err(e) => {
            match e.downcast_ref::<ReleaseError>() {
                Some(err) if err.is_collision() => ui::display_precondition_failure(&err.to_string()),
                _ => ui::display_error(&format!("{:#}", e)),
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
