use anyhow::{Context, Result};
use clap::Parser;

use publish::cli::{Args, Collaborators, Orchestrator, PublishWorkflowArgs, ReleaseState};
use publish::config::{self, Credentials};
use publish::git::Git2Repository;
use publish::publish::{CommandBuilder, GithubReleaseClient, TwineClient};
use publish::ui;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Captured once; clients only see this struct
    let credentials = Credentials::from_env();

    let repo = match Git2Repository::open(&args.directory) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    let workdir = repo
        .workdir()
        .context("Repository has no working directory")?
        .to_path_buf();

    let config = match config::load_config(args.config.as_deref(), &workdir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let builder = CommandBuilder::new(&workdir, &config.build);
    let host = GithubReleaseClient::new(&config.github, &credentials, args.dry_run);
    let index = TwineClient::new(&config.package_index, &credentials, args.dry_run);

    let workflow_args = PublishWorkflowArgs {
        project: args.project(),
        force: args.force,
        include_merge_commits: config.changelog.include_merge_commits,
    };
    let collaborators = Collaborators {
        builder: &builder,
        host: &host,
        index: &index,
    };

    let result = Orchestrator::new(&repo, collaborators, workflow_args).run();

    match result.aborted_in {
        None => {
            let tag = result.tag.clone().unwrap_or_default();
            if args.dry_run {
                ui::display_success(&format!("Dry run of {} complete", tag));
            } else {
                ui::display_success(&format!("Published {} for {}", tag, args.project()));
            }
        }
        Some(ReleaseState::CheckingCleanliness | ReleaseState::CheckingTag) => {
            ui::display_blocking_reasons(&result.decision);
        }
        Some(state) => {
            for reason in &result.decision.blocking_reasons {
                ui::display_error(&format!("{} failed: {}", state, reason));
            }
        }
    }

    std::process::exit(result.exit_code());
}
