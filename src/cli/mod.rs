//! Command-line surface: argument parsing and the release workflow.

pub mod orchestration;

use std::path::PathBuf;

pub use orchestration::{
    Collaborators, Orchestrator, PublishWorkflowArgs, ReleaseState, WorkflowResult,
};

use crate::domain::Project;

#[derive(clap::Parser, Debug)]
#[command(
    name = "publish",
    about = "Publish a new version of a library",
    long_about = "Publish a new version of a library.\n\n\
        To release, create an annotated git tag named v<major>.<minor>.<bugfix> \
        on a clean checkout and run this command. It checks the working copy and \
        tag, generates a changelog since the previous release, builds the \
        artifacts, creates a GitHub release and uploads to the package index.\n\n\
        Credentials are read from GITHUB_TOKEN, TWINE_USERNAME and TWINE_PASSWORD."
)]
pub struct Args {
    #[arg(help = "GitHub organization")]
    pub organization: String,

    #[arg(help = "The repository")]
    pub repository: String,

    #[arg(short, long, default_value = ".", help = "Git repository")]
    pub directory: PathBuf,

    #[arg(short, long, help = "Make a release even if the repo is unclean")]
    pub force: bool,

    #[arg(short = 'n', long, help = "Do everything, except upload to GitHub/package index")]
    pub dry_run: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Log progress details")]
    pub verbose: bool,
}

impl Args {
    pub fn project(&self) -> Project {
        Project::new(self.organization.clone(), self.repository.clone())
    }
}
