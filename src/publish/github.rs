use crate::config::{Credentials, GithubConfig};
use crate::error::Result;
use crate::publish::{HostedRelease, ReleaseHost, ToolCommand};
use crate::ui;
use std::io::Write;

/// Creates GitHub releases through the `gh` command-line client
pub struct GithubReleaseClient<'a> {
    config: &'a GithubConfig,
    credentials: &'a Credentials,
    dry_run: bool,
}

impl<'a> GithubReleaseClient<'a> {
    pub fn new(config: &'a GithubConfig, credentials: &'a Credentials, dry_run: bool) -> Self {
        GithubReleaseClient {
            config,
            credentials,
            dry_run,
        }
    }

    /// The invocation for `release`, reading notes from `notes_file`
    pub fn command(&self, release: &HostedRelease<'_>, notes_file: &str) -> ToolCommand {
        ToolCommand::new(self.config.program.clone())
            .args(["release", "create", release.tag])
            .arg("--repo")
            .arg(release.project.to_string())
            .arg("--title")
            .arg(release.tag)
            .arg("--notes-file")
            .arg(notes_file)
            .path_args(release.artifacts)
    }
}

impl ReleaseHost for GithubReleaseClient<'_> {
    fn create_release(&self, release: &HostedRelease<'_>) -> Result<()> {
        if self.dry_run {
            let cmd = self.command(release, "<release notes>");
            ui::display_status(&format!("Dry run. Would have called: {}", cmd.display()));
            return Ok(());
        }

        let token = self.credentials.github_token()?;

        let mut notes = tempfile::Builder::new()
            .prefix("release-notes")
            .suffix(".md")
            .tempfile()?;
        notes.write_all(release.notes.as_bytes())?;
        notes.flush()?;

        self.command(release, &notes.path().display().to_string())
            .secret_env("GH_TOKEN", token)
            .run()
    }
}
