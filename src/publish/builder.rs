use crate::config::BuildConfig;
use crate::error::{PublishError, Result};
use crate::publish::{ArtifactBuilder, BuildRequest, ToolCommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable naming the changelog file during the build
pub const CHANGELOG_FILE_ENV: &str = "CHANGELOG_FILE";
/// Environment variable carrying the version being built
pub const RELEASE_VERSION_ENV: &str = "RELEASE_VERSION";

/// Builds artifacts by running the configured packaging command
pub struct CommandBuilder<'a> {
    workdir: PathBuf,
    config: &'a BuildConfig,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(workdir: impl Into<PathBuf>, config: &'a BuildConfig) -> Self {
        CommandBuilder {
            workdir: workdir.into(),
            config,
        }
    }

    fn dist_dir(&self) -> PathBuf {
        self.workdir.join(&self.config.dist_dir)
    }
}

impl ArtifactBuilder for CommandBuilder<'_> {
    fn build(&self, request: &BuildRequest<'_>) -> Result<Vec<PathBuf>> {
        let mut changelog = tempfile::Builder::new()
            .prefix("changelog")
            .suffix(".rst")
            .tempfile()?;
        changelog.write_all(request.changelog.as_bytes())?;
        changelog.flush()?;

        clean_artifacts(&self.dist_dir())?;

        ToolCommand::from_argv(&self.config.command)?
            .env(CHANGELOG_FILE_ENV, changelog.path().display().to_string())
            .env(RELEASE_VERSION_ENV, request.version.to_string())
            .current_dir(&self.workdir)
            .run()?;

        let artifacts = list_artifacts(&self.dist_dir())?;
        if artifacts.is_empty() {
            return Err(PublishError::external_tool(
                "build",
                format!("no artifacts found in {}", self.dist_dir().display()),
            ));
        }

        for artifact in &artifacts {
            log::info!("Built {}", artifact.display());
        }
        Ok(artifacts)
    }
}

/// Remove artifacts left in `dir` by earlier builds
///
/// Only regular files are removed; a missing directory is fine.
pub fn clean_artifacts(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            log::info!("Removing stale artifact {}", entry.path().display());
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// Absolute paths of the regular files in `dir`, sorted
pub fn list_artifacts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut artifacts = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            artifacts.push(fs::canonicalize(entry.path())?);
        }
    }

    artifacts.sort();
    Ok(artifacts)
}
