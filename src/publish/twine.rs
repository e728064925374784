use crate::config::{Credentials, PackageIndexConfig, TWINE_PASSWORD, TWINE_USERNAME};
use crate::error::Result;
use crate::publish::{PackageIndex, ToolCommand};
use crate::ui;
use std::path::PathBuf;

/// Uploads artifacts to a Python package index through `twine`
pub struct TwineClient<'a> {
    config: &'a PackageIndexConfig,
    credentials: &'a Credentials,
    dry_run: bool,
}

impl<'a> TwineClient<'a> {
    pub fn new(config: &'a PackageIndexConfig, credentials: &'a Credentials, dry_run: bool) -> Self {
        TwineClient {
            config,
            credentials,
            dry_run,
        }
    }

    pub fn command(&self, artifacts: &[PathBuf]) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.config.program.clone())
            .arg("upload")
            .arg("--non-interactive");
        if let Some(url) = &self.config.repository_url {
            cmd = cmd.arg("--repository-url").arg(url.clone());
        }
        cmd.path_args(artifacts)
    }
}

impl PackageIndex for TwineClient<'_> {
    fn upload(&self, artifacts: &[PathBuf]) -> Result<()> {
        if self.dry_run {
            let cmd = self.command(artifacts);
            ui::display_status(&format!("Dry run. Would have called: {}", cmd.display()));
            return Ok(());
        }

        let username = self.credentials.twine_username()?;
        let password = self.credentials.twine_password()?;

        self.command(artifacts)
            .env(TWINE_USERNAME, username)
            .secret_env(TWINE_PASSWORD, password)
            .run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PublishError;

    #[test]
    fn test_command_line_with_repository_url() {
        let config = PackageIndexConfig {
            program: "twine".into(),
            repository_url: Some("https://test.pypi.org/legacy/".into()),
        };
        let credentials = Credentials::default();
        let client = TwineClient::new(&config, &credentials, false);

        assert_eq!(
            client.command(&[PathBuf::from("/w/dist/a.whl")]).display(),
            "twine upload --non-interactive --repository-url https://test.pypi.org/legacy/ /w/dist/a.whl"
        );
    }

    #[test]
    fn test_missing_password_is_config_error() {
        let config = PackageIndexConfig::default();
        let credentials = Credentials {
            twine_username: Some("__token__".into()),
            ..Credentials::default()
        };
        let client = TwineClient::new(&config, &credentials, false);

        let err = client.upload(&[PathBuf::from("/w/dist/a.whl")]).unwrap_err();
        assert!(matches!(err, PublishError::Config(ref msg) if msg.contains("TWINE_PASSWORD")));
    }
}
