use crate::error::{PublishError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// An external program invocation
///
/// Environment variables marked secret are passed to the program but never
/// shown by [ToolCommand::display].
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String, bool)>,
    current_dir: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        ToolCommand {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
        }
    }

    /// Build from a configured `[program, args...]` list
    pub fn from_argv(argv: &[String]) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| PublishError::config("Command must not be empty"))?;
        Ok(ToolCommand::new(program.clone()).args(args.iter().cloned()))
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn path_args(self, paths: &[PathBuf]) -> Self {
        self.args(paths.iter().map(|p| p.display().to_string()))
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into(), false));
        self
    }

    pub fn secret_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into(), true));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Shell-like rendering of the command line, secrets masked
    pub fn display(&self) -> String {
        let envs = self.envs.iter().map(|(key, value, secret)| {
            if *secret {
                format!("{}=***", key)
            } else {
                format!("{}={}", key, quote(value))
            }
        });
        let argv = std::iter::once(quote(&self.program)).chain(self.args.iter().map(|a| quote(a)));

        envs.chain(argv).collect::<Vec<_>>().join(" ")
    }

    /// Run the program to completion
    ///
    /// A non-zero exit status is an [PublishError::ExternalTool] carrying the
    /// program's own error output.
    pub fn run(&self) -> Result<()> {
        log::info!("Running: {}", self.display());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value, _) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            PublishError::external_tool(&self.program, format!("cannot start: {}", e))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::debug!("{} output:\n{}", self.program, stdout.trim_end());
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let status = match output.status.code() {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            };
            // Some tools report failures on stdout only
            let details = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim_end()
            };
            return Err(PublishError::external_tool(
                &self.program,
                format!("{}\n{}", status, details).trim_end().to_string(),
            ));
        }

        Ok(())
    }
}

fn quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@+,".contains(c));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
