//! External collaborators that build and publish a release
//!
//! The release orchestration only sees the traits below. The command-line
//! implementations delegate to existing tools:
//!
//! - [builder::CommandBuilder]: the project's packaging command
//! - [github::GithubReleaseClient]: `gh release create`
//! - [twine::TwineClient]: `twine upload`

pub mod builder;
pub mod command;
pub mod github;
pub mod twine;

pub use builder::CommandBuilder;
pub use command::ToolCommand;
pub use github::GithubReleaseClient;
pub use twine::TwineClient;

use crate::domain::{Project, Version};
use crate::error::Result;
use std::path::PathBuf;

/// Everything the build toolchain is given
#[derive(Debug, Clone, Copy)]
pub struct BuildRequest<'a> {
    pub version: Version,
    /// Changelog in reStructuredText, for the package long description
    pub changelog: &'a str,
}

/// Everything the hosting service is given
#[derive(Debug, Clone, Copy)]
pub struct HostedRelease<'a> {
    pub project: &'a Project,
    /// Name of the validated tag the release is attached to
    pub tag: &'a str,
    pub version: Version,
    /// Release notes in Markdown
    pub notes: &'a str,
    pub artifacts: &'a [PathBuf],
}

/// Produces distributable artifacts from a clean, tagged working copy
pub trait ArtifactBuilder {
    /// Build and return the paths of the produced artifacts
    fn build(&self, request: &BuildRequest<'_>) -> Result<Vec<PathBuf>>;
}

/// Creates a release record on the source-hosting service
pub trait ReleaseHost {
    fn create_release(&self, release: &HostedRelease<'_>) -> Result<()>;
}

/// Uploads artifacts to a package index
pub trait PackageIndex {
    fn upload(&self, artifacts: &[PathBuf]) -> Result<()>;
}
