//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only Git
//! queries a release needs, allowing the release checks to run against a
//! real repository or an in-memory fake.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory commit graph for testing
//!
//! # Usage
//!
//! ```rust,no_run
//! # use publish::git::{Git2Repository, Repository};
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = Git2Repository::open(".")?;
//! for tag in repo.tags_at_head()? {
//!     println!("{} (annotated: {})", tag.name, tag.is_annotated);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{AncestorTag, Tag};
use crate::error::Result;

/// Commit information for changelog generation
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The commit hash (abbreviated)
    pub short_id: String,
    /// The full commit message
    pub message: String,
    /// Number of parent commits
    pub parent_count: usize,
}

impl CommitInfo {
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }
}

/// Read-only git queries used by the release checks
///
/// No method mutates the repository, index or working tree.
///
/// ## Error Handling
///
/// Working copy queries fail with [crate::error::PublishError::RepositoryAccess];
/// history queries fail with [crate::error::PublishError::HistoryAccess].
pub trait Repository {
    /// Paths of files that are neither tracked nor ignored
    fn untracked_files(&self) -> Result<Vec<String>>;

    /// Paths of files with staged or unstaged modifications
    fn uncommitted_changes(&self) -> Result<Vec<String>>;

    /// All tags pointing at the checked-out commit, sorted by name
    ///
    /// An unborn or detached-without-commit HEAD yields an empty list.
    fn tags_at_head(&self) -> Result<Vec<Tag>>;

    /// Tags on strict ancestors of the commit `tag_name` points at
    ///
    /// Each tag carries the length of the shortest parent path from that
    /// commit. Tags on the commit itself are not included.
    fn tags_on_ancestors(&self, tag_name: &str) -> Result<Vec<AncestorTag>>;

    /// Commits reachable from `tag_name` but not from `previous_tag`
    ///
    /// With no `previous_tag` every ancestor of `tag_name` is returned,
    /// itself included. Ordered newest first, ties in topological order.
    fn commits_between(&self, tag_name: &str, previous_tag: Option<&str>)
        -> Result<Vec<CommitInfo>>;
}
