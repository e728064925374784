//! Repository state inspection
//!
//! Reads the working copy and reports what would make a release
//! irreproducible: files nobody tracks or ignores, and changes nobody
//! committed. Nothing here writes to the repository.

use crate::domain::WorkingCopyStatus;
use crate::error::Result;
use crate::git::Repository;

/// Take a fresh snapshot of the working copy
///
/// Fails with [crate::error::PublishError::RepositoryAccess] when the
/// working copy cannot be queried.
pub fn inspect<R: Repository + ?Sized>(repo: &R) -> Result<WorkingCopyStatus> {
    let uncommitted_changes = repo.uncommitted_changes()?;
    let untracked_files = repo.untracked_files()?;

    log::debug!(
        "Working copy: {} uncommitted change(s), {} untracked file(s)",
        uncommitted_changes.len(),
        untracked_files.len()
    );

    Ok(WorkingCopyStatus {
        untracked_files,
        uncommitted_changes,
    })
}
