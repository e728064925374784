//! Changelog generation from commit history
//!
//! The changelog of a release lists the commits reachable from its tag but
//! not from the previous release tag, newest first.

pub mod format;

use crate::domain::{ChangelogEntry, Version};
use crate::error::Result;
use crate::git::Repository;
use std::cmp::Reverse;

/// Find the release tag the changelog starts from
///
/// Considers tags on strict ancestors of `current_tag` whose names parse as
/// release versions lower than `current`. The nearest one in the commit
/// graph wins; at equal distance the highest version wins.
pub fn previous_release_tag<R: Repository + ?Sized>(
    repo: &R,
    current_tag: &str,
    current: Version,
) -> Result<Option<String>> {
    let candidate = repo
        .tags_on_ancestors(current_tag)?
        .into_iter()
        .filter_map(|tag| {
            let version = Version::parse(&tag.name).ok()?;
            (version < current).then_some((tag, version))
        })
        .min_by_key(|(tag, version)| (tag.distance, Reverse(*version)));

    Ok(candidate.map(|(tag, _)| tag.name))
}

/// List the changes made since the previous release
///
/// Merge commits are left out unless `include_merge_commits` is set.
pub fn generate<R: Repository + ?Sized>(
    repo: &R,
    current_tag: &str,
    previous_tag: Option<&str>,
    include_merge_commits: bool,
) -> Result<Vec<ChangelogEntry>> {
    let commits = repo.commits_between(current_tag, previous_tag)?;
    let total = commits.len();

    let entries: Vec<ChangelogEntry> = commits
        .into_iter()
        .filter(|commit| include_merge_commits || !commit.is_merge())
        .map(|commit| ChangelogEntry::new(commit.short_id, &commit.message))
        .collect();

    log::debug!(
        "Changelog {}..{}: {} of {} commit(s)",
        previous_tag.unwrap_or("<root>"),
        current_tag,
        entries.len(),
        total
    );

    Ok(entries)
}
