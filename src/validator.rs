//! Release tag validation
//!
//! A release must be built from a commit carrying an annotated tag named
//! exactly `v<major>.<minor>.<bugfix>`.

use crate::domain::{Tag, Version};
use crate::error::{PublishError, Result};
use crate::git::Repository;
use std::cmp::Ordering;

/// Validate the tag on the checked-out commit
pub fn validate<R: Repository + ?Sized>(repo: &R) -> Result<Tag> {
    let tags = repo.tags_at_head()?;
    validate_tags(&tags).cloned()
}

/// Pick the release candidate among the tags at HEAD and check it
///
/// With several tags on the commit, annotated tags with a release name win
/// (highest version first), then other annotated tags, then lightweight
/// ones, each group in name order. Errors describe the picked tag.
pub fn validate_tags(tags: &[Tag]) -> Result<&Tag> {
    let tag = pick(tags).ok_or(PublishError::NoTag)?;
    check(tag)?;
    Ok(tag)
}

/// Check a single tag against the release rules
pub fn check(tag: &Tag) -> Result<()> {
    if !tag.points_at_current_commit {
        return Err(PublishError::NoTag);
    }
    if !tag.is_annotated {
        return Err(PublishError::NotAnnotated(tag.name.clone()));
    }
    Version::parse(&tag.name)?;
    Ok(())
}

fn rank(tag: &Tag) -> u8 {
    match (tag.is_annotated, tag.has_release_name()) {
        (true, true) => 0,
        (true, false) => 1,
        (false, _) => 2,
    }
}

fn pick(tags: &[Tag]) -> Option<&Tag> {
    tags.iter()
        .filter(|tag| tag.points_at_current_commit)
        .min_by(|a, b| {
            rank(a)
                .cmp(&rank(b))
                .then_with(|| descending_version(a, b))
                .then_with(|| a.name.cmp(&b.name))
        })
}

fn descending_version(a: &Tag, b: &Tag) -> Ordering {
    Version::parse(&b.name)
        .ok()
        .cmp(&Version::parse(&a.name).ok())
}
