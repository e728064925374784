use crate::domain::{AncestorTag, Tag};
use crate::error::{PublishError, Result};
use crate::git::CommitInfo;
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort, Status, StatusOptions};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

/// Any status bit that means the file differs from HEAD in index or worktree
fn modified_flags() -> Status {
    Status::INDEX_NEW
        | Status::INDEX_MODIFIED
        | Status::INDEX_DELETED
        | Status::INDEX_RENAMED
        | Status::INDEX_TYPECHANGE
        | Status::WT_MODIFIED
        | Status::WT_DELETED
        | Status::WT_TYPECHANGE
        | Status::WT_RENAMED
        | Status::CONFLICTED
}

fn access_error(e: git2::Error) -> PublishError {
    PublishError::repository_access(e.message())
}

fn history_error(e: git2::Error) -> PublishError {
    PublishError::history_access(e.message())
}

/// A tag reference resolved to the commit it names
struct ResolvedTag {
    name: String,
    commit: Oid,
    is_annotated: bool,
}

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository with a working copy
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            PublishError::repository_access(format!("{}: {}", path.display(), e.message()))
        })?;

        if repo.is_bare() {
            return Err(PublishError::repository_access(format!(
                "{}: bare repository has no working copy",
                path.display()
            )));
        }

        Ok(Git2Repository { repo })
    }

    /// Root of the working copy
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn statuses(&self, include_untracked: bool) -> Result<Vec<(String, Status)>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(include_untracked)
            .recurse_untracked_dirs(include_untracked)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options)).map_err(access_error)?;

        Ok(statuses
            .iter()
            .map(|entry| {
                let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                (path, entry.status())
            })
            .collect())
    }

    /// Every tag that peels to a commit; tags on trees or blobs are skipped
    fn resolved_tags(&self) -> std::result::Result<Vec<ResolvedTag>, git2::Error> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            let Ok(commit) = reference.peel_to_commit() else {
                log::debug!("Skipping tag {} that does not name a commit", name);
                continue;
            };
            let is_annotated = reference
                .target()
                .map(|oid| self.repo.find_tag(oid).is_ok())
                .unwrap_or(false);

            tags.push(ResolvedTag {
                name: name.to_string(),
                commit: commit.id(),
                is_annotated,
            });
        }

        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn tag_commit(&self, tag_name: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .map_err(|e| {
                PublishError::history_access(format!("Cannot find tag '{}': {}", tag_name, e.message()))
            })?;

        let commit = reference.peel_to_commit().map_err(history_error)?;
        Ok(commit.id())
    }
}

impl super::Repository for Git2Repository {
    fn untracked_files(&self) -> Result<Vec<String>> {
        Ok(self
            .statuses(true)?
            .into_iter()
            .filter(|(_, status)| status.contains(Status::WT_NEW))
            .map(|(path, _)| path)
            .collect())
    }

    fn uncommitted_changes(&self) -> Result<Vec<String>> {
        Ok(self
            .statuses(false)?
            .into_iter()
            .filter(|(_, status)| status.intersects(modified_flags()))
            .map(|(path, _)| path)
            .collect())
    }

    fn tags_at_head(&self) -> Result<Vec<Tag>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(Vec::new()),
            Err(e) => return Err(access_error(e)),
        };
        let head_commit = head.peel_to_commit().map_err(access_error)?.id();

        Ok(self
            .resolved_tags()
            .map_err(access_error)?
            .into_iter()
            .filter(|tag| tag.commit == head_commit)
            .map(|tag| Tag {
                name: tag.name,
                is_annotated: tag.is_annotated,
                points_at_current_commit: true,
            })
            .collect())
    }

    fn tags_on_ancestors(&self, tag_name: &str) -> Result<Vec<AncestorTag>> {
        let start = self.tag_commit(tag_name)?;

        let mut by_commit: HashMap<Oid, Vec<String>> = HashMap::new();
        for tag in self.resolved_tags().map_err(history_error)? {
            by_commit.entry(tag.commit).or_default().push(tag.name);
        }

        let mut found = Vec::new();
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((oid, distance)) = queue.pop_front() {
            if distance > 0 {
                if let Some(names) = by_commit.get(&oid) {
                    found.extend(names.iter().map(|name| AncestorTag {
                        name: name.clone(),
                        distance,
                    }));
                }
            }

            let commit = self.repo.find_commit(oid).map_err(history_error)?;
            for parent in commit.parent_ids() {
                if seen.insert(parent) {
                    queue.push_back((parent, distance + 1));
                }
            }
        }

        Ok(found)
    }

    fn commits_between(
        &self,
        tag_name: &str,
        previous_tag: Option<&str>,
    ) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk().map_err(history_error)?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .map_err(history_error)?;
        revwalk
            .push(self.tag_commit(tag_name)?)
            .map_err(history_error)?;

        if let Some(previous) = previous_tag {
            revwalk
                .hide(self.tag_commit(previous)?)
                .map_err(history_error)?;
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result.map_err(history_error)?;
            let commit = self.repo.find_commit(oid).map_err(history_error)?;
            let short_id = commit
                .as_object()
                .short_id()
                .map_err(history_error)?
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| oid.to_string());

            commits.push(CommitInfo {
                short_id,
                message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
                parent_count: commit.parent_count(),
            });
        }

        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_directory_is_access_error() {
        let result = Git2Repository::open("/nonexistent/path/for/publish");
        assert!(matches!(result, Err(PublishError::RepositoryAccess(_))));
    }

    #[test]
    fn test_modified_flags_exclude_untracked() {
        assert!(!modified_flags().contains(Status::WT_NEW));
        assert!(!modified_flags().contains(Status::IGNORED));
        assert!(modified_flags().contains(Status::INDEX_MODIFIED));
        assert!(modified_flags().contains(Status::WT_MODIFIED));
    }
}
