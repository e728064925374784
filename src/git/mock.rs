use crate::domain::{AncestorTag, Tag};
use crate::error::{PublishError, Result};
use crate::git::{CommitInfo, Repository};
use std::collections::{HashMap, HashSet, VecDeque};

struct MockCommit {
    id: String,
    message: String,
    parents: Vec<String>,
}

struct MockTag {
    name: String,
    commit: String,
    is_annotated: bool,
}

/// In-memory repository for testing without actual git operations
///
/// Commits are kept in insertion order, which doubles as their age: a later
/// commit is newer. Parents must be added before their children.
#[derive(Default)]
pub struct MockRepository {
    commits: Vec<MockCommit>,
    head: Option<String>,
    tags: Vec<MockTag>,
    untracked_files: Vec<String>,
    uncommitted_changes: Vec<String>,
    working_copy_error: Option<String>,
    history_error: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit on top of HEAD and move HEAD to it
    pub fn commit(&mut self, id: &str, message: &str) -> &mut Self {
        let parents: Vec<String> = self.head.iter().cloned().collect();
        self.push_commit(id, message, parents);
        self
    }

    /// Merge `other` into HEAD and move HEAD to the merge commit
    pub fn merge(&mut self, id: &str, message: &str, other: &str) -> &mut Self {
        let mut parents: Vec<String> = self.head.iter().cloned().collect();
        parents.push(other.to_string());
        self.push_commit(id, message, parents);
        self
    }

    /// Add a commit with explicit parents without moving HEAD
    pub fn add_commit(&mut self, id: &str, message: &str, parents: &[&str]) -> &mut Self {
        self.commits.push(MockCommit {
            id: id.to_string(),
            message: message.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
        });
        self
    }

    pub fn set_head(&mut self, id: &str) -> &mut Self {
        self.head = Some(id.to_string());
        self
    }

    /// Add an annotated tag pointing at a commit
    pub fn tag_annotated(&mut self, name: &str, commit: &str) -> &mut Self {
        self.push_tag(name, commit, true)
    }

    /// Add a lightweight tag pointing at a commit
    pub fn tag_lightweight(&mut self, name: &str, commit: &str) -> &mut Self {
        self.push_tag(name, commit, false)
    }

    pub fn add_untracked_file(&mut self, path: &str) -> &mut Self {
        self.untracked_files.push(path.to_string());
        self
    }

    pub fn add_uncommitted_change(&mut self, path: &str) -> &mut Self {
        self.uncommitted_changes.push(path.to_string());
        self
    }

    /// Make every working copy query fail
    pub fn fail_working_copy(&mut self, message: &str) -> &mut Self {
        self.working_copy_error = Some(message.to_string());
        self
    }

    /// Make every history query fail
    pub fn fail_history(&mut self, message: &str) -> &mut Self {
        self.history_error = Some(message.to_string());
        self
    }

    fn push_commit(&mut self, id: &str, message: &str, parents: Vec<String>) {
        self.commits.push(MockCommit {
            id: id.to_string(),
            message: message.to_string(),
            parents,
        });
        self.head = Some(id.to_string());
    }

    fn push_tag(&mut self, name: &str, commit: &str, is_annotated: bool) -> &mut Self {
        self.tags.push(MockTag {
            name: name.to_string(),
            commit: commit.to_string(),
            is_annotated,
        });
        self
    }

    fn check_working_copy(&self) -> Result<()> {
        match &self.working_copy_error {
            Some(message) => Err(PublishError::repository_access(message.clone())),
            None => Ok(()),
        }
    }

    fn check_history(&self) -> Result<()> {
        match &self.history_error {
            Some(message) => Err(PublishError::history_access(message.clone())),
            None => Ok(()),
        }
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.commits
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| PublishError::history_access(format!("Unknown commit: {}", id)))
    }

    fn tag_commit(&self, tag_name: &str) -> Result<&str> {
        self.tags
            .iter()
            .find(|t| t.name == tag_name)
            .map(|t| t.commit.as_str())
            .ok_or_else(|| PublishError::history_access(format!("Cannot find tag '{}'", tag_name)))
    }

    /// Indices of every commit reachable from `id`, itself included
    fn reachable(&self, id: &str) -> Result<HashSet<usize>> {
        let mut seen = HashSet::new();
        let mut stack = vec![self.position(id)?];

        while let Some(index) = stack.pop() {
            if seen.insert(index) {
                for parent in &self.commits[index].parents {
                    stack.push(self.position(parent)?);
                }
            }
        }

        Ok(seen)
    }
}

impl Repository for MockRepository {
    fn untracked_files(&self) -> Result<Vec<String>> {
        self.check_working_copy()?;
        Ok(self.untracked_files.clone())
    }

    fn uncommitted_changes(&self) -> Result<Vec<String>> {
        self.check_working_copy()?;
        Ok(self.uncommitted_changes.clone())
    }

    fn tags_at_head(&self) -> Result<Vec<Tag>> {
        self.check_working_copy()?;
        let Some(head) = &self.head else {
            return Ok(Vec::new());
        };

        let mut tags: Vec<Tag> = self
            .tags
            .iter()
            .filter(|t| &t.commit == head)
            .map(|t| Tag {
                name: t.name.clone(),
                is_annotated: t.is_annotated,
                points_at_current_commit: true,
            })
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn tags_on_ancestors(&self, tag_name: &str) -> Result<Vec<AncestorTag>> {
        self.check_history()?;
        let start = self.position(self.tag_commit(tag_name)?)?;

        let mut distances: HashMap<usize, usize> = HashMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);
        while let Some(index) = queue.pop_front() {
            let distance = distances[&index];
            for parent in &self.commits[index].parents {
                let parent = self.position(parent)?;
                if !distances.contains_key(&parent) {
                    distances.insert(parent, distance + 1);
                    queue.push_back(parent);
                }
            }
        }

        let mut found = Vec::new();
        for tag in &self.tags {
            let index = self.position(&tag.commit)?;
            match distances.get(&index) {
                Some(&distance) if distance > 0 => found.push(AncestorTag {
                    name: tag.name.clone(),
                    distance,
                }),
                _ => {}
            }
        }
        Ok(found)
    }

    fn commits_between(
        &self,
        tag_name: &str,
        previous_tag: Option<&str>,
    ) -> Result<Vec<CommitInfo>> {
        self.check_history()?;
        let mut included = self.reachable(self.tag_commit(tag_name)?)?;

        if let Some(previous) = previous_tag {
            let excluded = self.reachable(self.tag_commit(previous)?)?;
            included.retain(|index| !excluded.contains(index));
        }

        let mut indices: Vec<usize> = included.into_iter().collect();
        indices.sort_unstable_by(|a, b| b.cmp(a));

        Ok(indices
            .into_iter()
            .map(|index| {
                let commit = &self.commits[index];
                CommitInfo {
                    short_id: commit.id.chars().take(7).collect(),
                    message: commit.message.clone(),
                    parent_count: commit.parents.len(),
                }
            })
            .collect())
    }
}
