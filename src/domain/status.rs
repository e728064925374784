/// Snapshot of the working copy taken at the start of a release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingCopyStatus {
    /// Files that are neither tracked nor ignored
    pub untracked_files: Vec<String>,
    /// Files with staged or unstaged modifications
    pub uncommitted_changes: Vec<String>,
}

impl WorkingCopyStatus {
    pub fn has_untracked_unignored_files(&self) -> bool {
        !self.untracked_files.is_empty()
    }

    pub fn has_uncommitted_changes(&self) -> bool {
        !self.uncommitted_changes.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_untracked_unignored_files() && !self.has_uncommitted_changes()
    }

    /// Human-readable findings, uncommitted changes first
    pub fn findings(&self) -> Vec<String> {
        let mut findings = Vec::new();

        if self.has_uncommitted_changes() {
            findings.push(format!(
                "Repository has uncommitted changes:\n\t{}",
                self.uncommitted_changes.join("\n\t")
            ));
        }

        if self.has_untracked_unignored_files() {
            findings.push(format!(
                "Repository has untracked files:\n\t{}",
                self.untracked_files.join("\n\t")
            ));
        }

        findings
    }
}
