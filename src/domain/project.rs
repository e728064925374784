use std::fmt;

/// The hosted project a release is published for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub organization: String,
    pub repository: String,
}

impl Project {
    pub fn new(organization: impl Into<String>, repository: impl Into<String>) -> Self {
        Project {
            organization: organization.into(),
            repository: repository.into(),
        }
    }

    pub fn commit_url(&self, sha: &str) -> String {
        format!("https://github.com/{}/commit/{}", self, sha)
    }

    pub fn issue_url(&self, number: &str) -> String {
        format!("https://github.com/{}/issues/{}", self, number)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}
