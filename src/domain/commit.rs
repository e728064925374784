/// One line of a release changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Abbreviated commit id, as git prints it
    pub short_id: String,
    /// First line of the commit message
    pub summary: String,
}

impl ChangelogEntry {
    /// Create an entry, keeping only the first line of `message`
    pub fn new(short_id: impl Into<String>, message: &str) -> Self {
        ChangelogEntry {
            short_id: short_id.into(),
            summary: summary_line(message).to_string(),
        }
    }
}

/// First line of a commit message, without surrounding whitespace
pub fn summary_line(message: &str) -> &str {
    message.trim_start().lines().next().unwrap_or("").trim_end()
}
