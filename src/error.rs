use thiserror::Error;

/// Unified error type for publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Cannot query working copy: {0}")]
    RepositoryAccess(String),

    #[error("No tag points at the current commit")]
    NoTag,

    #[error("Tag '{0}' is not an annotated tag")]
    NotAnnotated(String),

    #[error("Tag '{0}' is not a valid release tag (expected v<major>.<minor>.<bugfix>)")]
    MalformedVersion(String),

    #[error("Cannot walk commit history: {0}")]
    HistoryAccess(String),

    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in publish
pub type Result<T> = std::result::Result<T, PublishError>;

impl PublishError {
    /// Create a repository access error with context
    pub fn repository_access(msg: impl Into<String>) -> Self {
        PublishError::RepositoryAccess(msg.into())
    }

    /// Create a history access error with context
    pub fn history_access(msg: impl Into<String>) -> Self {
        PublishError::HistoryAccess(msg.into())
    }

    /// Create an external tool error naming the failed tool
    pub fn external_tool(tool: impl Into<String>, msg: impl Into<String>) -> Self {
        PublishError::ExternalTool {
            tool: tool.into(),
            message: msg.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PublishError::Config(msg.into())
    }
}
