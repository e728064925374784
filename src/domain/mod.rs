//! Domain logic - pure release rules independent of git operations

pub mod commit;
pub mod decision;
pub mod project;
pub mod status;
pub mod tag;
pub mod version;

pub use commit::ChangelogEntry;
pub use decision::ReleaseDecision;
pub use project::Project;
pub use status::WorkingCopyStatus;
pub use tag::{AncestorTag, Tag};
pub use version::Version;
