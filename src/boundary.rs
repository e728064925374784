use std::fmt;

/// Conditions worth telling the user about that do not stop a release.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Working copy findings ignored because of `--force`
    ForcedPastFinding { finding: String },
    /// More than one tag points at the released commit
    MultipleTagsAtHead { chosen: String, ignored: Vec<String> },
    /// No earlier release tag, so the changelog covers all history
    NoPreviousRelease { tag: String },
    /// Nothing to list between the previous release and this one
    EmptyChangelog { tag: String, previous_tag: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::ForcedPastFinding { finding } => {
                write!(f, "Releasing anyway (--force): {}", finding)
            }
            BoundaryWarning::MultipleTagsAtHead { chosen, ignored } => {
                write!(
                    f,
                    "Several tags point at HEAD; releasing '{}' and ignoring {}",
                    chosen,
                    ignored
                        .iter()
                        .map(|t| format!("'{}'", t))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            BoundaryWarning::NoPreviousRelease { tag } => {
                write!(
                    f,
                    "No release before '{}'; changelog covers the full history",
                    tag
                )
            }
            BoundaryWarning::EmptyChangelog { tag, previous_tag } => {
                write!(f, "No changes between '{}' and '{}'", previous_tag, tag)
            }
        }
    }
}
