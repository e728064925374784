/// Outcome of the release checks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseDecision {
    pub proceed: bool,
    pub blocking_reasons: Vec<String>,
}

impl ReleaseDecision {
    /// Decision allowing the release to go ahead
    pub fn proceed() -> Self {
        ReleaseDecision {
            proceed: true,
            blocking_reasons: Vec::new(),
        }
    }

    /// Decision stopping the release for the given reasons, in order
    pub fn blocked(reasons: Vec<String>) -> Self {
        ReleaseDecision {
            proceed: false,
            blocking_reasons: reasons,
        }
    }
}
