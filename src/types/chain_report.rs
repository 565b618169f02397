use serde::Serialize;

/// Result of walking one environment's hash chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    pub valid: bool,

    /// Chain position of the first offending link, if any.
    pub broken_at: Option<i32>,

    /// Positions absent from `0..=max` for this environment.
    pub missing: Vec<i32>,

    pub total_links: u64,
}

impl ChainReport {
    pub fn empty() -> Self {
        Self {
            valid: true,
            broken_at: None,
            missing: vec![],
            total_links: 0,
        }
    }
}
