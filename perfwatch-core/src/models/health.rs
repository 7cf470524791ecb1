use serde::{Deserialize, Serialize};

/// Tri-state health derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

/// Output of the health scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub status: HealthStatus,
    /// Clamped to `[0, 100]`.
    pub score: u32,
    pub issues: Vec<String>,
}
