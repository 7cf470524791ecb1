use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Alert, HealthSummary, Sample};

/// Read-only dashboard view. Recomputed on every read, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Latest sample of every metric that has at least one.
    pub real_time: BTreeMap<String, Sample>,
    /// Every currently unresolved alert, oldest first.
    pub alerts: Vec<Alert>,
    /// Bare value arrays over the trend window, chronological.
    pub trends: BTreeMap<String, Vec<f64>>,
    pub health: HealthSummary,
}
