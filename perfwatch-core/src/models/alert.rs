use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a threshold breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single threshold breach event with an active/resolved lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub metric: String,
    pub level: AlertLevel,
    pub value: f64,
    /// The bound that was crossed.
    pub threshold: f64,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    pub resolved: bool,
    #[serde(default)]
    pub resolved_at: Option<i64>,
}

impl Alert {
    pub fn is_active(&self) -> bool {
        !self.resolved
    }
}
