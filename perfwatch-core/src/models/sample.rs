use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque key/value context attached to a sample by its producer.
pub type SampleContext = HashMap<String, serde_json::Value>;

/// Unit tag carried by samples and thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnit {
    Ms,
    Bytes,
    /// Ratios in `[0, 1]` (hit rate, error rate).
    Percentage,
    Count,
    Boolean,
}

impl MetricUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ms => "ms",
            Self::Bytes => "bytes",
            Self::Percentage => "percentage",
            Self::Count => "count",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timestamped measurement of a named metric. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub name: String,
    pub value: f64,
    pub unit: MetricUnit,
    /// Wall-clock epoch milliseconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: SampleContext,
}

impl Sample {
    /// Create a sample stamped with the current time.
    pub fn new(name: impl Into<String>, value: f64, unit: MetricUnit) -> Self {
        Self::at(name, value, unit, chrono::Utc::now().timestamp_millis())
    }

    /// Create a sample with an explicit timestamp.
    pub fn at(name: impl Into<String>, value: f64, unit: MetricUnit, timestamp: i64) -> Self {
        Self {
            name: name.into(),
            value,
            unit,
            timestamp,
            context: SampleContext::new(),
        }
    }

    pub fn with_context(mut self, context: SampleContext) -> Self {
        self.context = context;
        self
    }
}
