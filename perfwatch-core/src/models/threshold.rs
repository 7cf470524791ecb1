use serde::{Deserialize, Serialize};

use super::MetricUnit;

/// Which side of a bound is bad for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Latency, memory, error rate: values above the bound breach.
    #[default]
    HigherIsWorse,
    /// Hit rate: values below the bound breach.
    LowerIsWorse,
}

impl Direction {
    /// Strictly past the bound. Used when deciding whether an alert fires.
    pub fn breaches(&self, value: f64, bound: f64) -> bool {
        match self {
            Self::HigherIsWorse => value > bound,
            Self::LowerIsWorse => value < bound,
        }
    }

    /// At or past the bound. Used by health scoring.
    pub fn reaches(&self, value: f64, bound: f64) -> bool {
        match self {
            Self::HigherIsWorse => value >= bound,
            Self::LowerIsWorse => value <= bound,
        }
    }
}

/// Warning/critical bounds for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub metric: String,
    pub warning: f64,
    pub critical: f64,
    pub unit: MetricUnit,
    #[serde(default)]
    pub direction: Direction,
}

impl Threshold {
    pub fn new(
        metric: impl Into<String>,
        warning: f64,
        critical: f64,
        unit: MetricUnit,
        direction: Direction,
    ) -> Self {
        Self {
            metric: metric.into(),
            warning,
            critical,
            unit,
            direction,
        }
    }

    /// Apply a partial update in place. Absent fields are left untouched.
    pub fn apply(&mut self, update: &ThresholdUpdate) {
        if let Some(warning) = update.warning {
            self.warning = warning;
        }
        if let Some(critical) = update.critical {
            self.critical = critical;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
    }
}

/// Partial threshold update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdUpdate {
    pub warning: Option<f64>,
    pub critical: Option<f64>,
    pub unit: Option<MetricUnit>,
}
