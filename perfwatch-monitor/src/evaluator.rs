//! Threshold evaluation: decides whether a new sample fires an alert.

use perfwatch_core::models::{AlertLevel, Sample, Threshold};

/// A crossed bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breach {
    pub level: AlertLevel,
    /// The bound that was crossed.
    pub bound: f64,
}

/// Check `sample` against `threshold`.
///
/// Comparisons are strict and follow the threshold's direction. Critical is
/// checked first; a critical breach is not also reported as a warning.
/// No threshold means no breach.
pub fn evaluate(sample: &Sample, threshold: Option<&Threshold>) -> Option<Breach> {
    let threshold = threshold?;
    let direction = threshold.direction;
    if direction.breaches(sample.value, threshold.critical) {
        Some(Breach {
            level: AlertLevel::Critical,
            bound: threshold.critical,
        })
    } else if direction.breaches(sample.value, threshold.warning) {
        Some(Breach {
            level: AlertLevel::Warning,
            bound: threshold.warning,
        })
    } else {
        None
    }
}
