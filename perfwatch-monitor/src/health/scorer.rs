//! Score current readings and active alerts into a 0–100 health summary.

use perfwatch_core::constants::{
    CRITICAL_ALERT_PENALTY, CRITICAL_METRIC_PENALTY, HEALTHY_MIN_SCORE, MAX_HEALTH_SCORE,
    MIN_HEALTH_SCORE, WARNING_ALERT_PENALTY, WARNING_METRIC_PENALTY, WARNING_MIN_SCORE,
};
use perfwatch_core::models::{
    Alert, AlertLevel, Direction, HealthStatus, HealthSummary, MetricUnit, Sample, Threshold,
};

/// Builds a [`HealthSummary`] from threshold/sample pairs and active alerts.
pub struct HealthScorer;

impl HealthScorer {
    /// Score the system.
    ///
    /// Each reading at or past its critical bound costs 30, at or past its
    /// warning bound 15. Each active critical alert costs a further 20 and
    /// each active warning alert 10, so a sustained breach with a lingering
    /// alert is penalised twice.
    pub fn score(readings: &[(Threshold, Sample)], active_alerts: &[Alert]) -> HealthSummary {
        let mut score = MAX_HEALTH_SCORE;
        let mut issues = Vec::new();

        let mut ordered: Vec<&(Threshold, Sample)> = readings.iter().collect();
        ordered.sort_by(|a, b| a.0.metric.cmp(&b.0.metric));

        for (threshold, sample) in ordered {
            let level = if threshold.direction.reaches(sample.value, threshold.critical) {
                AlertLevel::Critical
            } else if threshold.direction.reaches(sample.value, threshold.warning) {
                AlertLevel::Warning
            } else {
                continue;
            };
            score -= match level {
                AlertLevel::Critical => CRITICAL_METRIC_PENALTY,
                AlertLevel::Warning => WARNING_METRIC_PENALTY,
            };
            issues.push(Self::describe(level, threshold, sample));
        }

        for alert in active_alerts.iter().filter(|a| a.is_active()) {
            score -= match alert.level {
                AlertLevel::Critical => CRITICAL_ALERT_PENALTY,
                AlertLevel::Warning => WARNING_ALERT_PENALTY,
            };
        }

        let score = score.clamp(MIN_HEALTH_SCORE, MAX_HEALTH_SCORE) as u32;
        HealthSummary {
            status: Self::status_for(score),
            score,
            issues,
        }
    }

    /// `>= 80` healthy, `>= 60` warning, otherwise critical.
    pub fn status_for(score: u32) -> HealthStatus {
        if score >= HEALTHY_MIN_SCORE {
            HealthStatus::Healthy
        } else if score >= WARNING_MIN_SCORE {
            HealthStatus::Warning
        } else {
            HealthStatus::Critical
        }
    }

    fn describe(level: AlertLevel, threshold: &Threshold, sample: &Sample) -> String {
        let label = match level {
            AlertLevel::Critical => "Critical",
            AlertLevel::Warning => "Warning",
        };
        match threshold.direction {
            Direction::HigherIsWorse => format!(
                "{label}: High {} ({} {})",
                threshold.metric, sample.value, sample.unit
            ),
            Direction::LowerIsWorse => {
                let name = threshold.metric.replace('_', " ");
                if sample.unit == MetricUnit::Percentage {
                    format!("{label}: Low {name} ({:.1}%)", sample.value * 100.0)
                } else {
                    format!("{label}: Low {name} ({} {})", sample.value, sample.unit)
                }
            }
        }
    }
}
