//! Named structured events. Field names are stable for log queries.

use perfwatch_core::models::{Alert, MetricUnit, SampleContext, Threshold};

pub fn alert_raised(alert: &Alert, unit: MetricUnit, context: &SampleContext) {
    tracing::warn!(
        event = "alert_raised",
        alert_id = %alert.id,
        metric = %alert.metric,
        level = %alert.level,
        value = alert.value,
        threshold = alert.threshold,
        unit = %unit,
        context = ?context,
        "performance threshold breached"
    );
}

pub fn alert_resolved(alert: &Alert) {
    tracing::info!(
        event = "alert_resolved",
        alert_id = %alert.id,
        metric = %alert.metric,
        level = %alert.level,
        resolved_at = alert.resolved_at,
        "alert resolved"
    );
}

pub fn threshold_updated(threshold: &Threshold) {
    tracing::info!(
        event = "threshold_updated",
        metric = %threshold.metric,
        warning = threshold.warning,
        critical = threshold.critical,
        unit = %threshold.unit,
        "threshold updated"
    );
}

pub fn unknown_threshold(metric: &str) {
    tracing::warn!(
        event = "unknown_threshold",
        metric = %metric,
        "threshold update ignored: metric is not registered"
    );
}

pub fn persistence_failed(operation: &str, alert_id: &str, error: &dyn std::fmt::Display) {
    tracing::error!(
        event = "persistence_failed",
        operation = %operation,
        alert_id = %alert_id,
        error = %error,
        "failed to persist alert"
    );
}

pub fn persistence_dropped(operation: &str, alert_id: &str) {
    tracing::warn!(
        event = "persistence_dropped",
        operation = %operation,
        alert_id = %alert_id,
        "persistence queue full; alert write dropped"
    );
}

pub fn sample_rejected(metric: &str, value: f64) {
    tracing::warn!(
        event = "sample_rejected",
        metric = %metric,
        value = value,
        "non-finite sample dropped"
    );
}

pub fn samples_pruned(removed: usize, cutoff_ms: i64) {
    tracing::debug!(
        event = "samples_pruned",
        removed = removed,
        cutoff_ms = cutoff_ms,
        "pruned stale samples"
    );
}
