//! Threshold table: metric name to warning/critical bounds.
//!
//! A metric without an entry is unmonitored: its samples are stored but
//! never alert.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use perfwatch_core::config::{defaults, MonitorConfig};
use perfwatch_core::constants::metrics;
use perfwatch_core::errors::{PerfwatchError, PerfwatchResult};
use perfwatch_core::models::{Direction, MetricUnit, Threshold, ThresholdUpdate};

use crate::tracing_setup::events;

/// Built-in thresholds seeded at construction.
pub fn default_thresholds() -> Vec<Threshold> {
    use Direction::{HigherIsWorse, LowerIsWorse};
    vec![
        Threshold::new(
            metrics::EXTRACTION_TIME,
            defaults::EXTRACTION_TIME_WARNING_MS,
            defaults::EXTRACTION_TIME_CRITICAL_MS,
            MetricUnit::Ms,
            HigherIsWorse,
        ),
        Threshold::new(
            metrics::MEMORY_USAGE,
            defaults::MEMORY_USAGE_WARNING_BYTES,
            defaults::MEMORY_USAGE_CRITICAL_BYTES,
            MetricUnit::Bytes,
            HigherIsWorse,
        ),
        Threshold::new(
            metrics::CACHE_HIT_RATE,
            defaults::CACHE_HIT_RATE_WARNING,
            defaults::CACHE_HIT_RATE_CRITICAL,
            MetricUnit::Percentage,
            LowerIsWorse,
        ),
        Threshold::new(
            metrics::ERROR_RATE,
            defaults::ERROR_RATE_WARNING,
            defaults::ERROR_RATE_CRITICAL,
            MetricUnit::Percentage,
            HigherIsWorse,
        ),
        Threshold::new(
            metrics::ACTIVE_CONTEXTS,
            defaults::ACTIVE_CONTEXTS_WARNING,
            defaults::ACTIVE_CONTEXTS_CRITICAL,
            MetricUnit::Count,
            HigherIsWorse,
        ),
        Threshold::new(
            metrics::DOM_OBSERVATION_LAG,
            defaults::DOM_OBSERVATION_LAG_WARNING_MS,
            defaults::DOM_OBSERVATION_LAG_CRITICAL_MS,
            MetricUnit::Ms,
            HigherIsWorse,
        ),
    ]
}

/// One threshold per metric name.
#[derive(Debug)]
pub struct ThresholdTable {
    entries: RwLock<HashMap<String, Threshold>>,
}

impl ThresholdTable {
    /// Table seeded with the built-in defaults.
    pub fn new() -> Self {
        Self::from_thresholds(default_thresholds())
    }

    /// Defaults plus any `extra_thresholds` from config.
    pub fn from_config(config: &MonitorConfig) -> Self {
        let table = Self::new();
        for (metric, extra) in &config.extra_thresholds {
            table.register(extra.clone().into_threshold(metric.clone()));
        }
        table
    }

    pub fn from_thresholds(thresholds: impl IntoIterator<Item = Threshold>) -> Self {
        let entries = thresholds
            .into_iter()
            .map(|t| (t.metric.clone(), t))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Lookup on the recording path; a poisoned lock is recovered.
    pub fn get(&self, metric: &str) -> Option<Threshold> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(metric)
            .cloned()
    }

    /// Add or replace a threshold.
    pub fn register(&self, threshold: Threshold) {
        events::threshold_updated(&threshold);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(threshold.metric.clone(), threshold);
    }

    /// Apply a partial update. Unknown metrics are logged and ignored.
    /// Returns whether an entry changed.
    pub fn update(&self, metric: &str, update: &ThresholdUpdate) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.get_mut(metric) {
            Some(threshold) => {
                threshold.apply(update);
                events::threshold_updated(threshold);
                true
            }
            None => {
                events::unknown_threshold(metric);
                false
            }
        }
    }

    /// Every threshold, sorted by metric name.
    pub fn snapshot(&self) -> PerfwatchResult<Vec<Threshold>> {
        let entries = self.entries.read().map_err(|_| PerfwatchError::LockPoisoned {
            what: "threshold table".into(),
        })?;
        let mut all: Vec<Threshold> = entries.values().cloned().collect();
        all.sort_by(|a, b| a.metric.cmp(&b.metric));
        Ok(all)
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::new()
    }
}
