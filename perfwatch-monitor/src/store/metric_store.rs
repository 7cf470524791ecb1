//! Concurrent per-metric ring buffers keyed by name in a DashMap.
//!
//! Each series is guarded by its shard lock, so appends, prunes, and reads
//! on one metric never interleave. No method holds a guard on one series
//! while touching another.

use std::collections::HashMap;

use dashmap::DashMap;
use serde_json::json;

use perfwatch_core::config::MonitorConfig;
use perfwatch_core::constants::metrics;
use perfwatch_core::models::{MetricUnit, Sample, SampleContext};

use super::MetricHistory;

/// The system of record for recent metric history.
#[derive(Debug)]
pub struct MetricStore {
    series: DashMap<String, MetricHistory>,
    default_capacity: usize,
    capacity_overrides: HashMap<String, usize>,
}

impl MetricStore {
    /// Every series holds `default_capacity` samples unless overridden.
    pub fn new(default_capacity: usize) -> Self {
        Self {
            series: DashMap::new(),
            default_capacity,
            capacity_overrides: HashMap::new(),
        }
    }

    /// Capacities from config: the error series gets its larger bound.
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.default_history_capacity)
            .with_capacity_for(metrics::ERRORS, config.error_history_capacity)
    }

    pub fn with_capacity_for(mut self, name: impl Into<String>, capacity: usize) -> Self {
        self.capacity_overrides.insert(name.into(), capacity);
        self
    }

    /// Capacity a series named `name` has (or will have once created).
    pub fn capacity_for(&self, name: &str) -> usize {
        self.capacity_overrides
            .get(name)
            .copied()
            .unwrap_or(self.default_capacity)
    }

    /// Push onto the named series, creating it on first use.
    pub fn append(&self, sample: Sample) {
        let capacity = self.capacity_for(&sample.name);
        self.series
            .entry(sample.name.clone())
            .or_insert_with(|| MetricHistory::new(capacity))
            .push(sample);
    }

    /// At most the last `limit` samples, oldest first. Empty for unknown names.
    pub fn history(&self, name: &str, limit: usize) -> Vec<Sample> {
        self.series
            .get(name)
            .map(|h| h.last_n(limit))
            .unwrap_or_default()
    }

    pub fn latest(&self, name: &str) -> Option<Sample> {
        self.series.get(name).and_then(|h| h.latest().cloned())
    }

    /// Latest sample of every series that currently holds one.
    pub fn latest_all(&self) -> Vec<Sample> {
        self.series
            .iter()
            .filter_map(|entry| entry.value().latest().cloned())
            .collect()
    }

    /// Names of every series ever created, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.series.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self, name: &str) -> usize {
        self.series.get(name).map(|h| h.len()).unwrap_or(0)
    }

    /// Samples in `name` stamped at or after `since_ms`.
    pub fn count_since(&self, name: &str, since_ms: i64) -> usize {
        self.series
            .get(name)
            .map(|h| h.count_since(since_ms))
            .unwrap_or(0)
    }

    /// Drop samples older than `cutoff_ms` from every series.
    pub fn prune_before(&self, cutoff_ms: i64) -> usize {
        self.series
            .iter_mut()
            .map(|mut entry| entry.value_mut().prune_before(cutoff_ms))
            .sum()
    }

    /// Record one cache hit/miss and derive the windowed hit rate.
    ///
    /// The raw observation is appended to the cache-operations series and the
    /// ratio is computed over that series' current window while its shard
    /// guard is held. The returned `cache_hit_rate` sample is not stored;
    /// callers that record it concurrently must serialize observe and record
    /// themselves. Every observation yields exactly one rate sample.
    pub fn observe_cache_operation(&self, hit: bool, timestamp: i64) -> Sample {
        let capacity = self.capacity_for(metrics::CACHE_OPERATIONS);
        let rate = {
            let mut ops = self
                .series
                .entry(metrics::CACHE_OPERATIONS.to_string())
                .or_insert_with(|| MetricHistory::new(capacity));
            let observation = Sample::at(
                metrics::CACHE_OPERATIONS,
                if hit { 1.0 } else { 0.0 },
                MetricUnit::Boolean,
                timestamp,
            );
            ops.push(observation);
            let hits = ops.iter().filter(|s| s.value > 0.0).count();
            hits as f64 / ops.len() as f64
        };
        Sample::at(metrics::CACHE_HIT_RATE, rate, MetricUnit::Percentage, timestamp)
    }

    /// Record one error event and derive the trailing-window error rate.
    ///
    /// Rate is errors in the window over extraction-time plus
    /// cache-operation samples in the same window; zero operations yields 0.
    /// Returns the `error_rate` sample for the caller to record, under the
    /// same serialization rule as [`observe_cache_operation`](Self::observe_cache_operation).
    pub fn observe_error(
        &self,
        error_type: &str,
        severity: &str,
        timestamp: i64,
        window_ms: i64,
    ) -> Sample {
        let mut context = SampleContext::new();
        context.insert("error_type".into(), json!(error_type));
        context.insert("severity".into(), json!(severity));
        self.append(Sample::at(metrics::ERRORS, 1.0, MetricUnit::Count, timestamp).with_context(context));

        let since = timestamp.saturating_sub(window_ms);
        let errors = self.count_since(metrics::ERRORS, since);
        let operations = self.count_since(metrics::EXTRACTION_TIME, since)
            + self.count_since(metrics::CACHE_OPERATIONS, since);
        let rate = if operations == 0 {
            0.0
        } else {
            errors as f64 / operations as f64
        };
        Sample::at(metrics::ERROR_RATE, rate, MetricUnit::Percentage, timestamp)
    }
}

impl Default for MetricStore {
    fn default() -> Self {
        Self::from_config(&MonitorConfig::default())
    }
}
