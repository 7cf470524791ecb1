//! Monitor configuration.
//!
//! # Examples
//!
//! ```
//! use perfwatch_core::config::MonitorConfig;
//!
//! let config = MonitorConfig::default();
//! assert_eq!(config.collection_interval_secs, 30);
//! assert_eq!(config.default_history_capacity, 100);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::ObservabilityConfig;
use crate::errors::{PerfwatchError, PerfwatchResult};
use crate::models::{Direction, MetricUnit, Threshold};

/// Bounds for a metric registered through configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub warning: f64,
    pub critical: f64,
    pub unit: MetricUnit,
    #[serde(default)]
    pub direction: Direction,
}

impl ThresholdConfig {
    pub fn into_threshold(self, metric: impl Into<String>) -> Threshold {
        Threshold::new(metric, self.warning, self.critical, self.unit, self.direction)
    }
}

/// Top-level monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between periodic collector ticks. Default: 30.
    pub collection_interval_secs: u64,
    /// Samples older than this are pruned on each tick. Default: 3600.
    pub retention_secs: u64,
    /// Ring-buffer capacity for ordinary metrics. Default: 100.
    pub default_history_capacity: usize,
    /// Ring-buffer capacity for the raw error series. Default: 1000.
    pub error_history_capacity: usize,
    /// Trailing window for the error-rate ratio. Default: 3600.
    pub error_rate_window_secs: u64,
    /// Points per dashboard trend. Default: 24.
    pub trend_window: usize,
    /// Durable-store collection holding alerts. Default: "performance_alerts".
    pub alert_collection: String,
    /// Default `limit` for metric history reads. Default: 100.
    pub default_history_limit: usize,
    /// Default `limit` for alert history reads. Default: 50.
    pub default_alert_history_limit: usize,
    /// Pending alert writes held before new ones are dropped. Default: 1024.
    pub persistence_queue_capacity: usize,
    /// Additional monitored metrics beyond the built-in six.
    pub extra_thresholds: HashMap<String, ThresholdConfig>,
    pub observability: ObservabilityConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            collection_interval_secs: defaults::DEFAULT_COLLECTION_INTERVAL_SECS,
            retention_secs: defaults::DEFAULT_RETENTION_SECS,
            default_history_capacity: defaults::DEFAULT_HISTORY_CAPACITY,
            error_history_capacity: defaults::DEFAULT_ERROR_HISTORY_CAPACITY,
            error_rate_window_secs: defaults::DEFAULT_ERROR_RATE_WINDOW_SECS,
            trend_window: defaults::DEFAULT_TREND_WINDOW,
            alert_collection: defaults::DEFAULT_ALERT_COLLECTION.to_string(),
            default_history_limit: defaults::DEFAULT_HISTORY_LIMIT,
            default_alert_history_limit: defaults::DEFAULT_ALERT_HISTORY_LIMIT,
            persistence_queue_capacity: defaults::DEFAULT_PERSISTENCE_QUEUE_CAPACITY,
            extra_thresholds: HashMap::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Parse from a TOML string. Missing keys take their defaults.
    pub fn from_toml(input: &str) -> PerfwatchResult<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| PerfwatchError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the monitor misbehave.
    pub fn validate(&self) -> PerfwatchResult<()> {
        if self.collection_interval_secs == 0 {
            return Err(PerfwatchError::ConfigError(
                "collection_interval_secs must be greater than zero".into(),
            ));
        }
        if self.default_history_capacity == 0 || self.error_history_capacity == 0 {
            return Err(PerfwatchError::ConfigError(
                "history capacities must be greater than zero".into(),
            ));
        }
        if self.persistence_queue_capacity == 0 {
            return Err(PerfwatchError::ConfigError(
                "persistence_queue_capacity must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn collection_interval(&self) -> Duration {
        Duration::from_secs(self.collection_interval_secs)
    }

    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }

    pub fn retention_ms(&self) -> i64 {
        i64::try_from(self.retention().as_millis()).unwrap_or(i64::MAX)
    }

    pub fn error_rate_window_ms(&self) -> i64 {
        i64::try_from(Duration::from_secs(self.error_rate_window_secs).as_millis())
            .unwrap_or(i64::MAX)
    }
}
