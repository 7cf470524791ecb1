/// perfwatch version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Well-known metric names.
pub mod metrics {
    pub const EXTRACTION_TIME: &str = "extraction_time";
    pub const MEMORY_USAGE: &str = "memory_usage";
    pub const CACHE_HIT_RATE: &str = "cache_hit_rate";
    pub const ERROR_RATE: &str = "error_rate";
    pub const ACTIVE_CONTEXTS: &str = "active_contexts";
    pub const DOM_OBSERVATION_LAG: &str = "dom_observation_lag";

    /// Raw 0/1 hit/miss observations feeding `cache_hit_rate`.
    pub const CACHE_OPERATIONS: &str = "cache_operations";
    /// Raw error observations feeding `error_rate`.
    pub const ERRORS: &str = "errors";
}

/// Metrics always present in dashboard trends, in display order.
pub const TREND_METRICS: [&str; 4] = [
    metrics::EXTRACTION_TIME,
    metrics::MEMORY_USAGE,
    metrics::CACHE_HIT_RATE,
    metrics::ERROR_RATE,
];

/// Bytes in one mebibyte.
pub const MIB: f64 = 1024.0 * 1024.0;

/// Health score starting point and bounds.
pub const MAX_HEALTH_SCORE: i64 = 100;
pub const MIN_HEALTH_SCORE: i64 = 0;

/// Per-metric penalties applied by the health scorer.
pub const CRITICAL_METRIC_PENALTY: i64 = 30;
pub const WARNING_METRIC_PENALTY: i64 = 15;

/// Per-active-alert penalties applied by the health scorer.
pub const CRITICAL_ALERT_PENALTY: i64 = 20;
pub const WARNING_ALERT_PENALTY: i64 = 10;

/// Status cut-offs.
pub const HEALTHY_MIN_SCORE: u32 = 80;
pub const WARNING_MIN_SCORE: u32 = 60;
