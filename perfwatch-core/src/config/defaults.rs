//! Default values referenced by config structs and the threshold table.

use crate::constants::MIB;

pub const DEFAULT_COLLECTION_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_RETENTION_SECS: u64 = 3600;
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;
pub const DEFAULT_ERROR_HISTORY_CAPACITY: usize = 1000;
pub const DEFAULT_ERROR_RATE_WINDOW_SECS: u64 = 3600;
pub const DEFAULT_TREND_WINDOW: usize = 24;
pub const DEFAULT_ALERT_COLLECTION: &str = "performance_alerts";
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_ALERT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_PERSISTENCE_QUEUE_CAPACITY: usize = 1024;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Seeded threshold bounds.
pub const EXTRACTION_TIME_WARNING_MS: f64 = 3000.0;
pub const EXTRACTION_TIME_CRITICAL_MS: f64 = 8000.0;
pub const MEMORY_USAGE_WARNING_BYTES: f64 = 50.0 * MIB;
pub const MEMORY_USAGE_CRITICAL_BYTES: f64 = 100.0 * MIB;
pub const CACHE_HIT_RATE_WARNING: f64 = 0.6;
pub const CACHE_HIT_RATE_CRITICAL: f64 = 0.4;
pub const ERROR_RATE_WARNING: f64 = 0.05;
pub const ERROR_RATE_CRITICAL: f64 = 0.1;
pub const ACTIVE_CONTEXTS_WARNING: f64 = 100.0;
pub const ACTIVE_CONTEXTS_CRITICAL: f64 = 200.0;
pub const DOM_OBSERVATION_LAG_WARNING_MS: f64 = 1000.0;
pub const DOM_OBSERVATION_LAG_CRITICAL_MS: f64 = 3000.0;
