//! # perfwatch-core
//!
//! Foundation crate for the perfwatch monitoring engine.
//! Defines samples, thresholds, alerts, health and dashboard models, the
//! collaborator traits, errors, config, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod memory_document_store;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MonitorConfig;
pub use errors::{PerfwatchError, PerfwatchResult, StoreError};
pub use memory_document_store::MemoryDocumentStore;
pub use models::{Alert, AlertLevel, Direction, MetricUnit, Sample, Threshold, ThresholdUpdate};
