//! # perfwatch-monitor
//!
//! The performance monitoring and alerting engine. Producers call the
//! `record_*` methods on [`PerformanceMonitor`]; samples land in bounded
//! per-metric histories, are checked against the threshold table, and
//! breaches become alerts that are mirrored to a durable store. Health and
//! dashboard views are computed on demand.

pub mod alerts;
pub mod collector;
pub mod dashboard;
pub mod evaluator;
pub mod health;
pub mod monitor;
pub mod store;
pub mod thresholds;
pub mod tracing_setup;

pub use alerts::AlertLedger;
pub use collector::{PeriodicCollector, ProcessMemoryProbe};
pub use dashboard::DashboardAssembler;
pub use evaluator::{evaluate, Breach};
pub use health::HealthScorer;
pub use monitor::PerformanceMonitor;
pub use store::{MetricHistory, MetricStore};
pub use thresholds::ThresholdTable;
