//! Configuration for the monitor, loaded from TOML with per-field defaults.

pub mod defaults;
mod monitor_config;
mod observability_config;

pub use monitor_config::{MonitorConfig, ThresholdConfig};
pub use observability_config::ObservabilityConfig;
