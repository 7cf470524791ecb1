mod alert;
mod dashboard;
mod health;
mod sample;
mod threshold;

pub use alert::{Alert, AlertLevel};
pub use dashboard::DashboardSnapshot;
pub use health::{HealthStatus, HealthSummary};
pub use sample::{MetricUnit, Sample, SampleContext};
pub use threshold::{Direction, Threshold, ThresholdUpdate};
