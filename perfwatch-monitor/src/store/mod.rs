//! Bounded per-metric sample history.

mod metric_store;
mod ring_buffer;

pub use metric_store::MetricStore;
pub use ring_buffer::MetricHistory;
