//! Error taxonomy for perfwatch.
//!
//! Recording paths never surface these; they are logged and swallowed.
//! Read and aggregation paths return them unmodified.

mod perfwatch_error;
mod store_error;

pub use perfwatch_error::PerfwatchError;
pub use store_error::StoreError;

/// Convenience alias used across the workspace.
pub type PerfwatchResult<T> = Result<T, PerfwatchError>;
