use super::StoreError;

/// Top-level error for every fallible perfwatch operation.
#[derive(Debug, thiserror::Error)]
pub enum PerfwatchError {
    #[error("durable store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("no tokio runtime available to host background tasks")]
    RuntimeUnavailable,

    #[error("lock poisoned: {what}")]
    LockPoisoned { what: String },
}
