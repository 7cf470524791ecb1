/// Source of process memory readings for the periodic collector.
pub trait IMemoryProbe: Send + Sync {
    /// Resident memory of the current process in bytes, or `None` when the
    /// platform cannot report it.
    fn resident_bytes(&self) -> Option<u64>;
}
