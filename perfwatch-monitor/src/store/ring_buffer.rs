//! Fixed-capacity, insertion-ordered sample log with FIFO eviction.

use std::collections::VecDeque;

use perfwatch_core::models::Sample;

/// History of one metric. Insertion order is chronological order.
#[derive(Debug, Clone)]
pub struct MetricHistory {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl MetricHistory {
    /// A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append, evicting the oldest sample once capacity is exceeded.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// At most the last `limit` samples, oldest first.
    pub fn last_n(&self, limit: usize) -> Vec<Sample> {
        let skip = self.samples.len().saturating_sub(limit);
        self.samples.iter().skip(skip).cloned().collect()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Drop every sample stamped before `cutoff_ms`. Returns how many went.
    pub fn prune_before(&mut self, cutoff_ms: i64) -> usize {
        let before = self.samples.len();
        self.samples.retain(|s| s.timestamp >= cutoff_ms);
        before - self.samples.len()
    }

    /// Samples stamped at or after `since_ms`.
    pub fn count_since(&self, since_ms: i64) -> usize {
        self.samples.iter().filter(|s| s.timestamp >= since_ms).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
