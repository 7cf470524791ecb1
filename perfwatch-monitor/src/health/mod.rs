//! Aggregate health scoring.

mod scorer;

pub use scorer::HealthScorer;
