//! Dashboard assembly: real-time values, active alerts, trends, and health
//! composed into one read-only snapshot.

use std::collections::BTreeMap;

use perfwatch_core::constants::TREND_METRICS;
use perfwatch_core::errors::PerfwatchResult;
use perfwatch_core::models::{DashboardSnapshot, HealthSummary, Threshold};

use crate::alerts::AlertLedger;
use crate::health::HealthScorer;
use crate::store::MetricStore;
use crate::thresholds::ThresholdTable;

/// Side-effect-free composition over the store, threshold table, and ledger.
pub struct DashboardAssembler<'a> {
    metrics: &'a MetricStore,
    thresholds: &'a ThresholdTable,
    ledger: &'a AlertLedger,
}

impl<'a> DashboardAssembler<'a> {
    pub fn new(
        metrics: &'a MetricStore,
        thresholds: &'a ThresholdTable,
        ledger: &'a AlertLedger,
    ) -> Self {
        Self {
            metrics,
            thresholds,
            ledger,
        }
    }

    /// Score every metric that has both a threshold and a latest sample.
    pub fn health(&self) -> PerfwatchResult<HealthSummary> {
        let thresholds = self.thresholds.snapshot()?;
        Ok(self.health_from(&thresholds))
    }

    /// Build the full snapshot. Any failing sub-read fails the whole call.
    pub fn assemble(&self, trend_window: usize) -> PerfwatchResult<DashboardSnapshot> {
        let _span = crate::dashboard_span!(trend_window).entered();
        let thresholds = self.thresholds.snapshot()?;

        let real_time: BTreeMap<_, _> = self
            .metrics
            .latest_all()
            .into_iter()
            .map(|sample| (sample.name.clone(), sample))
            .collect();

        let trends = TREND_METRICS
            .iter()
            .map(|name| {
                let values = self
                    .metrics
                    .history(name, trend_window)
                    .into_iter()
                    .map(|s| s.value)
                    .collect();
                (name.to_string(), values)
            })
            .collect();

        Ok(DashboardSnapshot {
            real_time,
            alerts: self.ledger.active(),
            trends,
            health: self.health_from(&thresholds),
        })
    }

    fn health_from(&self, thresholds: &[Threshold]) -> HealthSummary {
        let readings: Vec<_> = thresholds
            .iter()
            .filter_map(|t| {
                self.metrics
                    .latest(&t.metric)
                    .map(|sample| (t.clone(), sample))
            })
            .collect();
        HealthScorer::score(&readings, &self.ledger.active())
    }
}
