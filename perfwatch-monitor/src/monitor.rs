//! [`PerformanceMonitor`] owns the threshold table, metric store, alert
//! ledger, and periodic collector, and exposes the recording and read API.
//!
//! Recording never fails or blocks on I/O: samples land in memory, breaches
//! are logged, and alert persistence is queued to a background writer.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::json;
use tokio::runtime::Handle;
use tracing::Instrument;

use perfwatch_core::config::MonitorConfig;
use perfwatch_core::constants::{metrics, VERSION};
use perfwatch_core::errors::{PerfwatchError, PerfwatchResult};
use perfwatch_core::models::{
    Alert, DashboardSnapshot, HealthSummary, MetricUnit, Sample, SampleContext, Threshold,
    ThresholdUpdate,
};
use perfwatch_core::traits::{IDocumentStore, IMemoryProbe};

use crate::alerts::AlertLedger;
use crate::collector::{CollectorState, CollectorTick, PeriodicCollector, ProcessMemoryProbe};
use crate::dashboard::DashboardAssembler;
use crate::evaluator;
use crate::store::MetricStore;
use crate::thresholds::ThresholdTable;
use crate::tracing_setup::events;

/// State shared between the foreground API and the collector task.
struct MonitorCore {
    config: MonitorConfig,
    thresholds: ThresholdTable,
    metrics: MetricStore,
    ledger: AlertLedger,
    probe: Arc<dyn IMemoryProbe>,
    /// Serializes derive-then-append for `cache_hit_rate`, keeping that
    /// series chronological and its latest value current with the window.
    cache_rate_gate: Mutex<()>,
    /// Same for `error_rate`.
    error_rate_gate: Mutex<()>,
}

impl MonitorCore {
    fn record(&self, sample: Sample) -> Option<Alert> {
        if !sample.value.is_finite() {
            events::sample_rejected(&sample.name, sample.value);
            return None;
        }
        let _span = crate::record_span!(sample.name).entered();
        let threshold = self.thresholds.get(&sample.name);
        self.metrics.append(sample.clone());
        let breach = evaluator::evaluate(&sample, threshold.as_ref())?;
        Some(self.ledger.create(&sample, breach.level, breach.bound))
    }

    fn assembler(&self) -> DashboardAssembler<'_> {
        DashboardAssembler::new(&self.metrics, &self.thresholds, &self.ledger)
    }
}

impl CollectorTick for MonitorCore {
    fn tick(&self) {
        match self.probe.resident_bytes() {
            Some(bytes) => {
                self.record(Sample::new(
                    metrics::MEMORY_USAGE,
                    bytes as f64,
                    MetricUnit::Bytes,
                ));
            }
            None => tracing::debug!("memory probe returned no reading"),
        }

        let cutoff = chrono::Utc::now().timestamp_millis() - self.config.retention_ms();
        let removed = self.metrics.prune_before(cutoff);
        if removed > 0 {
            events::samples_pruned(removed, cutoff);
        }
    }
}

/// The performance monitoring and alerting engine.
///
/// Build one per host with [`PerformanceMonitor::start`] and call
/// [`PerformanceMonitor::destroy`] (or drop it) to stop the collector.
pub struct PerformanceMonitor {
    core: Arc<MonitorCore>,
    collector: PeriodicCollector,
}

impl PerformanceMonitor {
    /// Start a monitor that samples this process's memory.
    ///
    /// Must be called from within a tokio runtime, which hosts the collector
    /// and the persistence writer.
    pub fn start(config: MonitorConfig, store: Arc<dyn IDocumentStore>) -> PerfwatchResult<Self> {
        Self::start_with_probe(config, store, Arc::new(ProcessMemoryProbe::new()))
    }

    /// Start a monitor with a caller-supplied memory probe.
    pub fn start_with_probe(
        config: MonitorConfig,
        store: Arc<dyn IDocumentStore>,
        probe: Arc<dyn IMemoryProbe>,
    ) -> PerfwatchResult<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| PerfwatchError::RuntimeUnavailable)?;

        let core = Arc::new(MonitorCore {
            thresholds: ThresholdTable::from_config(&config),
            metrics: MetricStore::from_config(&config),
            ledger: AlertLedger::new(
                &runtime,
                store,
                config.alert_collection.clone(),
                config.persistence_queue_capacity,
            ),
            probe,
            config,
            cache_rate_gate: Mutex::new(()),
            error_rate_gate: Mutex::new(()),
        });
        let collector = PeriodicCollector::start(
            &runtime,
            core.config.collection_interval(),
            Arc::clone(&core),
        );

        tracing::info!(
            version = VERSION,
            interval_secs = core.config.collection_interval_secs,
            retention_secs = core.config.retention_secs,
            "performance monitor started"
        );
        Ok(Self { core, collector })
    }

    // --- Recording ---

    /// Record a sample. Returns the alert it raised, if any.
    pub fn record_metric(
        &self,
        name: &str,
        value: f64,
        unit: MetricUnit,
        context: Option<SampleContext>,
    ) -> Option<Alert> {
        let sample = Sample::new(name, value, unit).with_context(context.unwrap_or_default());
        self.core.record(sample)
    }

    /// Record one extraction run's duration.
    pub fn record_extraction_time(
        &self,
        duration_ms: f64,
        context_types: &[String],
        success: bool,
    ) -> Option<Alert> {
        let mut context = SampleContext::new();
        context.insert("context_types".into(), json!(context_types));
        context.insert("success".into(), json!(success));
        self.record_metric(metrics::EXTRACTION_TIME, duration_ms, MetricUnit::Ms, Some(context))
    }

    pub fn record_memory_usage(&self, bytes: u64) -> Option<Alert> {
        self.record_metric(metrics::MEMORY_USAGE, bytes as f64, MetricUnit::Bytes, None)
    }

    /// Record a cache hit or miss; emits one `cache_hit_rate` sample per call.
    pub fn record_cache_hit(&self, hit: bool) -> Option<Alert> {
        let _gate = self
            .core
            .cache_rate_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = chrono::Utc::now().timestamp_millis();
        let rate = self.core.metrics.observe_cache_operation(hit, now);
        self.core.record(rate)
    }

    /// Record an error event and the resulting trailing-window error rate.
    pub fn record_error(&self, error_type: &str, severity: &str) -> Option<Alert> {
        let _gate = self
            .core
            .error_rate_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = chrono::Utc::now().timestamp_millis();
        let window = self.core.config.error_rate_window_ms();
        let rate = self.core.metrics.observe_error(error_type, severity, now, window);
        self.core.record(rate)
    }

    pub fn record_active_contexts(&self, count: usize) -> Option<Alert> {
        self.record_metric(metrics::ACTIVE_CONTEXTS, count as f64, MetricUnit::Count, None)
    }

    pub fn record_dom_observation_lag(&self, lag_ms: f64) -> Option<Alert> {
        self.record_metric(metrics::DOM_OBSERVATION_LAG, lag_ms, MetricUnit::Ms, None)
    }

    /// Run one collector tick immediately: sample memory, prune stale history.
    pub fn collect_now(&self) {
        self.core.tick();
    }

    // --- Reads ---

    /// At most `limit` (default 100) recent samples, oldest first.
    /// Unknown metrics yield an empty list.
    pub fn metric_history(&self, name: &str, limit: Option<usize>) -> Vec<Sample> {
        let limit = limit.unwrap_or(self.core.config.default_history_limit);
        self.core.metrics.history(name, limit)
    }

    pub fn latest(&self, name: &str) -> Option<Sample> {
        self.core.metrics.latest(name)
    }

    pub fn metric_names(&self) -> Vec<String> {
        self.core.metrics.names()
    }

    pub fn active_alerts(&self) -> Vec<Alert> {
        self.core.ledger.active()
    }

    pub fn threshold(&self, metric: &str) -> Option<Threshold> {
        self.core.thresholds.get(metric)
    }

    pub fn thresholds(&self) -> PerfwatchResult<Vec<Threshold>> {
        self.core.thresholds.snapshot()
    }

    pub fn health(&self) -> PerfwatchResult<HealthSummary> {
        self.core.assembler().health()
    }

    /// Compose the dashboard using the configured trend window.
    pub async fn dashboard(&self) -> PerfwatchResult<DashboardSnapshot> {
        self.dashboard_with_window(self.core.config.trend_window).await
    }

    /// Compose the dashboard with a caller-chosen trend window.
    pub async fn dashboard_with_window(
        &self,
        trend_window: usize,
    ) -> PerfwatchResult<DashboardSnapshot> {
        self.core.assembler().assemble(trend_window)
    }

    /// Durable alert history, newest first (default limit 50).
    /// Store failures yield an empty list.
    pub async fn alerts_history(&self, limit: Option<usize>) -> Vec<Alert> {
        let limit = limit.unwrap_or(self.core.config.default_alert_history_limit);
        self.core
            .ledger
            .history(limit)
            .instrument(crate::alert_history_span!(limit))
            .await
    }

    /// Latest values, active alert count, and health as JSON, for hosts that
    /// persist a final snapshot at shutdown.
    pub fn metrics_snapshot(&self) -> PerfwatchResult<serde_json::Value> {
        let latest: serde_json::Map<String, serde_json::Value> = self
            .core
            .metrics
            .latest_all()
            .into_iter()
            .map(|s| (s.name, json!(s.value)))
            .collect();
        let health = serde_json::to_value(self.health()?)?;
        Ok(json!({
            "latest": latest,
            "active_alerts": self.core.ledger.active_count(),
            "health": health,
        }))
    }

    // --- Mutation ---

    /// Partially update a registered threshold. Unknown metrics are logged
    /// and ignored.
    pub fn update_threshold(&self, metric: &str, update: ThresholdUpdate) -> bool {
        self.core.thresholds.update(metric, &update)
    }

    /// Resolve an active alert. Unknown ids are ignored.
    pub fn resolve_alert(&self, id: &str) -> Option<Alert> {
        self.core.ledger.resolve(id)
    }

    /// Wait until queued alert writes have reached the durable store.
    pub async fn flush(&self) {
        self.core.ledger.flush().await;
    }

    // --- Lifecycle ---

    pub fn collector_state(&self) -> CollectorState {
        self.collector.state()
    }

    /// Stop the periodic collector. No tick fires after this returns.
    /// Calling it again is a no-op.
    pub fn destroy(&self) {
        if self.collector.stop().is_some() {
            tracing::info!("performance monitor stopped");
        }
    }

    /// [`destroy`](Self::destroy) and wait for the collector task to finish.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.collector.stop() {
            let _ = handle.await;
            tracing::info!("performance monitor stopped");
        }
    }
}
