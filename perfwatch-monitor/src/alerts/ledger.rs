//! The active-alert map plus its durable history.
//!
//! Every breach creates a fresh alert; alerts are not deduplicated per
//! (metric, level), so each breach event stays individually auditable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::runtime::Handle;

use perfwatch_core::models::{Alert, AlertLevel, Sample};
use perfwatch_core::traits::{FindQuery, IDocumentStore, SortOrder};

use super::PersistenceQueue;
use crate::tracing_setup::events;

pub struct AlertLedger {
    active: DashMap<String, Alert>,
    sequence: AtomicU64,
    collection: String,
    store: Arc<dyn IDocumentStore>,
    persistence: PersistenceQueue,
}

impl AlertLedger {
    /// Create a ledger whose persistence writer runs on `runtime` and holds
    /// at most `queue_capacity` pending writes.
    pub fn new(
        runtime: &Handle,
        store: Arc<dyn IDocumentStore>,
        collection: impl Into<String>,
        queue_capacity: usize,
    ) -> Self {
        let collection = collection.into();
        let persistence = PersistenceQueue::spawn(
            runtime,
            Arc::clone(&store),
            collection.clone(),
            queue_capacity,
        );
        Self {
            active: DashMap::new(),
            sequence: AtomicU64::new(0),
            collection,
            store,
            persistence,
        }
    }

    /// Raise an alert for `sample` and queue it for persistence.
    ///
    /// The in-memory alert is authoritative; a later persistence failure is
    /// only logged.
    pub fn create(&self, sample: &Sample, level: AlertLevel, bound: f64) -> Alert {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let alert = Alert {
            id: format!("{}_{}_{}_{}", sample.name, level, timestamp, seq),
            metric: sample.name.clone(),
            level,
            value: sample.value,
            threshold: bound,
            timestamp,
            resolved: false,
            resolved_at: None,
        };
        self.active.insert(alert.id.clone(), alert.clone());
        events::alert_raised(&alert, sample.unit, &sample.context);
        self.persistence.enqueue_create(alert.clone());
        alert
    }

    /// Mark an active alert resolved and drop it from the active set.
    /// Unknown ids are ignored.
    pub fn resolve(&self, id: &str) -> Option<Alert> {
        let (_, mut alert) = self.active.remove(id)?;
        let resolved_at = chrono::Utc::now().timestamp_millis();
        alert.resolved = true;
        alert.resolved_at = Some(resolved_at);
        events::alert_resolved(&alert);
        self.persistence.enqueue_resolve(id, resolved_at);
        Some(alert)
    }

    /// Every unresolved alert, oldest first.
    pub fn active(&self) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self.active.iter().map(|e| e.value().clone()).collect();
        alerts.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        alerts
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Durable alert history, newest first.
    ///
    /// A store failure is logged and yields an empty list. Documents that do
    /// not decode as alerts are skipped.
    pub async fn history(&self, limit: usize) -> Vec<Alert> {
        let query = FindQuery::new(self.collection.as_str(), limit)
            .sorted_by("timestamp", SortOrder::Desc);
        let page = match self.store.find(query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(
                    event = "alert_history_failed",
                    collection = %self.collection,
                    error = %e,
                    "failed to read alert history"
                );
                return Vec::new();
            }
        };
        page.items
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<Alert>(doc) {
                Ok(alert) => Some(alert),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed alert document");
                    None
                }
            })
            .collect()
    }

    /// Wait for every queued persistence job to reach the store.
    pub async fn flush(&self) {
        self.persistence.flush().await;
    }
}
