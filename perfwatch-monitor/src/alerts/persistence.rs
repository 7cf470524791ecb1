//! Best-effort alert persistence on a single background writer.
//!
//! Jobs are applied in submission order, so an alert's resolve update never
//! reaches the store before its create. Failures are logged and dropped.
//! The queue is bounded: when the store falls behind, new create and
//! resolve jobs are dropped with a warning instead of blocking the caller.

use std::sync::Arc;

use serde_json::json;
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

use perfwatch_core::models::Alert;
use perfwatch_core::traits::IDocumentStore;

use crate::tracing_setup::events;

enum PersistJob {
    Create(Alert),
    Resolve { id: String, resolved_at: i64 },
    Flush(oneshot::Sender<()>),
}

/// Sender side of the writer task. Cloning shares the same writer.
#[derive(Clone)]
pub struct PersistenceQueue {
    tx: mpsc::Sender<PersistJob>,
}

impl PersistenceQueue {
    /// Spawn the writer on `runtime` with room for `capacity` pending jobs.
    /// It exits once every queue clone is dropped.
    pub fn spawn(
        runtime: &Handle,
        store: Arc<dyn IDocumentStore>,
        collection: String,
        capacity: usize,
    ) -> Self {
        let (tx, mut rx) = mpsc::channel::<PersistJob>(capacity.max(1));
        runtime.spawn(async move {
            while let Some(job) = rx.recv().await {
                match job {
                    PersistJob::Create(alert) => {
                        write_create(store.as_ref(), &collection, &alert).await;
                    }
                    PersistJob::Resolve { id, resolved_at } => {
                        let patch = json!({ "resolved": true, "resolved_at": resolved_at });
                        if let Err(e) = store.update(&collection, &id, patch).await {
                            events::persistence_failed("resolve", &id, &e);
                        }
                    }
                    PersistJob::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });
        Self { tx }
    }

    pub fn enqueue_create(&self, alert: Alert) {
        let id = alert.id.clone();
        self.offer("create", &id, PersistJob::Create(alert));
    }

    pub fn enqueue_resolve(&self, id: &str, resolved_at: i64) {
        let job = PersistJob::Resolve {
            id: id.to_string(),
            resolved_at,
        };
        self.offer("resolve", id, job);
    }

    fn offer(&self, operation: &str, alert_id: &str, job: PersistJob) {
        match self.tx.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => events::persistence_dropped(operation, alert_id),
            Err(TrySendError::Closed(_)) => {
                events::persistence_failed(operation, alert_id, &"writer stopped");
            }
        }
    }

    /// Wait until every job queued before this call has been applied.
    /// Waits for queue space when the writer is behind.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(PersistJob::Flush(done_tx)).await.is_ok() {
            let _ = done_rx.await;
        }
    }
}

async fn write_create(store: &dyn IDocumentStore, collection: &str, alert: &Alert) {
    let document = match serde_json::to_value(alert) {
        Ok(doc) => doc,
        Err(e) => {
            events::persistence_failed("create", &alert.id, &e);
            return;
        }
    };
    if let Err(e) = store.create(collection, &alert.id, document, false).await {
        events::persistence_failed("create", &alert.id, &e);
    }
}
