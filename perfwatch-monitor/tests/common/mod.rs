//! Shared fakes for the monitor integration tests.
#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing_subscriber::fmt::MakeWriter;
use perfwatch_core::traits::{FindQuery, FindResult, IDocumentStore, IMemoryProbe};
use perfwatch_core::{MemoryDocumentStore, MonitorConfig, StoreError};
use perfwatch_monitor::PerformanceMonitor;

/// A store whose every call fails.
pub struct FailingStore;

fn outage() -> StoreError {
    StoreError::Backend {
        reason: "store offline".into(),
    }
}

#[async_trait]
impl IDocumentStore for FailingStore {
    async fn create(&self, _: &str, _: &str, _: serde_json::Value, _: bool) -> Result<(), StoreError> {
        Err(outage())
    }

    async fn update(&self, _: &str, _: &str, _: serde_json::Value) -> Result<(), StoreError> {
        Err(outage())
    }

    async fn find(&self, _: FindQuery) -> Result<FindResult, StoreError> {
        Err(outage())
    }

    async fn get(&self, _: &str, _: &str) -> Result<serde_json::Value, StoreError> {
        Err(outage())
    }

    async fn delete(&self, _: &str, _: &str) -> Result<(), StoreError> {
        Err(outage())
    }
}

/// A probe that reports a fixed reading and counts how often it was asked.
pub struct CountingProbe {
    pub reading: Option<u64>,
    pub calls: AtomicUsize,
}

impl CountingProbe {
    pub fn new(reading: Option<u64>) -> Arc<Self> {
        Arc::new(Self {
            reading,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IMemoryProbe for CountingProbe {
    fn resident_bytes(&self) -> Option<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reading
    }
}

/// Monitor over an in-memory store with a silent probe.
pub fn monitor() -> (PerformanceMonitor, Arc<MemoryDocumentStore>) {
    monitor_with(MonitorConfig::default())
}

pub fn monitor_with(config: MonitorConfig) -> (PerformanceMonitor, Arc<MemoryDocumentStore>) {
    let store = Arc::new(MemoryDocumentStore::new());
    let monitor = PerformanceMonitor::start_with_probe(
        config,
        store.clone(),
        CountingProbe::new(None),
    )
    .expect("monitor should start inside a runtime");
    (monitor, store)
}

/// An in-memory store whose writes wait until [`GatedStore::open`] is called.
pub struct GatedStore {
    inner: MemoryDocumentStore,
    gate: Semaphore,
}

impl GatedStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryDocumentStore::new(),
            gate: Semaphore::new(0),
        })
    }

    pub fn open(&self) {
        self.gate.add_permits(64);
    }

    async fn pass(&self) {
        let _permit = self.gate.acquire().await;
    }
}

#[async_trait]
impl IDocumentStore for GatedStore {
    async fn create(
        &self,
        collection: &str,
        id: &str,
        document: serde_json::Value,
        overwrite: bool,
    ) -> Result<(), StoreError> {
        self.pass().await;
        self.inner.create(collection, id, document, overwrite).await
    }

    async fn update(&self, collection: &str, id: &str, patch: serde_json::Value) -> Result<(), StoreError> {
        self.pass().await;
        self.inner.update(collection, id, patch).await
    }

    async fn find(&self, query: FindQuery) -> Result<FindResult, StoreError> {
        self.inner.find(query).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<serde_json::Value, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.inner.delete(collection, id).await
    }
}

/// Collects JSON-formatted log lines in memory.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// A DEBUG-level JSON subscriber writing into this capture.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(self.clone())
            .finish()
    }

    pub fn records(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    /// Records whose `fields.event` equals `event`.
    pub fn events(&self, event: &str) -> Vec<serde_json::Value> {
        self.records()
            .into_iter()
            .filter(|r| r["fields"]["event"] == event)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
