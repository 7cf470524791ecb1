//! Alert lifecycle, durable history, health scoring and dashboard reads.

mod common;

use std::sync::Arc;

use perfwatch_core::constants::metrics;
use perfwatch_core::models::{AlertLevel, HealthStatus, MetricUnit};
use perfwatch_core::traits::IDocumentStore;
use perfwatch_core::MonitorConfig;
use perfwatch_monitor::PerformanceMonitor;

use common::{monitor, CountingProbe, FailingStore, GatedStore};

#[tokio::test]
async fn breach_is_persisted_after_flush() {
    let (monitor, store) = monitor();
    let alert = monitor.record_extraction_time(9000.0, &[], false).unwrap();
    monitor.flush().await;

    let history = monitor.alerts_history(None).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, alert.id);
    assert!(!history[0].resolved);

    let doc = store.get("performance_alerts", &alert.id).await.unwrap();
    assert_eq!(doc["level"], "critical");
    assert_eq!(doc["metric"], metrics::EXTRACTION_TIME);
}

#[tokio::test]
async fn resolving_updates_store_and_active_set() {
    let (monitor, _) = monitor();
    let alert = monitor.record_active_contexts(150).unwrap();
    assert_eq!(monitor.active_alerts().len(), 1);

    let resolved = monitor.resolve_alert(&alert.id).unwrap();
    assert!(resolved.resolved);
    assert!(resolved.resolved_at.is_some());
    assert!(monitor.active_alerts().is_empty());
    assert!(monitor.resolve_alert(&alert.id).is_none());

    monitor.flush().await;
    let history = monitor.alerts_history(None).await;
    assert_eq!(history.len(), 1);
    assert!(history[0].resolved);
    assert_eq!(history[0].resolved_at, resolved.resolved_at);
}

#[tokio::test]
async fn history_is_newest_first_and_limited() {
    let (monitor, _) = monitor();
    for _ in 0..3 {
        monitor.record_dom_observation_lag(2000.0);
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    monitor.flush().await;

    let history = monitor.alerts_history(Some(2)).await;
    assert_eq!(history.len(), 2);
    assert!(history[0].timestamp >= history[1].timestamp);
    assert_eq!(monitor.alerts_history(None).await.len(), 3);
}

#[tokio::test]
async fn store_outage_keeps_alerts_in_memory() {
    let store: Arc<dyn IDocumentStore> = Arc::new(FailingStore);
    let monitor = PerformanceMonitor::start_with_probe(
        MonitorConfig::default(),
        store,
        CountingProbe::new(None),
    )
    .unwrap();

    let alert = monitor.record_extraction_time(5000.0, &[], true).unwrap();
    monitor.flush().await;

    assert_eq!(monitor.active_alerts().len(), 1);
    assert!(monitor.alerts_history(None).await.is_empty());
    assert!(monitor.resolve_alert(&alert.id).is_some());
    monitor.flush().await;
}

#[tokio::test]
async fn quiet_monitor_is_healthy() {
    let (monitor, _) = monitor();
    monitor.record_extraction_time(500.0, &[], true);
    let health = monitor.health().unwrap();
    assert_eq!(health.status, HealthStatus::Healthy);
    assert_eq!(health.score, 100);
    assert!(health.issues.is_empty());
}

#[tokio::test]
async fn single_warning_degrades_to_warning() {
    let (monitor, _) = monitor();
    monitor.record_active_contexts(150);
    let health = monitor.health().unwrap();
    assert_eq!(health.score, 75);
    assert_eq!(health.status, HealthStatus::Warning);
    assert_eq!(health.issues, vec!["Warning: High active_contexts (150 count)".to_string()]);
}

#[tokio::test]
async fn critical_breach_degrades_to_critical() {
    let (monitor, _) = monitor();
    monitor.record_extraction_time(10_000.0, &[], true);
    let health = monitor.health().unwrap();
    assert_eq!(health.score, 50);
    assert_eq!(health.status, HealthStatus::Critical);
}

#[tokio::test]
async fn resolving_restores_alert_penalty() {
    let (monitor, _) = monitor();
    let alert = monitor.record_active_contexts(150).unwrap();
    monitor.resolve_alert(&alert.id);
    assert_eq!(monitor.health().unwrap().score, 85);
}

#[tokio::test]
async fn dashboard_composes_every_section() {
    let (monitor, _) = monitor();
    for i in 0..30 {
        monitor.record_extraction_time(i as f64, &[], true);
    }
    monitor.record_memory_usage(1024);
    monitor.record_metric("queue_depth", 3.0, MetricUnit::Count, None);

    let dashboard = monitor.dashboard_with_window(24).await.unwrap();

    let expected: Vec<f64> = (6..30).map(|i| i as f64).collect();
    assert_eq!(dashboard.trends[metrics::EXTRACTION_TIME], expected);
    assert_eq!(dashboard.trends[metrics::MEMORY_USAGE], vec![1024.0]);
    assert!(dashboard.trends[metrics::CACHE_HIT_RATE].is_empty());
    assert!(dashboard.trends[metrics::ERROR_RATE].is_empty());
    assert_eq!(dashboard.trends.len(), 4);

    assert_eq!(dashboard.real_time[metrics::EXTRACTION_TIME].value, 29.0);
    assert!(dashboard.real_time.contains_key("queue_depth"));
    assert!(dashboard.alerts.is_empty());
    assert_eq!(dashboard.health.status, HealthStatus::Healthy);
}

#[tokio::test]
async fn dashboard_lists_active_alerts() {
    let (monitor, _) = monitor();
    monitor.record_memory_usage(80 * 1024 * 1024);
    let dashboard = monitor.dashboard().await.unwrap();
    assert_eq!(dashboard.alerts.len(), 1);
    assert_eq!(dashboard.alerts[0].level, AlertLevel::Warning);
    assert_eq!(dashboard.health.status, HealthStatus::Warning);
}

#[tokio::test]
async fn snapshot_reports_latest_values() {
    let (monitor, _) = monitor();
    monitor.record_extraction_time(4000.0, &[], true);
    let snapshot = monitor.metrics_snapshot().unwrap();
    assert_eq!(snapshot["latest"][metrics::EXTRACTION_TIME], 4000.0);
    assert_eq!(snapshot["active_alerts"], 1);
    assert_eq!(snapshot["health"]["status"], "warning");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_producers_keep_history_bounded() {
    let (monitor, _) = monitor();
    let monitor = Arc::new(monitor);

    let mut tasks = Vec::new();
    for producer in 0..8 {
        let monitor = Arc::clone(&monitor);
        tasks.push(tokio::spawn(async move {
            for i in 0..50 {
                let value = (producer * 1000 + i) as f64;
                monitor.record_metric("load", value, MetricUnit::Count, None);
                if i % 10 == 0 {
                    monitor.collect_now();
                }
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let history = monitor.metric_history("load", None);
    assert_eq!(history.len(), 100);
    let mut values: Vec<f64> = history.iter().map(|s| s.value).collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    assert_eq!(values.len(), 100);
}

#[tokio::test]
async fn full_persistence_queue_drops_writes_but_keeps_alerts() {
    let store = GatedStore::new();
    let config = MonitorConfig {
        persistence_queue_capacity: 2,
        ..Default::default()
    };
    let monitor =
        PerformanceMonitor::start_with_probe(config, store.clone(), CountingProbe::new(None))
            .unwrap();

    // The writer cannot run between these calls on a current-thread runtime.
    for _ in 0..10 {
        assert!(monitor.record_active_contexts(500).is_some());
    }
    assert_eq!(monitor.active_alerts().len(), 10);

    store.open();
    monitor.flush().await;

    assert_eq!(monitor.alerts_history(None).await.len(), 2);
    assert_eq!(monitor.active_alerts().len(), 10);
}
