use perfwatch_core::config::ObservabilityConfig;
use perfwatch_monitor::tracing_setup::init_tracing;

#[test]
fn global_subscriber_installs_once() {
    let config = ObservabilityConfig::default();
    assert!(init_tracing(&config));
    assert!(!init_tracing(&config));
}
