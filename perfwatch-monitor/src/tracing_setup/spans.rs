//! Span definitions per operation: record, collect, dashboard, alert history.

/// Span names, stable for log and trace queries.
pub mod names {
    pub const RECORD: &str = "perfwatch.record";
    pub const COLLECT: &str = "perfwatch.collect";
    pub const DASHBOARD: &str = "perfwatch.dashboard";
    pub const ALERT_HISTORY: &str = "perfwatch.alert_history";
}

/// Create a span around a single metric recording.
#[macro_export]
macro_rules! record_span {
    ($metric:expr) => {
        tracing::debug_span!(
            $crate::tracing_setup::spans::names::RECORD,
            metric = %$metric
        )
    };
}

/// Create a span around one periodic collector tick.
#[macro_export]
macro_rules! collect_span {
    () => {
        tracing::debug_span!($crate::tracing_setup::spans::names::COLLECT)
    };
}

/// Create a span around dashboard assembly.
#[macro_export]
macro_rules! dashboard_span {
    ($trend_window:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::spans::names::DASHBOARD,
            trend_window = $trend_window
        )
    };
}

/// Create a span around an alert-history read.
#[macro_export]
macro_rules! alert_history_span {
    ($limit:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::spans::names::ALERT_HISTORY,
            limit = $limit
        )
    };
}
