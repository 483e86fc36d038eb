//! Prometheus metrics

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// DR snapshot request
    SnapshotFetch,
    /// Realtime underlying/FX request
    RealtimeFetch,
    /// Tracker event delivery
    TrackerPost,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Quotes computed with valid inputs
    QuotesComputed,
    /// Quotes suppressed by the validity gate
    QuotesSuppressed,
    /// Realtime responses dropped because a newer DR was selected
    StaleResponses,
    /// Failed realtime fetches
    FetchFailures,
    /// Calculation events delivered to the sink
    EventsSent,
    /// Calculation events the sink rejected
    EventsFailed,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Spread fraction of the last computed quote
    SpreadFraction,
}

/// Start the Prometheus scrape endpoint on the given port
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::SnapshotFetch => "drfv_snapshot_fetch_latency_ms",
        LatencyMetric::RealtimeFetch => "drfv_realtime_fetch_latency_ms",
        LatencyMetric::TrackerPost => "drfv_tracker_post_latency_ms",
    };

    metrics::histogram!(metric_name).record(duration.as_secs_f64() * 1000.0);
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    let metric_name = match metric {
        CounterMetric::QuotesComputed => "drfv_quotes_computed_total",
        CounterMetric::QuotesSuppressed => "drfv_quotes_suppressed_total",
        CounterMetric::StaleResponses => "drfv_stale_responses_total",
        CounterMetric::FetchFailures => "drfv_fetch_failures_total",
        CounterMetric::EventsSent => "drfv_calculation_events_sent_total",
        CounterMetric::EventsFailed => "drfv_calculation_events_failed_total",
    };

    metrics::counter!(metric_name).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::SpreadFraction => "drfv_spread_fraction",
    };

    metrics::gauge!(metric_name).set(value);
}
