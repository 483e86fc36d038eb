//! Telemetry module
//!
//! Logging, metrics, and debounced calculation events

mod debounce;
mod events;
mod logging;
mod metrics;

pub use debounce::Debouncer;
pub use events::{CalculationEvent, LogSink, MemorySink, TelemetrySink, TrackerSink};
pub use logging::init_logging;
pub use metrics::{
    increment, init_metrics, record_latency, set_gauge, CounterMetric, GaugeMetric, LatencyMetric,
};

use crate::config::{ApiConfig, TelemetryConfig};
use std::sync::Arc;

/// Guard that cleans up telemetry on drop
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level, config.log_format)?;

    if let Some(port) = config.metrics_port {
        init_metrics(port)?;
    }

    Ok(TelemetryGuard { _priv: () })
}

/// Build the calculation event sink the configuration asks for
pub fn build_sink(
    config: &TelemetryConfig,
    api: &ApiConfig,
) -> anyhow::Result<Arc<dyn TelemetrySink>> {
    match &config.tracker_url {
        Some(url) => {
            let sink = TrackerSink::new(url.clone(), api.timeout())?;
            tracing::info!(url = %url, session_id = %sink.session_id(), "Tracking calculation events");
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(LogSink)),
    }
}
