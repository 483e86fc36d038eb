//! Configuration types for dr-fair-value

use crate::model::SpreadEstimator;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Upstream data service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// DR snapshot endpoint returning all DR rows
    #[serde(default = "default_snapshot_url")]
    pub snapshot_url: String,
    /// Realtime endpoint; the DR symbol is appended as a path segment
    #[serde(default = "default_realtime_url")]
    pub realtime_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_snapshot_url() -> String {
    "http://localhost:8000/api/dr".to_string()
}
fn default_realtime_url() -> String {
    "http://localhost:8000/api/dr/realtime".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            snapshot_url: default_snapshot_url(),
            realtime_url: default_realtime_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fair value pricing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Decimal places of the DR price tick (2 = 0.01)
    #[serde(default = "default_tick_decimals")]
    pub tick_decimals: u32,
    /// Spread bounds and liquidity tiers
    #[serde(default)]
    pub spread: SpreadEstimator,
}

fn default_tick_decimals() -> u32 {
    2
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tick_decimals: default_tick_decimals(),
            spread: SpreadEstimator::default(),
        }
    }
}

/// Calculator session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalculatorConfig {
    /// Quote must be stable this long before a telemetry event is sent
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Realtime refresh interval in watch mode
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Text shown instead of prices that cannot be computed
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_debounce_ms() -> u64 {
    2000
}
fn default_refresh_interval_secs() -> u64 {
    5
}
fn default_placeholder() -> String {
    "-".to_string()
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            refresh_interval_secs: default_refresh_interval_secs(),
            placeholder: default_placeholder(),
        }
    }
}

impl CalculatorConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; disabled when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
    /// Analytics tracker endpoint for calculation events; log-only when unset
    #[serde(default)]
    pub tracker_url: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
            tracker_url: None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
