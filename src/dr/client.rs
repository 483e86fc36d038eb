//! HTTP client for the DR snapshot and realtime services

use super::{DrDataSource, DrQuote, FetchError, UnderlyingSnapshot};
use crate::config::ApiConfig;
use crate::telemetry::{record_latency, LatencyMetric};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Instant;

/// Client for the DR snapshot and realtime REST services
pub struct DrClient {
    config: ApiConfig,
    client: Client,
}

impl DrClient {
    /// Create a new client from the API configuration
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, client })
    }

    /// URL of the realtime endpoint for one DR
    fn realtime_url(&self, symbol: &str) -> String {
        format!(
            "{}/{}",
            self.config.realtime_url.trim_end_matches('/'),
            symbol.trim()
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DrDataSource for DrClient {
    async fn fetch_snapshot(&self) -> Result<Vec<DrQuote>, FetchError> {
        let url = &self.config.snapshot_url;
        tracing::debug!(url = %url, "Fetching DR snapshot");

        let started = Instant::now();
        let rows: Vec<DrQuote> = self.get_json(url).await?;
        record_latency(LatencyMetric::SnapshotFetch, started.elapsed());

        tracing::debug!(rows = rows.len(), "DR snapshot received");
        Ok(rows)
    }

    async fn fetch_realtime(&self, symbol: &str) -> Result<UnderlyingSnapshot, FetchError> {
        let url = self.realtime_url(symbol);
        tracing::debug!(url = %url, symbol, "Fetching realtime underlying");

        let started = Instant::now();
        let snapshot = self.get_json(&url).await?;
        record_latency(LatencyMetric::RealtimeFetch, started.elapsed());

        Ok(snapshot)
    }
}
