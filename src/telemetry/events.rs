//! Calculation events and the sinks that record them

use super::{increment, record_latency, CounterMetric, LatencyMetric};
use crate::model::{FairValueQuote, PriceTick};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Payload sent when a fair value quote settles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationEvent {
    pub symbol: String,
    pub underlying_price: f64,
    pub fx_rate: f64,
    /// Fair bid formatted at the price tick
    pub fair_bid: String,
    /// Fair ask formatted at the price tick
    pub fair_ask: String,
}

impl CalculationEvent {
    /// Build the event for a computed quote
    pub fn new(
        symbol: impl Into<String>,
        underlying_price: f64,
        fx_rate: f64,
        quote: &FairValueQuote,
        tick: PriceTick,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            underlying_price,
            fx_rate,
            fair_bid: tick.format(quote.fair_bid),
            fair_ask: tick.format(quote.fair_ask),
        }
    }
}

/// Envelope posted to the analytics tracker
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackerEnvelope<'a> {
    event: &'static str,
    session_id: Uuid,
    timestamp: DateTime<Utc>,
    payload: &'a CalculationEvent,
}

/// Trait for calculation event sinks
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Record one settled calculation
    async fn record(&self, event: CalculationEvent) -> anyhow::Result<()>;
}

/// Sink that only writes events to the log
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl TelemetrySink for LogSink {
    async fn record(&self, event: CalculationEvent) -> anyhow::Result<()> {
        tracing::info!(
            symbol = %event.symbol,
            underlying_price = event.underlying_price,
            fx_rate = event.fx_rate,
            fair_bid = %event.fair_bid,
            fair_ask = %event.fair_ask,
            "DR calculation"
        );
        Ok(())
    }
}

/// Sink posting events to the analytics tracker service
pub struct TrackerSink {
    url: String,
    session_id: Uuid,
    client: Client,
}

impl TrackerSink {
    /// Create a tracker sink with a fresh session id
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            session_id: Uuid::new_v4(),
            client,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}

#[async_trait]
impl TelemetrySink for TrackerSink {
    async fn record(&self, event: CalculationEvent) -> anyhow::Result<()> {
        let envelope = TrackerEnvelope {
            event: "dr_calculation",
            session_id: self.session_id,
            timestamp: Utc::now(),
            payload: &event,
        };

        let started = Instant::now();
        let response = self.client.post(&self.url).json(&envelope).send().await?;
        record_latency(LatencyMetric::TrackerPost, started.elapsed());

        if !response.status().is_success() {
            anyhow::bail!("Tracker rejected event: {}", response.status());
        }

        tracing::debug!(symbol = %event.symbol, "Calculation event tracked");
        Ok(())
    }
}

/// Sink keeping events in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<RwLock<Vec<CalculationEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far
    pub async fn events(&self) -> Vec<CalculationEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl TelemetrySink for MemorySink {
    async fn record(&self, event: CalculationEvent) -> anyhow::Result<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}

/// Record through a sink, logging and counting the outcome
pub(crate) async fn deliver(sink: &dyn TelemetrySink, event: CalculationEvent) {
    let symbol = event.symbol.clone();
    match sink.record(event).await {
        Ok(()) => increment(CounterMetric::EventsSent),
        Err(e) => {
            increment(CounterMetric::EventsFailed);
            tracing::warn!(error = %e, symbol = %symbol, "Failed to record calculation event");
        }
    }
}
