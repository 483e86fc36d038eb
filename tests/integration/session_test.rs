//! Integration tests for the calculator session

use async_trait::async_trait;
use dr_fair_value::calculator::CalculatorSession;
use dr_fair_value::config::{CalculatorConfig, PricingConfig};
use dr_fair_value::dr::{DrDataSource, DrQuote, FetchError, UnderlyingSnapshot};
use dr_fair_value::telemetry::MemorySink;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Source answering each symbol after a fixed delay
struct DelayedSource {
    rows: Vec<DrQuote>,
    realtime: HashMap<String, (Duration, UnderlyingSnapshot)>,
}

#[async_trait]
impl DrDataSource for DelayedSource {
    async fn fetch_snapshot(&self) -> Result<Vec<DrQuote>, FetchError> {
        Ok(self.rows.clone())
    }

    async fn fetch_realtime(&self, symbol: &str) -> Result<UnderlyingSnapshot, FetchError> {
        let (delay, snapshot) = self
            .realtime
            .get(symbol)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(symbol.to_string()))?;
        tokio::time::sleep(delay).await;
        Ok(snapshot)
    }
}

fn source() -> DelayedSource {
    let rows = vec![
        DrQuote {
            conversion_ratio: Some("5:1".to_string()),
            bid_price: Some(10.90),
            offer_price: Some(10.95),
            ..DrQuote::new("AAPL80")
        },
        DrQuote {
            conversion_ratio: Some("10:1".to_string()),
            total_value: Some(60_000_000.0),
            ..DrQuote::new("MSFT80")
        },
    ];
    let snapshot = |price: f64| UnderlyingSnapshot {
        currency: Some("USD".to_string()),
        underlying_price_raw: Some(price),
        underlying_price: None,
        fx_rate: Some(36.5),
    };
    let realtime = HashMap::from([
        ("AAPL80".to_string(), (Duration::from_secs(3), snapshot(150.0))),
        ("MSFT80".to_string(), (Duration::from_millis(100), snapshot(400.0))),
    ]);
    DelayedSource { rows, realtime }
}

fn session(sink: &MemorySink) -> CalculatorSession {
    CalculatorSession::new(
        &PricingConfig::default(),
        &CalculatorConfig::default(),
        Arc::new(sink.clone()),
    )
}

#[tokio::test]
async fn test_fetch_dr_by_symbol() {
    let source = source();
    let row = source.fetch_dr("msft80").await.unwrap();
    assert_eq!(row.symbol, "MSFT80");

    let missing = source.fetch_dr("NOPE80").await;
    assert!(matches!(missing, Err(FetchError::NotFound(_))));
}

#[tokio::test(start_paused = true)]
async fn test_slow_response_for_previous_dr_does_not_overwrite() {
    let source = Arc::new(source());
    let sink = MemorySink::new();
    let mut session = session(&sink);

    // Select AAPL (slow), then MSFT (fast) before AAPL's data arrives
    let aapl = session.select(source.fetch_dr("AAPL80").await.unwrap());
    let slow = {
        let source = source.clone();
        tokio::spawn(async move {
            let result = source.fetch_realtime(aapl.symbol()).await;
            (aapl, result)
        })
    };

    let msft = session.select(source.fetch_dr("MSFT80").await.unwrap());
    let snapshot = source.fetch_realtime(msft.symbol()).await.unwrap();
    assert!(session.apply_realtime(&msft, snapshot));

    let (aapl, result) = slow.await.unwrap();
    assert!(!session.apply_realtime(&aapl, result.unwrap()));

    let quote = session.quote().unwrap();
    assert_eq!(session.selected().unwrap().symbol, "MSFT80");
    assert_eq!(quote.fair_mid, 1460.0);
    assert_eq!(quote.spread_fraction, 0.001);
    assert_eq!(quote.fair_bid, 1459.27);
    assert_eq!(quote.fair_ask, 1460.73);

    session.settle().await;
    let events = sink.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].symbol, "MSFT80");
    assert_eq!(events[0].fair_bid, "1459.27");
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_emits_single_event() {
    let source = source();
    let sink = MemorySink::new();
    let mut session = session(&sink);

    session.select(source.fetch_dr("AAPL80").await.unwrap());
    session.refresh(&source).await;

    // Keystrokes: 1, 15, 150 with short pauses
    for price in [1.0, 15.0, 150.0] {
        session.set_underlying_price(Some(price));
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    assert!(sink.events().await.is_empty());

    tokio::time::sleep(Duration::from_secs(2)).await;
    let events = sink.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].underlying_price, 150.0);
    assert_eq!(events[0].fair_bid, "1092.49");
    assert_eq!(events[0].fair_ask, "1097.51");
}

#[tokio::test(start_paused = true)]
async fn test_display_follows_inputs() {
    let source = source();
    let sink = MemorySink::new();
    let mut session = session(&sink);

    session.select(source.fetch_dr("AAPL80").await.unwrap());
    assert!(session.is_loading());
    assert_eq!(session.display().fair_mid, "-");

    session.refresh(&source).await;
    let display = session.display();
    assert_eq!(display.symbol, "AAPL80");
    assert_eq!(display.underlying_price, "150.00");
    assert_eq!(display.fair_bid, "1092.49");
    assert_eq!(display.fair_mid, "1095.00");
    assert_eq!(display.fair_ask, "1097.51");

    session.set_underlying_price(None);
    assert_eq!(session.display().fair_mid, "-");
}
