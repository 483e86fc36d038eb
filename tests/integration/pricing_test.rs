//! Integration tests for the pricing pipeline

use dr_fair_value::dr::{DrQuote, UnderlyingSnapshot};
use dr_fair_value::model::{
    estimate_spread, format_price, parse_ratio, FairValueModel, FairValueParams, PriceTick,
    RatioModel,
};

fn price_row(row: &DrQuote, snapshot: &UnderlyingSnapshot) -> dr_fair_value::model::FairValueQuote {
    RatioModel::default().calculate(FairValueParams {
        underlying_price: snapshot.price().pricing_value().unwrap_or(0.0),
        fx_rate: snapshot.fx_rate.unwrap_or(0.0),
        ratio: row.ratio(),
        spread_fraction: estimate_spread(row.bid(), row.offer(), row.traded_value()),
    })
}

#[test]
fn test_reference_example_from_wire_data() {
    let row: DrQuote = serde_json::from_str(
        r#"{"symbol": "AAPL80", "conversionRatio": "5:1", "bidPrice": 10.90, "offerPrice": 10.95}"#,
    )
    .unwrap();
    let snapshot: UnderlyingSnapshot = serde_json::from_str(
        r#"{"currency": "USD", "underlying_price_raw": 150.0, "fx_rate": 36.5}"#,
    )
    .unwrap();

    let quote = price_row(&row, &snapshot);

    let spread = (10.95 - 10.90) / 10.925;
    assert!((quote.spread_fraction - spread).abs() < 1e-12);
    assert_eq!(quote.fair_mid, 1095.00);
    assert_eq!(quote.fair_bid, 1092.49);
    assert_eq!(quote.fair_ask, 1097.51);

    let json = serde_json::to_value(quote).unwrap();
    assert_eq!(json["fairMid"], 1095.0);
    assert_eq!(json["spreadFraction"], quote.spread_fraction);
    assert_eq!(json["ratio"], 5.0);
}

#[test]
fn test_raw_price_used_for_pricing() {
    // Pricing on the rounded 100.00 would give 730.00
    let row = DrQuote {
        conversion_ratio: Some("5:1".to_string()),
        ..DrQuote::new("X80")
    };
    let snapshot = UnderlyingSnapshot {
        currency: Some("USD".to_string()),
        underlying_price_raw: Some(99.995),
        underlying_price: Some(100.0),
        fx_rate: Some(36.5),
    };

    let price = snapshot.price();
    assert_eq!(price.display, Some(100.0));
    assert_eq!(format_price(price.display.unwrap(), "USD").as_deref(), Some("100.00"));

    let quote = price_row(&row, &snapshot);
    assert_eq!(quote.fair_mid, PriceTick::default().round(99.995 * 36.5 / 5.0));
    assert_eq!(quote.fair_mid, 729.96);
}

#[test]
fn test_reciprocal_ratio_row() {
    assert_eq!(parse_ratio(None, Some(0.25)), 4.0);

    let row = DrQuote {
        conversion_ratio_r: Some(0.25),
        total_value: Some(60_000_000.0),
        ..DrQuote::new("TENCENT80")
    };
    let snapshot = UnderlyingSnapshot {
        underlying_price_raw: Some(400.0),
        fx_rate: Some(4.6),
        ..Default::default()
    };

    let quote = price_row(&row, &snapshot);
    assert_eq!(quote.spread_fraction, 0.001);
    assert_eq!(quote.fair_mid, 460.0);
    assert_eq!(quote.fair_bid, 459.77);
    assert_eq!(quote.fair_ask, 460.23);
}

#[test]
fn test_unpriceable_rows_are_suppressed() {
    let snapshot = UnderlyingSnapshot {
        underlying_price_raw: Some(150.0),
        fx_rate: Some(36.5),
        ..Default::default()
    };

    for ratio in ["", "n/a", "0:1", ":1"] {
        let row = DrQuote {
            conversion_ratio: Some(ratio.to_string()),
            ..DrQuote::new("BAD80")
        };
        let quote = price_row(&row, &snapshot);
        assert!(!quote.has_input, "ratio {ratio:?} should not price");
        assert_eq!(quote.fair_mid, 0.0);
    }

    let row = DrQuote {
        conversion_ratio: Some("5:1".to_string()),
        ..DrQuote::new("AAPL80")
    };
    let no_fx = UnderlyingSnapshot {
        fx_rate: None,
        ..snapshot.clone()
    };
    assert!(!price_row(&row, &no_fx).has_input);
}

#[test]
fn test_round_to_tick_idempotent_over_quotes() {
    let tick = PriceTick::default();
    let model = RatioModel::new(tick);
    for price in [0.37, 12.345, 150.0, 2_718.28] {
        for fx in [0.23, 4.6, 36.5] {
            let quote = model.calculate(FairValueParams {
                underlying_price: price,
                fx_rate: fx,
                ratio: 3.0,
                spread_fraction: 0.004,
            });
            assert_eq!(tick.round(quote.fair_bid), quote.fair_bid);
            assert_eq!(tick.round(quote.fair_mid), quote.fair_mid);
            assert_eq!(tick.round(quote.fair_ask), quote.fair_ask);
        }
    }
}
