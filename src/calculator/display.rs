//! Rendered calculator output
//!
//! Prices that cannot be computed are shown as a placeholder rather than as
//! "0.00", so an invalid input never looks like a real zero quote.

use crate::model::{format_price, FairValueQuote, NormalizedPrice, PriceTick};
use serde::Serialize;
use std::fmt;

/// Text form of one calculator state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDisplay {
    pub symbol: String,
    pub underlying_price: String,
    pub fx_rate: String,
    pub ratio: String,
    pub spread_pct: String,
    pub fair_mid: String,
    pub fair_bid: String,
    pub fair_ask: String,
}

/// Inputs needed to render a calculator state
#[derive(Debug, Clone, Copy)]
pub struct DisplayInputs<'a> {
    pub symbol: &'a str,
    pub currency: Option<&'a str>,
    pub underlying: NormalizedPrice,
    pub fx_rate: Option<f64>,
    pub quote: Option<&'a FairValueQuote>,
    pub tick: PriceTick,
    pub placeholder: &'a str,
}

impl QuoteDisplay {
    /// Render a calculator state, using the placeholder for unknown values
    pub fn render(inputs: DisplayInputs<'_>) -> Self {
        let placeholder = || inputs.placeholder.to_string();
        let currency = inputs.currency.unwrap_or_default();

        // Formatted from the unrounded price at the currency's own precision
        let underlying_price = inputs
            .underlying
            .pricing_value()
            .filter(|p| *p > 0.0)
            .and_then(|p| format_price(p, currency))
            .unwrap_or_else(placeholder);
        let fx_rate = inputs
            .fx_rate
            .filter(|fx| fx.is_finite() && *fx > 0.0)
            .map(|fx| format!("{:.4}", fx))
            .unwrap_or_else(placeholder);
        let ratio = inputs
            .quote
            .map(|q| q.ratio)
            .filter(|r| *r > 0.0)
            .map(|r| format!("{}:1", r))
            .unwrap_or_else(placeholder);
        let spread_pct = inputs
            .quote
            .map(|q| format!("{:.3}%", q.spread_fraction * 100.0))
            .unwrap_or_else(placeholder);

        let valid = inputs.quote.and_then(FairValueQuote::displayable);
        let price = |f: fn(&FairValueQuote) -> f64| {
            valid
                .map(|q| inputs.tick.format(f(q)))
                .unwrap_or_else(placeholder)
        };

        Self {
            symbol: inputs.symbol.to_string(),
            underlying_price,
            fx_rate,
            ratio,
            spread_pct,
            fair_mid: price(|q| q.fair_mid),
            fair_bid: price(|q| q.fair_bid),
            fair_ask: price(|q| q.fair_ask),
        }
    }
}

impl fmt::Display for QuoteDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.symbol)?;
        writeln!(f, "  Underlying: {}", self.underlying_price)?;
        writeln!(f, "  FX rate:    {}", self.fx_rate)?;
        writeln!(f, "  Ratio:      {}", self.ratio)?;
        writeln!(f, "  Spread:     {}", self.spread_pct)?;
        writeln!(f, "  Fair bid:   {}", self.fair_bid)?;
        writeln!(f, "  Fair mid:   {}", self.fair_mid)?;
        write!(f, "  Fair ask:   {}", self.fair_ask)
    }
}
