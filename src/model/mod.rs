//! Fair value model module
//!
//! Prices a depositary receipt from its underlying: converts the underlying
//! price into the DR's trading currency, divides by the conversion ratio and
//! quotes a bid/ask pair around the result using an estimated spread.

pub mod currency;
mod fair_value;
pub mod price;
mod ratio;
mod spread;

pub use currency::{currency_decimals, format_price, price_decimal};
pub use fair_value::RatioModel;
pub use price::{round_display, NormalizedPrice, PriceTick};
pub use ratio::parse_ratio;
pub use spread::{estimate_spread, LiquidityTier, SpreadEstimator};

use serde::{Deserialize, Serialize};

/// Parameters for fair value calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FairValueParams {
    /// Underlying price in its home currency (unrounded when available)
    pub underlying_price: f64,
    /// Quote currency per unit of underlying currency
    pub fx_rate: f64,
    /// DR units per underlying unit
    pub ratio: f64,
    /// Spread fraction around the mid, already clamped
    pub spread_fraction: f64,
}

impl FairValueParams {
    /// True when every input needed for a meaningful price is finite and
    /// strictly positive
    pub fn has_input(&self) -> bool {
        [self.underlying_price, self.fx_rate, self.ratio]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Calculated fair value quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FairValueQuote {
    /// Fair mid price, tick rounded
    pub fair_mid: f64,
    /// Fair bid price, tick rounded
    pub fair_bid: f64,
    /// Fair ask price, tick rounded
    pub fair_ask: f64,
    /// Spread fraction used for bid/ask
    pub spread_fraction: f64,
    /// DR units per underlying unit
    pub ratio: f64,
    /// Whether the inputs passed the validity gate
    #[serde(skip)]
    pub has_input: bool,
}

impl FairValueQuote {
    /// The quote to show, or `None` when it must be replaced by a placeholder
    pub fn displayable(&self) -> Option<&Self> {
        self.has_input.then_some(self)
    }
}

/// Trait for fair value model implementations
pub trait FairValueModel: Send + Sync {
    /// Calculate fair value given parameters
    fn calculate(&self, params: FairValueParams) -> FairValueQuote;
}
