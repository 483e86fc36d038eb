//! Ratio-based cross-currency fair value model
//!
//! fair_mid = underlying_price * fx_rate / ratio
//! fair_bid = tick(fair_mid * (1 - spread / 2))
//! fair_ask = tick(fair_mid * (1 + spread / 2))

use super::{FairValueModel, FairValueParams, FairValueQuote, PriceTick};

/// Fair value model pricing a DR off its underlying
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioModel {
    tick: PriceTick,
}

impl RatioModel {
    /// Create a model quoting at the given price tick
    pub fn new(tick: PriceTick) -> Self {
        Self { tick }
    }

    /// Price tick used for the final rounding
    pub fn tick(&self) -> PriceTick {
        self.tick
    }
}

impl FairValueModel for RatioModel {
    fn calculate(&self, params: FairValueParams) -> FairValueQuote {
        // Unrounded mid; rounding happens once, at the tick step below.
        // An overflowing product counts as missing input.
        let mid = if params.has_input() {
            params.underlying_price * params.fx_rate / params.ratio
        } else {
            0.0
        };
        let has_input = mid.is_finite() && mid > 0.0;
        let mid = if has_input { mid } else { 0.0 };
        let half_spread = params.spread_fraction / 2.0;

        FairValueQuote {
            fair_mid: self.tick.round(mid),
            fair_bid: self.tick.round(mid * (1.0 - half_spread)),
            fair_ask: self.tick.round(mid * (1.0 + half_spread)),
            spread_fraction: params.spread_fraction,
            ratio: if params.ratio.is_finite() && params.ratio > 0.0 {
                params.ratio
            } else {
                0.0
            },
            has_input,
        }
    }
}
