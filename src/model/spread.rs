//! Dynamic spread estimation
//!
//! Uses the quoted DR spread when the book has both sides, otherwise falls
//! back to a liquidity-tiered table keyed on total traded value. The result
//! is always clamped into `[min_spread, max_spread]`.

use serde::{Deserialize, Serialize};

/// One row of the liquidity fallback table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityTier {
    /// Minimum total traded value for this tier (inclusive)
    pub min_total_value: f64,
    /// Spread fraction used for this tier
    pub spread: f64,
}

/// Spread estimator with configurable bounds and liquidity tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadEstimator {
    /// Lower clamp bound
    #[serde(default = "default_min_spread")]
    pub min_spread: f64,
    /// Upper clamp bound
    #[serde(default = "default_max_spread")]
    pub max_spread: f64,
    /// Spread when total value is below every tier
    #[serde(default = "default_illiquid_spread")]
    pub illiquid_spread: f64,
    /// Tiers; the highest threshold not above total value wins
    #[serde(default = "default_tiers")]
    pub liquidity_tiers: Vec<LiquidityTier>,
}

fn default_min_spread() -> f64 {
    0.001
}
fn default_max_spread() -> f64 {
    0.02
}
fn default_illiquid_spread() -> f64 {
    0.008
}
fn default_tiers() -> Vec<LiquidityTier> {
    vec![
        LiquidityTier {
            min_total_value: 50_000_000.0,
            spread: 0.001,
        },
        LiquidityTier {
            min_total_value: 10_000_000.0,
            spread: 0.002,
        },
        LiquidityTier {
            min_total_value: 2_000_000.0,
            spread: 0.004,
        },
    ]
}

impl Default for SpreadEstimator {
    fn default() -> Self {
        Self {
            min_spread: default_min_spread(),
            max_spread: default_max_spread(),
            illiquid_spread: default_illiquid_spread(),
            liquidity_tiers: default_tiers(),
        }
    }
}

impl SpreadEstimator {
    /// Estimate the spread fraction from the DR's own book and liquidity.
    ///
    /// Missing or non-finite inputs count as 0.
    pub fn estimate(&self, bid: f64, offer: f64, total_value: f64) -> f64 {
        let bid = finite_or_zero(bid);
        let offer = finite_or_zero(offer);

        let quoted = if bid > 0.0 && offer > 0.0 && offer > bid {
            let mid = (bid + offer) / 2.0;
            (mid > 0.0).then(|| (offer - bid) / mid)
        } else {
            None
        };

        let spread = quoted.unwrap_or_else(|| self.tier_spread(finite_or_zero(total_value)));
        self.clamp(spread)
    }

    /// Spread from the liquidity table alone
    pub fn tier_spread(&self, total_value: f64) -> f64 {
        let mut best: Option<&LiquidityTier> = None;
        for tier in &self.liquidity_tiers {
            if total_value >= tier.min_total_value
                && best.map_or(true, |b| tier.min_total_value > b.min_total_value)
            {
                best = Some(tier);
            }
        }
        best.map(|t| t.spread).unwrap_or(self.illiquid_spread)
    }

    fn clamp(&self, spread: f64) -> f64 {
        if spread.is_nan() {
            return self.min_spread;
        }
        spread.max(self.min_spread).min(self.max_spread)
    }
}

/// Estimate a spread with the default bounds and tiers
pub fn estimate_spread(bid: f64, offer: f64, total_value: f64) -> f64 {
    SpreadEstimator::default().estimate(bid, offer, total_value)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
