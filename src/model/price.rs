//! Price rounding and underlying price normalization
//!
//! All rounding is round-half-away-from-zero (`f64::round`). Tick rounding is
//! only ever applied to final prices.

use serde::{Deserialize, Serialize};

/// Nudge added before display rounding so that values such as `99.995`,
/// stored as `99.99499999...`, round up as written.
pub const DISPLAY_EPSILON: f64 = 1e-10;

/// Decimal places of the display rounding for underlying prices
pub const DISPLAY_DECIMALS: u32 = 2;

/// A fixed price tick of `10^-decimals`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTick {
    decimals: u32,
}

impl PriceTick {
    /// Create a tick with the given number of decimal places
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    /// Number of decimal places
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Tick size as a float (e.g. 0.01)
    pub fn size(&self) -> f64 {
        1.0 / self.scale()
    }

    fn scale(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }

    /// Round a price to the nearest tick.
    ///
    /// Computed as `round(p * 10^d) / 10^d`, which is `round(p / tick) * tick`
    /// with an exact integer scale, so the result is the closest `f64` to the
    /// tick multiple and rounding again is a no-op.
    pub fn round(&self, price: f64) -> f64 {
        if !price.is_finite() {
            return 0.0;
        }
        let scale = self.scale();
        (price * scale).round() / scale
    }

    /// Format a tick-rounded price with exactly `decimals` places
    pub fn format(&self, price: f64) -> String {
        format!("{:.*}", self.decimals as usize, self.round(price))
    }
}

impl Default for PriceTick {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Round a value for display at `decimals` places, correcting `.xx5` values
/// that binary floating point stores just below the midpoint.
pub fn round_display(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    ((value + DISPLAY_EPSILON) * scale).round() / scale
}

/// Underlying price held in both its raw and display-rounded forms
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPrice {
    /// Unrounded backend price, authoritative for pricing
    pub raw: Option<f64>,
    /// Two-decimal price; rendering re-rounds `raw` at the currency's
    /// precision when one is known
    pub display: Option<f64>,
}

impl NormalizedPrice {
    /// Build from the backend's raw price, falling back to its rounded field
    pub fn new(raw: Option<f64>, fallback: Option<f64>) -> Self {
        let raw = raw.filter(|p| p.is_finite());
        let display = raw
            .or(fallback.filter(|p| p.is_finite()))
            .map(|p| round_display(p, DISPLAY_DECIMALS));
        Self { raw, display }
    }

    /// A manually entered price; it is both raw and displayed as typed
    pub fn manual(price: f64) -> Self {
        Self::new(Some(price), None)
    }

    /// Price to feed the calculator: raw when known, display otherwise
    pub fn pricing_value(&self) -> Option<f64> {
        self.raw.or(self.display)
    }
}
