//! DR snapshot and realtime wire types

use crate::model::{parse_ratio, NormalizedPrice};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the DR snapshot service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrQuote {
    /// DR trading symbol
    pub symbol: String,
    /// Conversion ratio string, e.g. "5:1"
    #[serde(default)]
    pub conversion_ratio: Option<String>,
    /// Reciprocal of the conversion ratio
    #[serde(default)]
    pub conversion_ratio_r: Option<f64>,
    #[serde(default)]
    pub bid_price: Option<f64>,
    #[serde(default)]
    pub offer_price: Option<f64>,
    /// Total traded value, used as a liquidity proxy
    #[serde(default)]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub last: Option<f64>,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub percent_change: Option<f64>,
    #[serde(default)]
    pub underlying_exchange: Option<String>,
    #[serde(default)]
    pub underlying: Option<String>,
    #[serde(default)]
    pub underlying_name: Option<String>,
}

impl DrQuote {
    /// Create a row with only a symbol set
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// DR units per underlying unit, 0 when unknown
    pub fn ratio(&self) -> f64 {
        parse_ratio(self.conversion_ratio.as_deref(), self.conversion_ratio_r)
    }

    pub fn bid(&self) -> f64 {
        self.bid_price.unwrap_or(0.0)
    }

    pub fn offer(&self) -> f64 {
        self.offer_price.unwrap_or(0.0)
    }

    pub fn traded_value(&self) -> f64 {
        self.total_value.unwrap_or(0.0)
    }

    /// Underlying ticker, or its name when only that is known
    pub fn underlying_label(&self) -> Option<&str> {
        self.underlying
            .as_deref()
            .or(self.underlying_name.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Realtime underlying price and FX for one DR
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnderlyingSnapshot {
    /// Currency of the underlying price
    #[serde(default)]
    pub currency: Option<String>,
    /// Unrounded underlying price
    #[serde(default)]
    pub underlying_price_raw: Option<f64>,
    /// Display-rounded underlying price
    #[serde(default)]
    pub underlying_price: Option<f64>,
    /// Quote currency per unit of the underlying currency
    #[serde(default)]
    pub fx_rate: Option<f64>,
}

impl UnderlyingSnapshot {
    /// Underlying price in raw and display form
    pub fn price(&self) -> NormalizedPrice {
        NormalizedPrice::new(self.underlying_price_raw, self.underlying_price)
    }
}

/// Errors from the DR data services
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Symbol not found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
