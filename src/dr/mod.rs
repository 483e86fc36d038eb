//! DR data module
//!
//! Wire types for DR snapshot rows and realtime underlying quotes, and the
//! data source the calculator pulls them from.

mod client;
mod types;

pub use client::DrClient;
pub use types::{DrQuote, FetchError, UnderlyingSnapshot};

use async_trait::async_trait;

/// Trait for DR data source implementations
#[async_trait]
pub trait DrDataSource: Send + Sync {
    /// Fetch every DR row from the snapshot service
    async fn fetch_snapshot(&self) -> Result<Vec<DrQuote>, FetchError>;

    /// Fetch the realtime underlying price and FX rate for a DR
    async fn fetch_realtime(&self, symbol: &str) -> Result<UnderlyingSnapshot, FetchError>;

    /// Fetch a single DR row by symbol (case-insensitive)
    async fn fetch_dr(&self, symbol: &str) -> Result<DrQuote, FetchError> {
        self.fetch_snapshot()
            .await?
            .into_iter()
            .find(|row| row.symbol.eq_ignore_ascii_case(symbol.trim()))
            .ok_or_else(|| FetchError::NotFound(symbol.to_string()))
    }
}
