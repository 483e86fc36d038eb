//! List command implementation

use crate::config::Config;
use crate::dr::{DrClient, DrDataSource, DrQuote};
use crate::model::SpreadEstimator;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show at most this many rows
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only rows whose symbol or underlying contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// One row of the listing
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub symbol: String,
    pub underlying: String,
    pub ratio: f64,
    pub bid: f64,
    pub offer: f64,
    pub spread_fraction: f64,
}

impl ListArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = DrClient::new(config.api.clone())?;
        let rows = client.fetch_snapshot().await?;
        let listed = self.rows(&rows, &config.pricing.spread);

        tracing::info!(total = rows.len(), shown = listed.len(), "DR snapshot listed");

        if self.json {
            println!("{}", serde_json::to_string_pretty(&listed)?);
            return Ok(());
        }

        println!(
            "{:<14} {:<12} {:>10} {:>10} {:>10} {:>9}",
            "SYMBOL", "UNDERLYING", "RATIO", "BID", "OFFER", "SPREAD"
        );
        for row in &listed {
            println!(
                "{:<14} {:<12} {:>10} {:>10.2} {:>10.2} {:>8.3}%",
                row.symbol,
                row.underlying,
                if row.ratio > 0.0 {
                    format!("{}:1", row.ratio)
                } else {
                    "-".to_string()
                },
                row.bid,
                row.offer,
                row.spread_fraction * 100.0
            );
        }
        Ok(())
    }

    fn rows(&self, rows: &[DrQuote], spread: &SpreadEstimator) -> Vec<ListRow> {
        let needle = self.filter.as_ref().map(|f| f.to_ascii_lowercase());
        rows.iter()
            .filter(|row| match &needle {
                Some(needle) => {
                    row.symbol.to_ascii_lowercase().contains(needle)
                        || row
                            .underlying_label()
                            .is_some_and(|u| u.to_ascii_lowercase().contains(needle))
                }
                None => true,
            })
            .take(self.limit.unwrap_or(usize::MAX))
            .map(|row| ListRow {
                symbol: row.symbol.clone(),
                underlying: row.underlying_label().unwrap_or("-").to_string(),
                ratio: row.ratio(),
                bid: row.bid(),
                offer: row.offer(),
                spread_fraction: spread.estimate(row.bid(), row.offer(), row.traded_value()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<DrQuote> {
        vec![
            DrQuote {
                conversion_ratio: Some("5:1".to_string()),
                bid_price: Some(10.90),
                offer_price: Some(10.95),
                underlying: Some("AAPL".to_string()),
                ..DrQuote::new("AAPL80")
            },
            DrQuote {
                conversion_ratio_r: Some(0.25),
                total_value: Some(60_000_000.0),
                underlying_name: Some("Tencent Holdings".to_string()),
                ..DrQuote::new("TENCENT80")
            },
            DrQuote::new("BROKEN19"),
        ]
    }

    fn args() -> ListArgs {
        ListArgs {
            limit: None,
            filter: None,
            json: false,
        }
    }

    #[test]
    fn test_rows_parse_ratio_and_spread() {
        let listed = args().rows(&rows(), &SpreadEstimator::default());
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].ratio, 5.0);
        assert!((listed[0].spread_fraction - 0.05 / 10.925).abs() < 1e-12);
        assert_eq!(listed[1].ratio, 4.0);
        assert_eq!(listed[1].spread_fraction, 0.001);
        assert_eq!(listed[2].ratio, 0.0);
        assert_eq!(listed[2].underlying, "-");
        assert_eq!(listed[2].spread_fraction, 0.008);
    }

    #[test]
    fn test_rows_filter_and_limit() {
        let filtered = ListArgs {
            filter: Some("tencent".to_string()),
            ..args()
        }
        .rows(&rows(), &SpreadEstimator::default());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].symbol, "TENCENT80");

        let limited = ListArgs {
            limit: Some(2),
            ..args()
        }
        .rows(&rows(), &SpreadEstimator::default());
        assert_eq!(limited.len(), 2);
    }
}
