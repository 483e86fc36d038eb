//! Quote command implementation

use crate::calculator::{DisplayInputs, QuoteDisplay};
use crate::config::Config;
use crate::model::{
    parse_ratio, FairValueModel, FairValueParams, FairValueQuote, NormalizedPrice, PriceTick,
    RatioModel,
};
use clap::Args;

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Underlying price in its home currency
    #[arg(long)]
    pub price: Option<f64>,

    /// Quote currency per unit of the underlying currency
    #[arg(long)]
    pub fx: Option<f64>,

    /// Conversion ratio, e.g. "5:1"
    #[arg(long)]
    pub ratio: Option<String>,

    /// Reciprocal conversion ratio, used when --ratio is absent
    #[arg(long)]
    pub ratio_r: Option<f64>,

    /// Current DR bid
    #[arg(long, default_value = "0")]
    pub bid: f64,

    /// Current DR offer
    #[arg(long, default_value = "0")]
    pub offer: f64,

    /// Total traded value of the DR
    #[arg(long, default_value = "0")]
    pub total_value: f64,

    /// Currency of the underlying price (display only)
    #[arg(long)]
    pub currency: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl QuoteArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (quote, display) = self.compute(config);

        if !quote.has_input {
            tracing::warn!("Underlying price, FX rate and ratio must all be positive");
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&display)?);
        } else {
            println!("{}", display);
        }
        Ok(())
    }

    fn compute(&self, config: &Config) -> (FairValueQuote, QuoteDisplay) {
        let tick = PriceTick::new(config.pricing.tick_decimals);
        let model = RatioModel::new(tick);
        let underlying = NormalizedPrice::new(self.price, None);

        let params = FairValueParams {
            underlying_price: underlying.pricing_value().unwrap_or(0.0),
            fx_rate: self.fx.unwrap_or(0.0),
            ratio: parse_ratio(self.ratio.as_deref(), self.ratio_r),
            spread_fraction: config
                .pricing
                .spread
                .estimate(self.bid, self.offer, self.total_value),
        };
        let quote = model.calculate(params);

        let display = QuoteDisplay::render(DisplayInputs {
            symbol: "quote",
            currency: self.currency.as_deref(),
            underlying,
            fx_rate: self.fx,
            quote: Some(&quote),
            tick,
            placeholder: &config.calculator.placeholder,
        });
        (quote, display)
    }
}
