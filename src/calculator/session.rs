//! Calculator session for one selected DR
//!
//! Holds the selected DR row and the latest underlying price and FX rate,
//! recomputes the fair value quote on every change and hands settled quotes
//! to the telemetry debouncer.

use super::display::{DisplayInputs, QuoteDisplay};
use crate::config::{CalculatorConfig, PricingConfig};
use crate::dr::{DrDataSource, DrQuote, FetchError, UnderlyingSnapshot};
use crate::model::{
    FairValueModel, FairValueParams, FairValueQuote, NormalizedPrice, PriceTick, RatioModel,
    SpreadEstimator,
};
use crate::telemetry::{
    increment, set_gauge, CalculationEvent, CounterMetric, Debouncer, GaugeMetric, TelemetrySink,
};
use std::sync::Arc;

/// Identifies one realtime request issued by a session.
///
/// Responses are applied only if their ticket belongs to the current
/// selection and is newer than the last applied response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    symbol: String,
    generation: u64,
    request: u64,
}

impl RequestTicket {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Realtime inputs for the selected DR
#[derive(Debug, Clone, Default)]
struct Inputs {
    currency: Option<String>,
    underlying: NormalizedPrice,
    fx_rate: Option<f64>,
}

/// Fair value calculator state for one DR at a time.
///
/// Every input change recomputes the quote and schedules a debounced
/// calculation event. The event timer runs on the current tokio runtime; when
/// a mutating method is called outside one, quotes are still computed but no
/// event is sent.
pub struct CalculatorSession {
    model: RatioModel,
    spread: SpreadEstimator,
    placeholder: String,
    debouncer: Debouncer,
    selected: Option<DrQuote>,
    inputs: Inputs,
    quote: Option<FairValueQuote>,
    /// Bumped on every selection
    generation: u64,
    /// Last realtime request issued
    next_request: u64,
    /// Last realtime request applied for the current generation
    applied_request: Option<u64>,
}

impl CalculatorSession {
    /// Create a session emitting calculation events to `sink`
    pub fn new(
        pricing: &PricingConfig,
        calculator: &CalculatorConfig,
        sink: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            model: RatioModel::new(PriceTick::new(pricing.tick_decimals)),
            spread: pricing.spread.clone(),
            placeholder: calculator.placeholder.clone(),
            debouncer: Debouncer::new(sink, calculator.debounce()),
            selected: None,
            inputs: Inputs::default(),
            quote: None,
            generation: 0,
            next_request: 0,
            applied_request: None,
        }
    }

    /// Select a DR; discards the previous DR's realtime inputs.
    ///
    /// Returns the ticket for the realtime request the caller should issue.
    pub fn select(&mut self, dr: DrQuote) -> RequestTicket {
        tracing::debug!(symbol = %dr.symbol, ratio = dr.ratio(), "DR selected");

        self.generation += 1;
        self.applied_request = None;
        self.inputs = Inputs::default();
        self.debouncer.cancel();
        let symbol = dr.symbol.clone();
        self.selected = Some(dr);
        self.recompute();

        self.issue_ticket(symbol)
    }

    /// Ticket for a new realtime request on the current selection
    pub fn request_realtime(&mut self) -> Option<RequestTicket> {
        let symbol = self.selected.as_ref()?.symbol.clone();
        Some(self.issue_ticket(symbol))
    }

    fn issue_ticket(&mut self, symbol: String) -> RequestTicket {
        self.next_request += 1;
        RequestTicket {
            symbol,
            generation: self.generation,
            request: self.next_request,
        }
    }

    /// Apply a realtime response. Returns false when the response is stale.
    pub fn apply_realtime(&mut self, ticket: &RequestTicket, snapshot: UnderlyingSnapshot) -> bool {
        let current = ticket.generation == self.generation
            && self.applied_request.map_or(true, |last| ticket.request > last);

        if !current {
            increment(CounterMetric::StaleResponses);
            tracing::debug!(
                symbol = %ticket.symbol,
                generation = ticket.generation,
                current_generation = self.generation,
                "Dropping stale realtime response"
            );
            return false;
        }

        self.applied_request = Some(ticket.request);
        self.inputs = Inputs {
            currency: snapshot.currency.clone(),
            underlying: snapshot.price(),
            fx_rate: snapshot.fx_rate,
        };
        self.recompute();
        true
    }

    /// Record a failed realtime request; previous inputs stay in place
    pub fn realtime_failed(&self, ticket: &RequestTicket, error: &FetchError) {
        increment(CounterMetric::FetchFailures);
        tracing::warn!(symbol = %ticket.symbol, error = %error, "Realtime fetch failed");
    }

    /// Fetch realtime inputs for the selected DR and apply them
    pub async fn refresh(&mut self, source: &dyn DrDataSource) -> Option<FairValueQuote> {
        let ticket = self.request_realtime()?;
        match source.fetch_realtime(ticket.symbol()).await {
            Ok(snapshot) => {
                self.apply_realtime(&ticket, snapshot);
            }
            Err(e) => self.realtime_failed(&ticket, &e),
        }
        self.quote()
    }

    /// Override the underlying price (e.g. typed by the user)
    pub fn set_underlying_price(&mut self, price: Option<f64>) -> Option<FairValueQuote> {
        self.inputs.underlying = price.map(NormalizedPrice::manual).unwrap_or_default();
        self.recompute()
    }

    /// Override the FX rate
    pub fn set_fx_rate(&mut self, fx_rate: Option<f64>) -> Option<FairValueQuote> {
        self.inputs.fx_rate = fx_rate;
        self.recompute()
    }

    /// Currently selected DR
    pub fn selected(&self) -> Option<&DrQuote> {
        self.selected.as_ref()
    }

    /// Latest quote; `None` when no DR is selected
    pub fn quote(&self) -> Option<FairValueQuote> {
        self.quote
    }

    /// Underlying price in raw and display form
    pub fn underlying(&self) -> NormalizedPrice {
        self.inputs.underlying
    }

    /// True until realtime inputs arrive for the current selection
    pub fn is_loading(&self) -> bool {
        self.selected.is_some() && self.applied_request.is_none()
    }

    /// True while a calculation event waits for its quiet window
    pub fn telemetry_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Render the current state
    pub fn display(&self) -> QuoteDisplay {
        QuoteDisplay::render(DisplayInputs {
            symbol: self.selected.as_ref().map(|d| d.symbol.as_str()).unwrap_or_default(),
            currency: self.inputs.currency.as_deref(),
            underlying: self.inputs.underlying,
            fx_rate: self.inputs.fx_rate,
            quote: self.quote.as_ref(),
            tick: self.model.tick(),
            placeholder: &self.placeholder,
        })
    }

    /// Wait for a pending calculation event to be delivered
    pub async fn settle(&mut self) {
        self.debouncer.settle().await;
    }

    fn recompute(&mut self) -> Option<FairValueQuote> {
        let Some(dr) = self.selected.as_ref() else {
            self.quote = None;
            return None;
        };

        let underlying_price = self.inputs.underlying.pricing_value().unwrap_or(0.0);
        let fx_rate = self.inputs.fx_rate.unwrap_or(0.0);
        let params = FairValueParams {
            underlying_price,
            fx_rate,
            ratio: dr.ratio(),
            spread_fraction: self.spread.estimate(dr.bid(), dr.offer(), dr.traded_value()),
        };
        let quote = self.model.calculate(params);

        if quote.has_input {
            increment(CounterMetric::QuotesComputed);
            set_gauge(GaugeMetric::SpreadFraction, quote.spread_fraction);
            tracing::debug!(
                symbol = %dr.symbol,
                fair_mid = quote.fair_mid,
                fair_bid = quote.fair_bid,
                fair_ask = quote.fair_ask,
                spread = quote.spread_fraction,
                "Fair value computed"
            );
            let event = CalculationEvent::new(
                dr.symbol.clone(),
                underlying_price,
                fx_rate,
                &quote,
                self.model.tick(),
            );
            self.debouncer.schedule(event);
        } else {
            increment(CounterMetric::QuotesSuppressed);
            self.debouncer.cancel();
        }

        self.quote = Some(quote);
        self.quote
    }
}
