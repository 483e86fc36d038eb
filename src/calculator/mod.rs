//! Calculator module
//!
//! Drives the fair value model for one selected DR: realtime inputs in,
//! rendered quote and debounced calculation events out.

mod display;
mod session;

pub use display::{DisplayInputs, QuoteDisplay};
pub use session::{CalculatorSession, RequestTicket};
