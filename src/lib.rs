//! dr-fair-value: Fair-value pricing for depositary receipts
//!
//! This library provides the core components for:
//! - Conversion ratio parsing and dynamic spread estimation
//! - Ratio-based cross-currency fair value quotes at a fixed price tick
//! - DR snapshot and realtime underlying/FX clients
//! - A calculator session that guards against stale realtime responses
//! - Debounced calculation events, structured logging and metrics

pub mod calculator;
pub mod cli;
pub mod config;
pub mod dr;
pub mod model;
pub mod telemetry;
