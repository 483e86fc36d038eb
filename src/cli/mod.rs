//! CLI interface for dr-fair-value
//!
//! Provides subcommands for:
//! - `quote`: Price a DR from values given on the command line
//! - `calc`: Fetch a DR and its underlying, then price it
//! - `list`: Show DR rows with parsed ratio and estimated spread
//! - `config`: Show the effective configuration

mod calc;
mod list;
mod quote;

pub use calc::CalcArgs;
pub use list::ListArgs;
pub use quote::QuoteArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dr-fair-value")]
#[command(about = "Fair-value pricing for depositary receipts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a DR from explicit inputs (no network)
    Quote(QuoteArgs),
    /// Fetch a DR and its underlying, then price it
    Calc(CalcArgs),
    /// List DRs from the snapshot service
    List(ListArgs),
    /// Show configuration
    Config,
}
