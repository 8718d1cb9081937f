//! CLI argument definitions for fxledger.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `put-currency` | Store a currency reference record |
//! | `get-currency` | Read a currency reference record |
//! | `put-price` | Append a price quotation |
//! | `get-price` | Latest quotation of a symbol |
//! | `history` | Recent quotations of a symbol, oldest first |
//! | `prices` | Latest quotation of several symbols, all or nothing |
//!
//! # Examples
//!
//! ```bash
//! fxledger put-currency '{"symbol":"USD","local_name":"доллар","alternate_name":"dollar","code":"840"}'
//! fxledger put-price '{"symbol":"USD","buy":9150,"sell":9300,"time":1700000000}'
//! fxledger get-price USD --at 1700000060
//! fxledger prices '["USD","EUR"]' --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fxledger_core::{DEFAULT_HISTORY_WINDOW_SECS, DEFAULT_LATEST_WINDOW_SECS};

/// Currency registry and price time series on a local ledger file.
#[derive(Debug, Parser)]
#[command(name = "fxledger", author, version, about)]
pub struct Cli {
    /// Ledger database file. Defaults to `$FXLEDGER_HOME/ledger.duckdb`.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Transaction timestamp in Unix seconds instead of the wall clock.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub at: Option<i64>,

    /// Width of the window searched for the latest price, in seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_LATEST_WINDOW_SECS)]
    pub latest_window_secs: u32,

    /// Width of the price history window, in seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_HISTORY_WINDOW_SECS)]
    pub history_window_secs: u32,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a currency record given as a JSON object (`-` reads stdin).
    PutCurrency(PayloadArgs),

    /// Read the currency record of a symbol.
    GetCurrency(SymbolArgs),

    /// Append a price quotation given as a JSON object (`-` reads stdin).
    PutPrice(PayloadArgs),

    /// Latest price of a symbol within the latest window.
    GetPrice(SymbolArgs),

    /// All prices of a symbol within the history window, oldest first.
    History(SymbolArgs),

    /// Latest prices for a JSON array of symbols (`-` reads stdin).
    Prices(PayloadArgs),
}

/// A JSON payload argument.
#[derive(Debug, Args)]
pub struct PayloadArgs {
    pub payload: String,
}

/// A single symbol argument.
#[derive(Debug, Args)]
pub struct SymbolArgs {
    /// Currency symbol (e.g., USD).
    pub symbol: String,
}
