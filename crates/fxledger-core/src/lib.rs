//! # fxledger core
//!
//! Currency reference data and a price time series kept in an ordered
//! key-value ledger.
//!
//! ## Overview
//!
//! The ledger only offers put, get and range scan. This crate turns that into
//! a queryable time series:
//!
//! - **Key codec** ([`keys`]): `symbol.time` keys whose byte order is the
//!   chronological order of quotations for a symbol
//! - **Record codec** ([`codec`]): protobuf values that omit the symbol
//! - **Currency registry** ([`CurrencyRegistry`]): one record per symbol
//! - **Price ledger** ([`PriceLedger`]): append quotations, read the latest one
//!   or the recent history through windowed scans
//! - **Batch resolver** ([`batch`]): latest quotation of several symbols, all
//!   or nothing
//! - **Contract** ([`QuoteContract`]): the caller surface taking JSON payloads
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`batch`] | All-or-nothing latest lookups |
//! | [`codec`] | Persisted byte form of records |
//! | [`config`] | Scan window widths |
//! | [`context`] | Transaction context and clocks |
//! | [`contract`] | Caller-facing operations |
//! | [`domain`] | Symbols, records, time windows |
//! | [`error`] | Error types |
//! | [`keys`] | Composite key encoding |
//! | [`prices`] | Price time series |
//! | [`registry`] | Currency registry |
//!
//! ## Quick Start
//!
//! ```rust
//! use fxledger_core::{ErrorKind, QuoteContract, Transaction};
//! use fxledger_store::MemoryLedger;
//!
//! let ledger = MemoryLedger::new();
//! let contract = QuoteContract::default();
//!
//! let tx = Transaction::with_id("tx-1", 1_700_000_000);
//! let ctx = tx.context(&ledger);
//! contract.put_currency_price(&ctx, r#"{"symbol":"USD","buy":9150,"sell":9300,"time":1699999990}"#)?;
//!
//! let latest = contract.get_currency_price(&ctx, "USD")?;
//! assert_eq!(latest.buy, 9150);
//!
//! let missing = contract.get_currency_price(&ctx, "EUR").unwrap_err();
//! assert_eq!(missing.kind(), ErrorKind::NotFound);
//! # Ok::<(), fxledger_core::LedgerError>(())
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`LedgerError`]; [`LedgerError::kind`] gives the
//! stable category (`EmptyInput`, `DecodeError`, `NotFound`, `InvalidSymbol`,
//! `StoreError`). Nothing is retried and multi-step operations never return
//! partial results.

pub mod batch;
pub mod codec;
pub mod config;
pub mod context;
pub mod contract;
pub mod domain;
pub mod error;
pub mod keys;
pub mod prices;
pub mod registry;

pub use batch::latest_batch;
pub use config::{WindowConfig, DEFAULT_HISTORY_WINDOW_SECS, DEFAULT_LATEST_WINDOW_SECS};
pub use context::{Clock, FixedClock, SystemClock, Transaction, TxContext};
pub use contract::QuoteContract;
pub use domain::{CurrencyRecord, PriceQuotation, Symbol, TimeWindow};
pub use error::{ErrorKind, LedgerError, ValidationError};
pub use keys::{decode_quotation_key, encode_quotation_key, window_bounds, KeyError, KeyRange};
pub use prices::PriceLedger;
pub use registry::CurrencyRegistry;

// Ledger store (re-exported from fxledger-store)
pub use fxledger_store::{
    DuckDbLedger, FaultPlan, KeyValue, LedgerStore, MemoryLedger, RangeScan, StoreConfig,
    StoreError,
};
