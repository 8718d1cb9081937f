//! Caller-facing operations.
//!
//! Each method takes the raw caller payload (JSON) or a symbol, validates it
//! and delegates to the registry, the price ledger or the batch resolver.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    batch, CurrencyRecord, CurrencyRegistry, LedgerError, PriceLedger, PriceQuotation,
    TxContext, WindowConfig,
};

/// The six operations exposed to ledger clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteContract {
    registry: CurrencyRegistry,
    prices: PriceLedger,
}

impl QuoteContract {
    pub fn new(windows: WindowConfig) -> Self {
        Self {
            registry: CurrencyRegistry,
            prices: PriceLedger::new(windows),
        }
    }

    /// Store the currency described by the JSON object `data`.
    pub fn put_currency(&self, ctx: &TxContext<'_>, data: &str) -> Result<(), LedgerError> {
        let record: CurrencyRecord = decode_payload(data, "currency payload")?;
        self.registry.put(ctx, &record)
    }

    pub fn get_currency(
        &self,
        ctx: &TxContext<'_>,
        symbol: &str,
    ) -> Result<CurrencyRecord, LedgerError> {
        self.registry.get(ctx, symbol)
    }

    /// Store the quotation described by the JSON object `data`.
    pub fn put_currency_price(&self, ctx: &TxContext<'_>, data: &str) -> Result<(), LedgerError> {
        let quotation: PriceQuotation = decode_payload(data, "quotation payload")?;
        self.prices.put_quotation(ctx, &quotation)
    }

    /// Latest quotation within the latest window.
    pub fn get_currency_price(
        &self,
        ctx: &TxContext<'_>,
        symbol: &str,
    ) -> Result<PriceQuotation, LedgerError> {
        self.prices.latest(ctx, symbol)
    }

    /// All quotations within the history window, oldest first.
    pub fn get_currency_price_from_history(
        &self,
        ctx: &TxContext<'_>,
        symbol: &str,
    ) -> Result<Vec<PriceQuotation>, LedgerError> {
        self.prices.history(ctx, symbol)
    }

    /// Latest quotation of every symbol in the JSON array `currencies`.
    pub fn get_all_current_prices(
        &self,
        ctx: &TxContext<'_>,
        currencies: &str,
    ) -> Result<Vec<PriceQuotation>, LedgerError> {
        let symbols: Vec<String> = serde_json::from_str(currencies)
            .map_err(|error| LedgerError::decode("symbol list", error))?;
        debug!(tx_id = ctx.tx_id(), count = symbols.len(), "resolving price batch");
        batch::latest_batch(&self.prices, ctx, &symbols)
    }
}

fn decode_payload<T: DeserializeOwned>(data: &str, what: &'static str) -> Result<T, LedgerError> {
    if data.trim().is_empty() {
        return Err(LedgerError::EmptyInput { what });
    }
    serde_json::from_str(data).map_err(|error| LedgerError::decode(what, error))
}
