//! Currency reference records, one per symbol.

use tracing::debug;

use crate::{codec, keys, CurrencyRecord, LedgerError, Symbol, TxContext};

/// Put/get of [`CurrencyRecord`]s keyed by symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyRegistry;

impl CurrencyRegistry {
    /// Write `record`, replacing whatever was stored for its symbol.
    pub fn put(&self, ctx: &TxContext<'_>, record: &CurrencyRecord) -> Result<(), LedgerError> {
        let key = keys::currency_key(&record.symbol);
        ctx.store()
            .put_state(key, &codec::encode_currency(record))
            .map_err(|source| LedgerError::store("put currency to state", source))?;
        debug!(tx_id = ctx.tx_id(), symbol = %record.symbol, "currency stored");
        Ok(())
    }

    /// Read the record stored for `symbol`.
    pub fn get(&self, ctx: &TxContext<'_>, symbol: &str) -> Result<CurrencyRecord, LedgerError> {
        let symbol =
            Symbol::parse(symbol).map_err(|error| LedgerError::invalid_symbol(symbol, &error))?;

        let bytes = ctx
            .store()
            .get_state(keys::currency_key(&symbol))
            .map_err(|source| LedgerError::store("get currency from state", source))?
            .ok_or_else(|| LedgerError::NotFound {
                what: format!("currency {symbol}"),
            })?;

        codec::decode_currency(symbol, &bytes)
    }
}
