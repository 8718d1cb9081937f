//! Latest quotation for several symbols at once, all or nothing.

use crate::{LedgerError, PriceLedger, PriceQuotation, TxContext};

/// Resolve the latest quotation of every symbol, in input order.
///
/// The first failing lookup aborts the batch; no partial list is returned.
pub fn latest_batch<S: AsRef<str>>(
    prices: &PriceLedger,
    ctx: &TxContext<'_>,
    symbols: &[S],
) -> Result<Vec<PriceQuotation>, LedgerError> {
    if symbols.is_empty() {
        return Err(LedgerError::EmptyInput {
            what: "symbol list",
        });
    }

    symbols
        .iter()
        .map(|symbol| {
            let symbol = symbol.as_ref();
            prices
                .latest(ctx, symbol)
                .map_err(|source| LedgerError::Batch {
                    symbol: symbol.to_owned(),
                    source: Box::new(source),
                })
        })
        .collect()
}
