use fxledger_core::{QuoteContract, TxContext};
use serde_json::Value;

use crate::error::CliError;

pub fn put(contract: &QuoteContract, ctx: &TxContext<'_>, payload: &str) -> Result<Value, CliError> {
    contract.put_currency_price(ctx, payload)?;
    Ok(super::written(ctx))
}

pub fn latest(
    contract: &QuoteContract,
    ctx: &TxContext<'_>,
    symbol: &str,
) -> Result<Value, CliError> {
    let quotation = contract.get_currency_price(ctx, symbol)?;
    Ok(serde_json::to_value(quotation)?)
}

pub fn history(
    contract: &QuoteContract,
    ctx: &TxContext<'_>,
    symbol: &str,
) -> Result<Value, CliError> {
    let quotations = contract.get_currency_price_from_history(ctx, symbol)?;
    tracing::debug!(symbol, points = quotations.len(), "history loaded");
    Ok(serde_json::to_value(quotations)?)
}

pub fn batch(
    contract: &QuoteContract,
    ctx: &TxContext<'_>,
    payload: &str,
) -> Result<Value, CliError> {
    let quotations = contract.get_all_current_prices(ctx, payload)?;
    Ok(serde_json::to_value(quotations)?)
}
