use fxledger_core::{QuoteContract, TxContext};
use serde_json::Value;

use crate::error::CliError;

pub fn put(contract: &QuoteContract, ctx: &TxContext<'_>, payload: &str) -> Result<Value, CliError> {
    contract.put_currency(ctx, payload)?;
    Ok(super::written(ctx))
}

pub fn get(contract: &QuoteContract, ctx: &TxContext<'_>, symbol: &str) -> Result<Value, CliError> {
    let record = contract.get_currency(ctx, symbol)?;
    Ok(serde_json::to_value(record)?)
}
