//! Persisted byte form of ledger records.
//!
//! Values are protobuf messages. The symbol is never part of a value: it is
//! always recovered from the key that was queried.

use prost::Message;

use crate::{CurrencyRecord, LedgerError, PriceQuotation, Symbol};

/// Stored value of a [`CurrencyRecord`].
#[derive(Clone, PartialEq, Message)]
pub struct CurrencyPayload {
    #[prost(string, tag = "1")]
    pub local_name: String,
    #[prost(string, tag = "2")]
    pub alternate_name: String,
    #[prost(string, tag = "3")]
    pub code: String,
}

/// Stored value of a [`PriceQuotation`].
#[derive(Clone, PartialEq, Message)]
pub struct QuotationPayload {
    #[prost(int64, tag = "1")]
    pub buy: i64,
    #[prost(int64, tag = "2")]
    pub sell: i64,
    #[prost(int64, tag = "3")]
    pub time: i64,
}

pub fn encode_currency(record: &CurrencyRecord) -> Vec<u8> {
    CurrencyPayload {
        local_name: record.local_name.clone(),
        alternate_name: record.alternate_name.clone(),
        code: record.code.clone(),
    }
    .encode_to_vec()
}

pub fn decode_currency(symbol: Symbol, bytes: &[u8]) -> Result<CurrencyRecord, LedgerError> {
    let payload = CurrencyPayload::decode(bytes)
        .map_err(|error| LedgerError::decode("stored currency", error))?;
    Ok(CurrencyRecord {
        symbol,
        local_name: payload.local_name,
        alternate_name: payload.alternate_name,
        code: payload.code,
    })
}

pub fn encode_quotation(quotation: &PriceQuotation) -> Vec<u8> {
    QuotationPayload {
        buy: quotation.buy,
        sell: quotation.sell,
        time: quotation.time,
    }
    .encode_to_vec()
}

pub fn decode_quotation(symbol: Symbol, bytes: &[u8]) -> Result<PriceQuotation, LedgerError> {
    let payload = QuotationPayload::decode(bytes)
        .map_err(|error| LedgerError::decode("stored quotation", error))?;
    Ok(PriceQuotation {
        symbol,
        buy: payload.buy,
        sell: payload.sell,
        time: payload.time,
    })
}
