use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Reference data for one currency, keyed by its symbol in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    pub symbol: Symbol,
    /// Display name in the local language.
    #[serde(default, alias = "ru_name")]
    pub local_name: String,
    /// Display name in an alternate language.
    #[serde(default, alias = "en_name")]
    pub alternate_name: String,
    /// Numeric-string code, opaque to the ledger.
    #[serde(default)]
    pub code: String,
}

impl CurrencyRecord {
    pub fn new(
        symbol: Symbol,
        local_name: impl Into<String>,
        alternate_name: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            symbol,
            local_name: local_name.into(),
            alternate_name: alternate_name.into(),
            code: code.into(),
        }
    }
}

/// Buy/sell price observed for a symbol at `time` (Unix seconds).
///
/// Prices are fixed-point integers; the scale is agreed between writers and
/// readers. `time` is also part of the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuotation {
    pub symbol: Symbol,
    pub buy: i64,
    pub sell: i64,
    pub time: i64,
}

impl PriceQuotation {
    pub fn new(symbol: Symbol, buy: i64, sell: i64, time: i64) -> Self {
        Self {
            symbol,
            buy,
            sell,
            time,
        }
    }
}
