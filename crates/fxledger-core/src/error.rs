use fxledger_store::StoreError;
use serde::Serialize;
use thiserror::Error;

use crate::keys::KeyError;

/// Validation failures raised while constructing domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("symbol length {len} exceeds maximum {max}")]
    SymbolTooLong { len: usize, max: usize },

    #[error("symbol must start with an ASCII letter, got '{ch}'")]
    SymbolInvalidStart { ch: char },

    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("{name} must be greater than zero")]
    ZeroWindow { name: &'static str },
}

/// Coarse error category, stable across messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    DecodeError,
    NotFound,
    InvalidSymbol,
    StoreError,
}

/// Errors returned by every ledger operation.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A required argument was missing or blank.
    #[error("empty input: {what}")]
    EmptyInput { what: &'static str },

    /// A payload did not have the expected shape.
    #[error("cannot decode {what}: {reason}")]
    Decode { what: &'static str, reason: String },

    /// No record at the queried key, or an empty required window.
    #[error("{what} not found")]
    NotFound { what: String },

    /// The symbol cannot be used as (part of) a ledger key.
    #[error("invalid symbol '{symbol}': {reason}")]
    InvalidSymbol { symbol: String, reason: String },

    /// The ledger store failed.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    /// One lookup of a batch failed; the whole batch is discarded.
    #[error("get latest price for '{symbol}': {source}")]
    Batch {
        symbol: String,
        #[source]
        source: Box<LedgerError>,
    },
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput { .. } => ErrorKind::EmptyInput,
            Self::Decode { .. } => ErrorKind::DecodeError,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidSymbol { .. } => ErrorKind::InvalidSymbol,
            Self::Store { .. } => ErrorKind::StoreError,
            Self::Batch { source, .. } => source.kind(),
        }
    }

    pub(crate) fn decode(what: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            what,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn store(context: &'static str, source: StoreError) -> Self {
        Self::Store { context, source }
    }

    pub(crate) fn invalid_symbol(symbol: &str, error: &ValidationError) -> Self {
        match error {
            ValidationError::EmptySymbol => Self::EmptyInput { what: "symbol" },
            other => Self::InvalidSymbol {
                symbol: symbol.to_owned(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<KeyError> for LedgerError {
    fn from(error: KeyError) -> Self {
        match error {
            KeyError::EmptySymbol => Self::EmptyInput { what: "symbol" },
            KeyError::ReservedSeparator { ref symbol, .. } => Self::InvalidSymbol {
                symbol: symbol.clone(),
                reason: error.to_string(),
            },
            KeyError::Malformed { .. } => Self::decode("quotation key", error),
        }
    }
}
