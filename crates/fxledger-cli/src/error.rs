use fxledger_core::{ErrorKind, LedgerError, ValidationError};
use fxledger_store::StoreError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Ledger(error) => match error.kind() {
                ErrorKind::EmptyInput | ErrorKind::DecodeError | ErrorKind::InvalidSymbol => 2,
                ErrorKind::NotFound => 3,
                ErrorKind::StoreError => 10,
            },
            Self::Validation(_) => 2,
            Self::Serialization(_) => 4,
            Self::Store(_) | Self::Io(_) => 10,
        }
    }
}
