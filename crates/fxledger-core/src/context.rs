//! Per-transaction context threaded through every ledger operation.

use fxledger_store::LedgerStore;
use time::OffsetDateTime;
use uuid::Uuid;

/// Source of the transaction timestamp.
pub trait Clock: Send + Sync {
    /// Current wall-clock time in Unix seconds.
    fn now_unix_seconds(&self) -> i64;
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_seconds(&self) -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }
}

/// Clock frozen at a given second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix_seconds(&self) -> i64 {
        self.0
    }
}

/// Everything an operation may use from its host transaction: the ledger,
/// the transaction id and the transaction timestamp.
///
/// The timestamp is read once when the context is created and stays fixed, so
/// every scan inside one transaction uses the same `now`.
#[derive(Clone, Copy)]
pub struct TxContext<'a> {
    store: &'a dyn LedgerStore,
    tx_id: &'a str,
    timestamp: i64,
}

impl<'a> TxContext<'a> {
    pub fn new(store: &'a dyn LedgerStore, tx_id: &'a str, timestamp: i64) -> Self {
        Self {
            store,
            tx_id,
            timestamp,
        }
    }

    pub fn store(&self) -> &'a dyn LedgerStore {
        self.store
    }

    pub fn tx_id(&self) -> &'a str {
        self.tx_id
    }

    /// Transaction timestamp in Unix seconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl std::fmt::Debug for TxContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxContext")
            .field("tx_id", &self.tx_id)
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

/// Identity and timestamp of a transaction, owned by the caller that opens it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub tx_id: String,
    pub timestamp: i64,
}

impl Transaction {
    /// Start a transaction with a fresh id, stamped by `clock`.
    pub fn begin(clock: &dyn Clock) -> Self {
        Self {
            tx_id: Uuid::new_v4().to_string(),
            timestamp: clock.now_unix_seconds(),
        }
    }

    pub fn with_id(tx_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            tx_id: tx_id.into(),
            timestamp,
        }
    }

    /// Bind the transaction to a ledger for the duration of one operation.
    pub fn context<'a>(&'a self, store: &'a dyn LedgerStore) -> TxContext<'a> {
        TxContext::new(store, &self.tx_id, self.timestamp)
    }
}
