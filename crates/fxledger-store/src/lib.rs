//! # fxledger store
//!
//! Ordered key-value ledger backends for fxledger.
//!
//! ## Overview
//!
//! The core crate never talks to a database directly. Everything it needs from
//! the host ledger is expressed by [`LedgerStore`]:
//!
//! - `put_state` writes a value under a key, replacing any previous value
//! - `get_state` reads a value, `None` when the key is absent
//! - `scan_range` returns a [`RangeScan`] over `[start, end)` in ascending key order
//!
//! Two backends are provided:
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`MemoryLedger`] | `BTreeMap` ledger with fault injection, used by tests |
//! | [`DuckDbLedger`] | Persistent ledger stored in a DuckDB file |
//!
//! ## Scans are scoped resources
//!
//! A [`RangeScan`] holds backend resources (a snapshot, a pooled connection)
//! until it is released. Call [`RangeScan::close`] on the happy path; dropping
//! the scan releases it on every other path, so an early `?` never leaks.
//!
//! ```rust
//! use fxledger_store::{LedgerStore, MemoryLedger};
//!
//! let ledger = MemoryLedger::new();
//! ledger.put_state("a", b"1")?;
//! ledger.put_state("b", b"2")?;
//!
//! let mut scan = ledger.scan_range("a", "b")?;
//! let first = scan.next().transpose()?;
//! assert_eq!(first.map(|entry| entry.key), Some(String::from("a")));
//! scan.close()?;
//! # Ok::<(), fxledger_store::StoreError>(())
//! ```

pub mod duckdb;
pub mod ledger;
pub mod memory;
pub mod migrations;
pub mod scan;

use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub use duckdb::{ConnectionPool, PooledConnection};
pub use ledger::DuckDbLedger;
pub use memory::{FaultPlan, MemoryLedger};
pub use scan::{EmptyCursor, KeyValue, RangeScan, StateCursor};

/// Errors raised by a ledger backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `DuckDB` database error.
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    /// I/O error (file system operations).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The backend refused the call.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// A scan failed while it was being iterated.
    #[error("range scan failed: {0}")]
    Cursor(String),
}

/// Read, write and range-scan primitives of the host ledger.
///
/// Keys are compared byte-wise. Implementations must return scan entries in
/// ascending key order, include `start_inclusive` and exclude `end_exclusive`.
pub trait LedgerStore: Send + Sync {
    /// Write `value` under `key`, replacing any existing value.
    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Read the value stored under `key`.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Open a scan over `[start_inclusive, end_exclusive)`.
    ///
    /// An empty or inverted range yields an empty scan.
    fn scan_range(
        &self,
        start_inclusive: &str,
        end_exclusive: &str,
    ) -> Result<RangeScan<'_>, StoreError>;
}

impl<T: LedgerStore + ?Sized> LedgerStore for &T {
    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).put_state(key, value)
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_state(key)
    }

    fn scan_range(
        &self,
        start_inclusive: &str,
        end_exclusive: &str,
    ) -> Result<RangeScan<'_>, StoreError> {
        (**self).scan_range(start_inclusive, end_exclusive)
    }
}

/// Configuration for the persistent ledger.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory for fxledger data.
    pub home: PathBuf,
    /// Path to the `DuckDB` database file.
    pub db_path: PathBuf,
    /// Maximum number of idle connections kept in the pool.
    pub max_pool_size: usize,
}

impl StoreConfig {
    /// Configuration rooted at the default home, using `db_path` for the database.
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let home = resolve_fxledger_home();
        let db_path = home.join("ledger.duckdb");
        Self {
            home,
            db_path,
            max_pool_size: 4,
        }
    }
}

fn resolve_fxledger_home() -> PathBuf {
    if let Some(path) = env::var_os("FXLEDGER_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".fxledger");
    }

    PathBuf::from(".fxledger")
}
