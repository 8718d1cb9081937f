//! Persistent ledger backed by a `DuckDB` file.

use std::fs;
use std::path::Path;

use ::duckdb::ToSql;

use crate::duckdb::{ConnectionPool, PooledConnection};
use crate::{migrations, KeyValue, LedgerStore, RangeScan, StateCursor, StoreConfig, StoreError};

/// Ordered key-value ledger stored in the `ledger_state` table.
///
/// Keys are `TEXT` and compared with `DuckDB`'s default binary collation, so
/// scans follow the same byte order as [`crate::MemoryLedger`].
#[derive(Clone)]
pub struct DuckDbLedger {
    config: StoreConfig,
    pool: ConnectionPool,
}

impl DuckDbLedger {
    /// Open (creating if needed) the ledger described by `config`.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let pool = ConnectionPool::open(config.db_path.clone(), config.max_pool_size)?;
        let ledger = Self { config, pool };
        ledger.initialize()?;
        Ok(ledger)
    }

    /// Apply pending schema migrations.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let connection = self.pool.acquire()?;
        migrations::apply_migrations(&connection)?;
        Ok(())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn db_path(&self) -> &Path {
        self.pool.db_path()
    }

    /// Connections currently parked in the pool.
    pub fn idle_connections(&self) -> usize {
        self.pool.idle_connections()
    }

    /// Number of entries stored in the ledger.
    pub fn len(&self) -> Result<usize, StoreError> {
        let connection = self.pool.acquire()?;
        let count: i64 =
            connection.query_row("SELECT COUNT(*) FROM ledger_state", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl LedgerStore for DuckDbLedger {
    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let connection = self.pool.acquire()?;
        let params: [&dyn ToSql; 2] = [&key, &value];
        connection.execute(
            "INSERT OR REPLACE INTO ledger_state (key, value, updated_at) \
             VALUES (?, ?, CURRENT_TIMESTAMP)",
            params.as_slice(),
        )?;
        tracing::debug!(key, bytes = value.len(), "ledger state written");
        Ok(())
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let connection = self.pool.acquire()?;
        let mut statement = connection.prepare("SELECT value FROM ledger_state WHERE key = ?")?;
        let mut rows = statement.query([key])?;
        let value = match rows.next()? {
            Some(row) => Some(row.get::<_, Vec<u8>>(0)?),
            None => None,
        };
        Ok(value)
    }

    fn scan_range(
        &self,
        start_inclusive: &str,
        end_exclusive: &str,
    ) -> Result<RangeScan<'_>, StoreError> {
        if start_inclusive >= end_exclusive {
            return Ok(RangeScan::empty());
        }

        let connection = self.pool.acquire()?;
        let entries = {
            let mut statement = connection.prepare(
                "SELECT key, value FROM ledger_state \
                 WHERE key >= ? AND key < ? ORDER BY key",
            )?;
            let params: [&dyn ToSql; 2] = [&start_inclusive, &end_exclusive];
            let rows = statement.query_map(params.as_slice(), |row| {
                Ok(KeyValue {
                    key: row.get(0)?,
                    value: row.get(1)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        tracing::debug!(
            start = start_inclusive,
            end = end_exclusive,
            entries = entries.len(),
            "ledger range scan opened"
        );

        Ok(RangeScan::new(DuckDbCursor {
            connection: Some(connection),
            entries: entries.into_iter(),
        }))
    }
}

/// Scan results read in full when the scan is opened.
///
/// Iteration serves that snapshot; writes made after opening are not seen.
/// The pooled connection stays checked out until the scan is released.
struct DuckDbCursor {
    connection: Option<PooledConnection>,
    entries: std::vec::IntoIter<KeyValue>,
}

impl StateCursor for DuckDbCursor {
    fn next_entry(&mut self) -> Option<Result<KeyValue, StoreError>> {
        self.entries.next().map(Ok)
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.connection.take();
        Ok(())
    }
}
