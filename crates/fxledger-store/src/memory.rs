//! In-memory ledger used by tests and embedded callers.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::{KeyValue, LedgerStore, RangeScan, StateCursor, StoreError};

/// Failures to inject into a [`MemoryLedger`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaultPlan {
    /// Every `put_state` fails.
    pub fail_puts: bool,
    /// Every `get_state` fails.
    pub fail_gets: bool,
    /// Opening a scan fails.
    pub fail_scan_open: bool,
    /// Scans fail after yielding this many entries.
    pub fail_scan_after: Option<usize>,
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<String, Vec<u8>>,
    faults: FaultPlan,
}

#[derive(Debug, Default)]
struct MemoryInner {
    state: RwLock<MemoryState>,
    open_scans: Arc<AtomicUsize>,
}

/// Ordered ledger kept in a `BTreeMap`.
///
/// Clones share the same map. Scans snapshot their range when opened.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    inner: Arc<MemoryInner>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active fault plan.
    pub fn set_faults(&self, faults: FaultPlan) {
        self.write_state().faults = faults;
    }

    /// Number of scans opened and not yet released.
    pub fn open_scans(&self) -> usize {
        self.inner.open_scans.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.read_state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_state().entries.is_empty()
    }

    /// All stored keys in ledger order.
    pub fn keys(&self) -> Vec<String> {
        self.read_state().entries.keys().cloned().collect()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, MemoryState> {
        self.inner
            .state
            .read()
            .expect("memory ledger lock is not poisoned")
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, MemoryState> {
        self.inner
            .state
            .write()
            .expect("memory ledger lock is not poisoned")
    }
}

impl LedgerStore for MemoryLedger {
    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut state = self.write_state();
        if state.faults.fail_puts {
            return Err(StoreError::Unavailable(format!("injected put failure for '{key}'")));
        }
        state.entries.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let state = self.read_state();
        if state.faults.fail_gets {
            return Err(StoreError::Unavailable(format!("injected get failure for '{key}'")));
        }
        Ok(state.entries.get(key).cloned())
    }

    fn scan_range(
        &self,
        start_inclusive: &str,
        end_exclusive: &str,
    ) -> Result<RangeScan<'_>, StoreError> {
        let state = self.read_state();
        if state.faults.fail_scan_open {
            return Err(StoreError::Unavailable(String::from(
                "injected scan open failure",
            )));
        }

        // BTreeMap::range panics on inverted bounds.
        let entries = if start_inclusive < end_exclusive {
            state
                .entries
                .range::<str, _>((
                    Bound::Included(start_inclusive),
                    Bound::Excluded(end_exclusive),
                ))
                .map(|(key, value)| KeyValue::new(key.clone(), value.clone()))
                .collect()
        } else {
            Vec::new()
        };
        let fail_after = state.faults.fail_scan_after;
        drop(state);

        self.inner.open_scans.fetch_add(1, Ordering::SeqCst);
        Ok(RangeScan::new(MemoryCursor {
            entries: entries.into_iter(),
            yielded: 0,
            fail_after,
            failed: false,
            open_scans: Arc::clone(&self.inner.open_scans),
        }))
    }
}

struct MemoryCursor {
    entries: std::vec::IntoIter<KeyValue>,
    yielded: usize,
    fail_after: Option<usize>,
    failed: bool,
    open_scans: Arc<AtomicUsize>,
}

impl StateCursor for MemoryCursor {
    fn next_entry(&mut self) -> Option<Result<KeyValue, StoreError>> {
        if self.failed {
            return None;
        }
        if self.fail_after == Some(self.yielded) {
            self.failed = true;
            return Some(Err(StoreError::Cursor(format!(
                "injected failure after {} entries",
                self.yielded
            ))));
        }

        let entry = self.entries.next()?;
        self.yielded += 1;
        Some(Ok(entry))
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.open_scans.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
