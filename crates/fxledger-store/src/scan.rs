//! Range scan handle shared by all ledger backends.

use crate::StoreError;

/// One `(key, value)` pair returned by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Backend side of a range scan.
pub trait StateCursor {
    /// Next entry in ascending key order, `None` once exhausted.
    fn next_entry(&mut self) -> Option<Result<KeyValue, StoreError>>;

    /// Free the resources held by the cursor. Called exactly once.
    fn close(&mut self) -> Result<(), StoreError>;
}

/// Cursor over nothing, used for empty or inverted ranges.
#[derive(Debug, Default)]
pub struct EmptyCursor;

impl StateCursor for EmptyCursor {
    fn next_entry(&mut self) -> Option<Result<KeyValue, StoreError>> {
        None
    }

    fn close(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// An open range scan.
///
/// Iterating yields entries in ascending key order. The underlying cursor is
/// released by [`RangeScan::close`] or, failing that, when the scan is dropped.
pub struct RangeScan<'a> {
    cursor: Box<dyn StateCursor + 'a>,
    released: bool,
}

impl<'a> RangeScan<'a> {
    pub fn new(cursor: impl StateCursor + 'a) -> Self {
        Self {
            cursor: Box::new(cursor),
            released: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(EmptyCursor)
    }

    /// Release the scan and report any error raised while doing so.
    pub fn close(mut self) -> Result<(), StoreError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), StoreError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.cursor.close()
    }
}

impl Iterator for RangeScan<'_> {
    type Item = Result<KeyValue, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.released {
            return None;
        }
        self.cursor.next_entry()
    }
}

impl Drop for RangeScan<'_> {
    fn drop(&mut self) {
        if let Err(error) = self.release() {
            tracing::warn!(%error, "failed to release range scan");
        }
    }
}

impl std::fmt::Debug for RangeScan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeScan")
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}
