//! In-memory edge store.
//!
//! The reference implementation of `EdgeStore`: a record list behind an
//! `RwLock`. Clones share the same records, so a test can hold one handle,
//! edit the edge list, and reload a `RouteGraph` that owns another.
//!
//! Records are kept exactly as inserted (duplicates included); collapsing
//! duplicate pairs is the loader's job.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::model::EdgeRecord;
use crate::Result;
use super::EdgeStore;

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory edge table.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Vec<EdgeRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = EdgeRecord>) -> Self {
        Self { inner: Arc::new(RwLock::new(records.into_iter().collect())) }
    }

    /// Append one record.
    pub fn insert(&self, record: EdgeRecord) {
        self.inner.write().push(record);
    }

    pub fn extend(&self, records: impl IntoIterator<Item = EdgeRecord>) {
        self.inner.write().extend(records);
    }

    /// Replace the whole edge table.
    pub fn replace_all(&self, records: impl IntoIterator<Item = EdgeRecord>) {
        let fresh: Vec<EdgeRecord> = records.into_iter().collect();
        *self.inner.write() = fresh;
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

// ============================================================================
// EdgeStore impl
// ============================================================================

#[async_trait]
impl EdgeStore for MemoryStore {
    async fn fetch_edges(&self) -> Result<Vec<EdgeRecord>> {
        Ok(self.inner.read().clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} records)", self.len())
    }
}
