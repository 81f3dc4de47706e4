//! In-memory [`CatalogStore`] implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::record::{CatalogEntry, ProductRecord};

use super::{CatalogStore, InsertOutcome, Page, ProductFilter, StoreError};

/// Thread-safe in-memory catalog store.
///
/// Entries are kept in insertion order, which is also the stable order returned by
/// the query methods. A sku index makes the duplicate check O(1), and the whole
/// check-and-insert runs under one lock, which is what makes
/// [`CatalogStore::insert_if_absent`] atomic per sku.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<CatalogEntry>,
    by_sku: HashMap<String, usize>,
    next_id: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.entries.len()).unwrap_or(0)
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::unavailable("catalog store lock poisoned"))
    }
}

impl CatalogStore for MemoryStore {
    fn insert_if_absent(&self, record: ProductRecord) -> Result<InsertOutcome, StoreError> {
        let mut inner = self.lock()?;
        if inner.by_sku.contains_key(record.sku()) {
            return Ok(InsertOutcome::Duplicate);
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let index = inner.entries.len();
        inner.by_sku.insert(record.sku().to_owned(), index);
        inner.entries.push(CatalogEntry { id, record });
        Ok(InsertOutcome::Inserted { id })
    }

    fn fetch_page(&self, page: Page) -> Result<Vec<CatalogEntry>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .entries
            .iter()
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect())
    }

    fn filter_by(&self, filter: &ProductFilter, page: Page) -> Result<Vec<CatalogEntry>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .entries
            .iter()
            .filter(|entry| filter.matches(&entry.record))
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect())
    }
}
