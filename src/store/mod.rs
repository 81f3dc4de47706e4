//! Catalog storage collaborator.
//!
//! The ingestion pipeline talks to storage through the [`CatalogStore`] trait:
//!
//! - [`CatalogStore::insert_if_absent`]: atomic per-sku check-and-insert. The check
//!   and the insert are one operation, so two concurrent inserts of the same new
//!   sku can never both succeed.
//! - [`CatalogStore::fetch_page`] / [`CatalogStore::filter_by`]: the query surface
//!   used by listing/search layers, paged via [`Page`] and filtered via
//!   [`ProductFilter`].
//!
//! [`MemoryStore`] (from [`memory`]) is the in-process implementation; backends
//! with a real uniqueness constraint satisfy the same contract.

pub mod memory;

use thiserror::Error;

use crate::record::{CatalogEntry, ProductRecord};

pub use memory::MemoryStore;

/// Largest number of entries one page may return.
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size used by [`Page::default`].
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Error from the storage collaborator, other than duplicate-key rejection.
///
/// Duplicates are a normal [`InsertOutcome`], not an error; this type means the
/// store itself could not serve the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store cannot currently serve requests.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Backend-specific description.
        message: String,
    },
}

impl StoreError {
    /// Build an [`StoreError::Unavailable`] from any message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Result of [`CatalogStore::insert_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was persisted as a new entry.
    Inserted {
        /// Surrogate id assigned to the new entry.
        id: u64,
    },
    /// An entry with the same sku already exists; nothing was written.
    Duplicate,
}

/// An offset/limit window over the stable entry order.
///
/// `limit` is clamped to `1..=`[`MAX_PAGE_SIZE`] at construction, so a `Page` value
/// is always within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: usize,
    limit: usize,
}

impl Page {
    /// Create a page, clamping `limit` into `1..=`[`MAX_PAGE_SIZE`].
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of entries to skip.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of entries to return.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// Optional, conjunctive search criteria for [`CatalogStore::filter_by`].
///
/// `brand`/`color` match by equality; the price bounds are inclusive. A default
/// filter matches every entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Exact brand match.
    pub brand: Option<String>,
    /// Exact color match.
    pub color: Option<String>,
    /// Lowest selling price to include.
    pub min_price: Option<f64>,
    /// Highest selling price to include.
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Whether `record` satisfies every set criterion.
    pub fn matches(&self, record: &ProductRecord) -> bool {
        if let Some(brand) = &self.brand {
            if record.brand() != brand {
                return false;
            }
        }
        if let Some(color) = &self.color {
            if record.color() != Some(color.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if record.price() < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if record.price() > max {
                return false;
            }
        }
        true
    }
}

/// Storage collaborator for validated catalog records.
///
/// Implementations must keep `sku` unique across all entries and must return
/// entries from the query methods in a stable order.
pub trait CatalogStore: Send + Sync {
    /// Persist `record` unless an entry with the same sku already exists.
    ///
    /// This is one atomic operation per sku: no interleaving of the existence
    /// check and the insert is observable. Existing entries are never updated.
    fn insert_if_absent(&self, record: ProductRecord) -> Result<InsertOutcome, StoreError>;

    /// Return one page of entries in the store's stable order.
    fn fetch_page(&self, page: Page) -> Result<Vec<CatalogEntry>, StoreError>;

    /// Return one page of the entries matching `filter`, in the same stable order.
    ///
    /// Pagination applies to the filtered sequence, not the underlying one.
    fn filter_by(&self, filter: &ProductFilter, page: Page) -> Result<Vec<CatalogEntry>, StoreError>;
}
