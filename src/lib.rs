//! `catalog-ingest` is a small library for ingesting bulk product-catalog CSV data
//! into a deduplicating [`store::CatalogStore`], with per-row validation and
//! itemized failure reporting.
//!
//! The primary entrypoint is [`ingestion::ingest`], which takes the full CSV byte
//! buffer (as uploaded), runs every row through the validation pipeline, and
//! submits accepted records to the store one at a time. Rejected rows never abort
//! the batch; the caller always gets a best-effort [`ingestion::IngestReport`]
//! unless the input cannot be decoded at all or the store goes away.
//!
//! ## What a row must look like
//!
//! Required columns (case-sensitive header names, any order): `sku`, `name`,
//! `brand`, `mrp`, `price`. Optional: `color`, `size`, `quantity` (defaults to 0
//! when empty). Unknown columns are ignored. Per row, in order:
//!
//! 1. required columns present and non-empty
//! 2. `mrp`/`price` parse as floats, `quantity` as an integer
//! 3. `price <= mrp` and `quantity >= 0`
//! 4. record construction re-checks every invariant
//!
//! The first failed stage rejects the row with a structured
//! [`ingestion::RowRejection`]; accepted rows become immutable
//! [`record::ProductRecord`]s. Duplicate skus (against the store *or* earlier in
//! the same file) are stored once and reported once.
//!
//! ## Quick example
//!
//! ```rust
//! use catalog_ingest::ingestion::{ingest, IngestOptions};
//! use catalog_ingest::store::{CatalogStore, MemoryStore, Page};
//!
//! # fn main() -> Result<(), catalog_ingest::IngestError> {
//! let csv = b"sku,name,brand,mrp,price,quantity\n\
//!             A1,Shirt,Acme,500,450,10\n\
//!             A2,Hat,Acme,200,abc,1\n";
//!
//! let store = MemoryStore::new();
//! let report = ingest(csv, &store, &IngestOptions::default())?;
//!
//! assert_eq!(report.stored, 1);
//! assert_eq!(report.failed.len(), 1); // A2: price is not a number
//!
//! let page = store.fetch_page(Page::default())?;
//! assert_eq!(page[0].record.sku(), "A1");
//! # Ok(())
//! # }
//! ```
//!
//! ## Querying the store
//!
//! The store exposes the simple query surface listing/search layers sit on:
//! [`store::CatalogStore::fetch_page`] and [`store::CatalogStore::filter_by`], both
//! paged via [`store::Page`] (limit clamped to 1..=100) and returning entries in a
//! stable insertion order.
//!
//! ```rust
//! use catalog_ingest::ingestion::{ingest, IngestOptions};
//! use catalog_ingest::store::{CatalogStore, MemoryStore, Page, ProductFilter};
//!
//! # fn main() -> Result<(), catalog_ingest::IngestError> {
//! let csv = b"sku,name,brand,mrp,price,color\n\
//!             A1,Shirt,Acme,500,450,red\n\
//!             B1,Cap,Borealis,100,90,blue\n";
//! let store = MemoryStore::new();
//! ingest(csv, &store, &IngestOptions::default())?;
//!
//! let filter = ProductFilter {
//!     brand: Some("Acme".to_string()),
//!     ..Default::default()
//! };
//! let hits = store.filter_by(&filter, Page::default())?;
//! assert_eq!(hits.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: decode, per-row validation, and the batch entrypoint
//! - [`record`]: the validated product record and persisted entry types
//! - [`store`]: the storage collaborator trait and in-memory implementation
//! - [`error`]: fatal error types (row rejections are report data, not errors)

pub mod error;
pub mod ingestion;
pub mod record;
pub mod store;

pub use error::{IngestError, IngestResult};
