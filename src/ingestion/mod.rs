//! Ingestion pipeline: decode, validate, store.
//!
//! Most callers should use [`ingest`] (from [`batch`]) which:
//!
//! - decodes a CSV byte buffer into normalized rows
//! - validates every row independently into a record or a [`RowFailure`]
//! - submits valid records to a [`crate::store::CatalogStore`] in file order
//! - optionally reports the outcome to an [`IngestObserver`]
//!
//! Stage-specific pieces are also available under:
//! - [`decode`]
//! - [`validate`]

pub mod batch;
pub mod decode;
pub mod observability;
pub mod validate;

pub use batch::{ingest, DuplicateFailure, IngestFailure, IngestOptions, IngestReport};
pub use decode::{decode, RawRow};
pub use observability::{
    CompositeObserver, FileObserver, IngestContext, IngestObserver, IngestSeverity, IngestStats,
    StdErrObserver,
};
pub use validate::{validate_row, RowFailure, RowRejection, RuleViolation, REQUIRED_FIELDS};
