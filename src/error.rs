use thiserror::Error;

use crate::store::StoreError;

/// Convenience result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Fatal error type returned by ingestion functions.
///
/// These abort the whole batch before (or instead of) producing a report. Per-row
/// rejections are not errors; they are collected in
/// [`crate::ingestion::IngestReport`].
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input bytes are not valid UTF-8 text.
    #[error("decode error: input is not valid utf-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// The CSV reader could not make sense of the input.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The storage collaborator failed for a reason other than a duplicate key.
    ///
    /// Duplicate keys are row-local rejections; this variant means the store itself
    /// is unavailable and the batch cannot meaningfully continue.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
