//! Batch ingestion entrypoint.
//!
//! [`ingest`] ties the pipeline together: decode the buffer, validate every row,
//! submit valid records to the [`crate::store::CatalogStore`] in file order, and
//! report the outcome. Row failures never abort the batch; only decode errors and
//! storage unavailability do.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{IngestError, IngestResult};
use crate::store::{CatalogStore, InsertOutcome};

use super::decode::decode;
use super::observability::{IngestContext, IngestObserver, IngestSeverity, IngestStats};
use super::validate::{validate_row, RowFailure};

/// Options controlling batch ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestOptions {
    /// Validate rows on the rayon thread pool.
    ///
    /// Outcome order is file order either way, and records reach the store in file
    /// order regardless, so intra-file duplicate detection is unaffected.
    pub parallel_validation: bool,
    /// Optional label for the input (e.g. the uploaded filename), used in observer
    /// events.
    pub source: Option<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestSeverity,
}

impl fmt::Debug for IngestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestOptions")
            .field("parallel_validation", &self.parallel_validation)
            .field("source", &self.source)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            parallel_validation: false,
            source: None,
            observer: None,
            alert_at_or_above: IngestSeverity::Critical,
        }
    }
}

/// One failed outcome in an [`IngestReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IngestFailure {
    /// The store already held an entry with this sku; nothing was written.
    Duplicate(DuplicateFailure),
    /// The row was rejected before reaching the store.
    Row(RowFailure),
}

/// A record the store refused because its sku already exists.
///
/// Serializes as `{ "sku": "...", "error": "duplicate_or_not_inserted" }`, the wire
/// reason listing/upload clients already consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateFailure {
    /// The sku that was already present.
    pub sku: String,
}

impl Serialize for DuplicateFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DuplicateFailure", 2)?;
        s.serialize_field("sku", &self.sku)?;
        s.serialize_field("error", "duplicate_or_not_inserted")?;
        s.end()
    }
}

/// Result of one batch ingestion.
///
/// `failed` lists store rejections first (in submission order), then parse-time
/// rejections (in file order). The ordering between the two groups carries no
/// meaning, but it is stable and callers may rely on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    /// Count of records newly persisted.
    pub stored: usize,
    /// Every rejected row and duplicate submission.
    pub failed: Vec<IngestFailure>,
}

/// Ingest a CSV byte buffer into `store`.
///
/// Decodes the buffer, validates every row independently, and submits valid
/// records to the store one at a time in file order, so a sku that appears twice
/// in one file is stored once and rejected once. The returned report is a
/// best-effort partial result; it is only given up entirely when the input cannot
/// be decoded or the store becomes unavailable.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` with row/stored/failed stats when a report is produced
/// - `on_failure` on a fatal error, with a computed severity
/// - `on_alert` on a fatal error whose severity is >= the configured threshold
///
/// # Examples
///
/// ```rust
/// use catalog_ingest::ingestion::{ingest, IngestOptions};
/// use catalog_ingest::store::MemoryStore;
///
/// # fn main() -> Result<(), catalog_ingest::IngestError> {
/// let csv = b"sku,name,brand,mrp,price,quantity\nA1,Shirt,Acme,500,450,10\n";
/// let store = MemoryStore::new();
/// let report = ingest(csv, &store, &IngestOptions::default())?;
/// assert_eq!(report.stored, 1);
/// assert!(report.failed.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn ingest<S: CatalogStore + ?Sized>(
    bytes: &[u8],
    store: &S,
    options: &IngestOptions,
) -> IngestResult<IngestReport> {
    let ctx = IngestContext {
        source: options.source.clone(),
        bytes: bytes.len(),
    };

    let result = run_batch(bytes, store, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((report, rows)) => obs.on_success(
                &ctx,
                IngestStats {
                    rows: *rows,
                    stored: report.stored,
                    failed: report.failed.len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(report, _)| report)
}

fn run_batch<S: CatalogStore + ?Sized>(
    bytes: &[u8],
    store: &S,
    options: &IngestOptions,
) -> IngestResult<(IngestReport, usize)> {
    let rows = decode(bytes)?;
    let row_count = rows.len();

    // Validation is per-row independent; parallelizing it preserves outcome order.
    let outcomes: Vec<_> = if options.parallel_validation {
        rows.par_iter().map(validate_row).collect()
    } else {
        rows.iter().map(validate_row).collect()
    };

    let mut records = Vec::new();
    let mut parse_failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(record) => records.push(record),
            Err(failure) => parse_failures.push(failure),
        }
    }

    // Submission stays in file order so earlier rows win intra-file sku conflicts.
    let mut stored = 0;
    let mut failed = Vec::new();
    for record in records {
        let sku = record.sku().to_owned();
        match store.insert_if_absent(record)? {
            InsertOutcome::Inserted { .. } => stored += 1,
            InsertOutcome::Duplicate => failed.push(IngestFailure::Duplicate(DuplicateFailure { sku })),
        }
    }

    failed.extend(parse_failures.into_iter().map(IngestFailure::Row));
    Ok((IngestReport { stored, failed }, row_count))
}

fn severity_for_error(e: &IngestError) -> IngestSeverity {
    match e {
        IngestError::Decode(_) => IngestSeverity::Error,
        IngestError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => IngestSeverity::Critical,
            _ => IngestSeverity::Error,
        },
        IngestError::Storage(_) => IngestSeverity::Critical,
    }
}
