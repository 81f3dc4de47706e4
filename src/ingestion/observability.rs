use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::IngestError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the batch failed).
    Error,
    /// Critical error (typically I/O or storage-infrastructure failures).
    Critical,
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestContext {
    /// Optional caller-supplied label for the input (e.g. an upload filename).
    pub source: Option<String>,
    /// Size of the input buffer in bytes.
    pub bytes: usize,
}

/// Stats reported when a batch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    /// Number of data rows in the input.
    pub rows: usize,
    /// Number of records newly persisted.
    pub stored: usize,
    /// Number of rejected rows and duplicate submissions.
    pub failed: usize,
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts. A completed batch
/// reports `on_success` even when some rows were rejected; `on_failure` is for
/// fatal errors that aborted the batch.
pub trait IngestObserver: Send + Sync {
    /// Called when a batch completes and a report was produced.
    fn on_success(&self, _ctx: &IngestContext, _stats: IngestStats) {}

    /// Called when a batch aborts with a fatal error.
    fn on_failure(&self, _ctx: &IngestContext, _severity: IngestSeverity, _error: &IngestError) {}

    /// Called when a fatal error meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestContext, severity: IngestSeverity, error: &IngestError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestContext, stats: IngestStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestContext, severity: IngestSeverity, error: &IngestError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestContext, severity: IngestSeverity, error: &IngestError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs ingestion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl StdErrObserver {
    fn source_of(ctx: &IngestContext) -> &str {
        ctx.source.as_deref().unwrap_or("<buffer>")
    }
}

impl IngestObserver for StdErrObserver {
    fn on_success(&self, ctx: &IngestContext, stats: IngestStats) {
        eprintln!(
            "[ingest][ok] source={} bytes={} rows={} stored={} failed={}",
            Self::source_of(ctx),
            ctx.bytes,
            stats.rows,
            stats.stored,
            stats.failed
        );
    }

    fn on_failure(&self, ctx: &IngestContext, severity: IngestSeverity, error: &IngestError) {
        eprintln!(
            "[ingest][{:?}] source={} bytes={} err={}",
            severity,
            Self::source_of(ctx),
            ctx.bytes,
            error
        );
    }

    fn on_alert(&self, ctx: &IngestContext, severity: IngestSeverity, error: &IngestError) {
        eprintln!(
            "[ALERT][ingest][{:?}] source={} bytes={} err={}",
            severity,
            Self::source_of(ctx),
            ctx.bytes,
            error
        );
    }
}

/// Appends ingestion events to a local log file as JSON lines.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl IngestObserver for FileObserver {
    fn on_success(&self, ctx: &IngestContext, stats: IngestStats) {
        self.append_line(
            &serde_json::json!({
                "ts": unix_ts(),
                "event": "ok",
                "source": ctx.source,
                "bytes": ctx.bytes,
                "rows": stats.rows,
                "stored": stats.stored,
                "failed": stats.failed,
            })
            .to_string(),
        );
    }

    fn on_failure(&self, ctx: &IngestContext, severity: IngestSeverity, error: &IngestError) {
        self.append_line(
            &serde_json::json!({
                "ts": unix_ts(),
                "event": "fail",
                "severity": format!("{severity:?}"),
                "source": ctx.source,
                "bytes": ctx.bytes,
                "err": error.to_string(),
            })
            .to_string(),
        );
    }

    fn on_alert(&self, ctx: &IngestContext, severity: IngestSeverity, error: &IngestError) {
        self.append_line(
            &serde_json::json!({
                "ts": unix_ts(),
                "event": "alert",
                "severity": format!("{severity:?}"),
                "source": ctx.source,
                "bytes": ctx.bytes,
                "err": error.to_string(),
            })
            .to_string(),
        );
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
