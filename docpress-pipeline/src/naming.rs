//! Deterministic artifact naming.
//!
//! Per-record documents: `<templateStem>_<recordId>_<timestamp>.pdf`.
//! Aggregate documents: `order_invoice_<invoiceId>_<timestamp>.pdf`.
//! The timestamp is captured once per run, so every artifact of a batch
//! forms one sortable file-name cohort.

use std::path::PathBuf;

use chrono::Local;

use docpress_core::Record;

/// Timestamp component shared by all artifacts of one run.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Identifier used when a record lacks the designated identifier field.
pub const UNKNOWN_ID: &str = "unknown";

// ---------------------------------------------------------------------------
// OutputArtifact
// ---------------------------------------------------------------------------

/// A produced document on storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub path: PathBuf,
    /// Identifier the file name was derived from (record id or invoice id).
    pub record_id: String,
}

// ---------------------------------------------------------------------------
// Naming helpers
// ---------------------------------------------------------------------------

/// Capture the run timestamp (local time).
pub fn batch_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Designated identifier field for a batch: a field literally named `id`
/// in the first record, else the first field of the first record. Applied
/// uniformly across the whole batch.
pub fn identifier_field(records: &[Record]) -> Option<&str> {
    let first = records.first()?;
    if first.contains("id") {
        Some("id")
    } else {
        first.first_key()
    }
}

/// A record's identifier value under `field`, normalized for file names.
/// Missing field → [`UNKNOWN_ID`].
pub fn record_identifier(record: &Record, field: &str) -> String {
    record
        .get(field)
        .map(|value| sanitize(&value.to_string()))
        .unwrap_or_else(|| UNKNOWN_ID.to_owned())
}

/// File-name form of an identifier: spaces become underscores.
pub fn sanitize(id: &str) -> String {
    id.replace(' ', "_")
}

/// `<stem>_<id>_<timestamp>.pdf`
pub fn artifact_file_name(stem: &str, id: &str, timestamp: &str) -> String {
    format!("{stem}_{id}_{timestamp}.pdf")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
