//! Batch orchestration across records.
//!
//! The render mode is an explicit value resolved once at template-selection
//! time ([`RenderMode::infer`] keeps the historical name-based default) and
//! passed into [`Generator::generate`] — never re-inferred mid-run.
//!
//! All-mode processing is a fold over the record sequence accumulating
//! produced artifacts and per-record failures; no error crosses a record
//! boundary, so a batch always completes with a best-effort result set.

use std::path::{Path, PathBuf};

use docpress_core::Record;
use docpress_render::{render, Template, DEFAULT_STYLESHEET};

use crate::convert::DocumentConverter;
use crate::error::{io_err, PipelineError};
use crate::invoice::InvoiceConfig;
use crate::naming::{self, OutputArtifact};

// ---------------------------------------------------------------------------
// RenderMode / BatchScope
// ---------------------------------------------------------------------------

/// Template name marker that selects the aggregate invoice path.
pub const INVOICE_NAME_TOKEN: &str = "order_invoice";

/// How a template is turned into documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// One document per record.
    PerRecord,
    /// All records collapse into one aggregate invoice document.
    Invoice,
}

impl RenderMode {
    /// Default inference from the template name: a template whose name
    /// contains `order_invoice` is an invoice template. Callers may
    /// override the result; the orchestrator only ever sees the resolved
    /// value.
    pub fn infer(template_name: &str) -> RenderMode {
        if template_name.to_lowercase().contains(INVOICE_NAME_TOKEN) {
            RenderMode::Invoice
        } else {
            RenderMode::PerRecord
        }
    }
}

/// Which records a per-record run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchScope {
    /// Every record in loader order.
    All,
    /// One record by zero-based index; failure is a hard stop.
    Single(usize),
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// A record that failed inside an All-mode batch.
#[derive(Debug)]
pub struct RecordFailure {
    pub index: usize,
    pub record_id: String,
    pub error: PipelineError,
}

/// Result of a generation run: what was produced and what failed.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub artifacts: Vec<OutputArtifact>,
    pub failures: Vec<RecordFailure>,
}

impl BatchOutcome {
    fn from_single(artifact: OutputArtifact) -> Self {
        BatchOutcome {
            artifacts: vec![artifact],
            failures: Vec::new(),
        }
    }

    /// Records attempted = produced + failed.
    pub fn attempted(&self) -> usize {
        self.artifacts.len() + self.failures.len()
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Drives renderer + converter for one run.
///
/// Holds everything that is constant across the records of a run: the
/// converter, the output directory, the asset base directory, and the
/// stylesheet shipped with every payload.
pub struct Generator<'a> {
    converter: &'a dyn DocumentConverter,
    pub(crate) output_dir: PathBuf,
    assets_dir: PathBuf,
    stylesheet: String,
}

impl<'a> Generator<'a> {
    pub fn new(
        converter: &'a dyn DocumentConverter,
        output_dir: impl Into<PathBuf>,
        assets_dir: impl Into<PathBuf>,
    ) -> Self {
        Generator {
            converter,
            output_dir: output_dir.into(),
            assets_dir: assets_dir.into(),
            stylesheet: DEFAULT_STYLESHEET.to_owned(),
        }
    }

    /// Replace the default stylesheet for this run.
    pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.stylesheet = stylesheet.into();
        self
    }

    /// Run the resolved mode. Invoice mode ignores `scope` — the two paths
    /// are mutually exclusive by construction.
    pub fn generate(
        &self,
        template: &Template,
        records: &[Record],
        mode: RenderMode,
        scope: BatchScope,
        invoice: &InvoiceConfig,
    ) -> Result<BatchOutcome, PipelineError> {
        match mode {
            RenderMode::Invoice => self
                .generate_invoice(template, records, invoice)
                .map(BatchOutcome::from_single),
            RenderMode::PerRecord => match scope {
                BatchScope::All => self.generate_all(template, records),
                BatchScope::Single(index) => self
                    .generate_single(template, records, index)
                    .map(BatchOutcome::from_single),
            },
        }
    }

    /// One document per record, failures isolated per record.
    ///
    /// Never aborts mid-batch: a failed record is logged, counted and
    /// skipped, and the fold moves on in loader order.
    pub fn generate_all(
        &self,
        template: &Template,
        records: &[Record],
    ) -> Result<BatchOutcome, PipelineError> {
        let timestamp = naming::batch_timestamp();
        self.ensure_output_dir()?;
        let id_field = naming::identifier_field(records);

        let mut outcome = BatchOutcome::default();
        for (index, record) in records.iter().enumerate() {
            let record_id = id_field
                .map(|field| naming::record_identifier(record, field))
                .unwrap_or_else(|| naming::UNKNOWN_ID.to_owned());
            match self.produce(template, record, &record_id, &timestamp) {
                Ok(artifact) => {
                    log::info!("wrote: {}", artifact.path.display());
                    outcome.artifacts.push(artifact);
                }
                Err(error) => {
                    log::error!("record {index} ({record_id}) failed: {error}");
                    outcome.failures.push(RecordFailure {
                        index,
                        record_id,
                        error,
                    });
                }
            }
        }
        log::info!(
            "batch finished: {} produced, {} failed of {} attempted",
            outcome.artifacts.len(),
            outcome.failures.len(),
            outcome.attempted()
        );
        Ok(outcome)
    }

    /// One selected record; any failure is a hard stop for the run.
    pub fn generate_single(
        &self,
        template: &Template,
        records: &[Record],
        index: usize,
    ) -> Result<OutputArtifact, PipelineError> {
        let record = records
            .get(index)
            .ok_or(PipelineError::RecordOutOfRange {
                index,
                available: records.len(),
            })?;
        let timestamp = naming::batch_timestamp();
        self.ensure_output_dir()?;
        let record_id = naming::identifier_field(records)
            .map(|field| naming::record_identifier(record, field))
            .unwrap_or_else(|| naming::UNKNOWN_ID.to_owned());
        let artifact = self.produce(template, record, &record_id, &timestamp)?;
        log::info!("wrote: {}", artifact.path.display());
        Ok(artifact)
    }

    fn produce(
        &self,
        template: &Template,
        record: &Record,
        record_id: &str,
        timestamp: &str,
    ) -> Result<OutputArtifact, PipelineError> {
        let markup = render(template, record);
        let file_name = naming::artifact_file_name(template.name(), record_id, timestamp);
        let path = self.output_dir.join(file_name);
        self.convert(&markup, &path)?;
        Ok(OutputArtifact {
            path,
            record_id: record_id.to_owned(),
        })
    }

    pub(crate) fn convert(&self, markup: &str, output: &Path) -> Result<(), PipelineError> {
        self.converter
            .convert(markup, &self.assets_dir, &self.stylesheet, output)?;
        Ok(())
    }

    pub(crate) fn ensure_output_dir(&self) -> Result<(), PipelineError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| io_err(&self.output_dir, e))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
