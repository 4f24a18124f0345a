//! # docpress-pipeline
//!
//! Batch orchestration: drives the renderer and the document converter
//! across records, isolating per-record failures, and owns the aggregate
//! invoice mode.
//!
//! Call [`Generator::generate`] with an explicit [`RenderMode`] — resolved
//! once at template-selection time (see [`RenderMode::infer`]) — and a
//! [`BatchScope`] for per-record runs.

pub mod batch;
pub mod convert;
pub mod error;
pub mod invoice;
pub mod naming;
pub mod viewer;

pub use batch::{BatchOutcome, BatchScope, Generator, RecordFailure, RenderMode};
pub use convert::{ConvertError, DocumentConverter, WkhtmltopdfConverter};
pub use error::PipelineError;
pub use invoice::{InvoiceConfig, InvoiceLineItem, InvoiceSummary};
pub use naming::OutputArtifact;
