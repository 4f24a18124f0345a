//! Error types for docpress-pipeline.

use std::path::PathBuf;

use thiserror::Error;

use docpress_render::TemplateError;

use crate::convert::ConvertError;

/// All errors that can arise from a generation run.
///
/// In All mode, `Convert` and `Io` occurring for an individual record are
/// recovered locally (logged, counted, skipped); everything else is
/// structural and surfaces before rendering begins.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An error from the template store.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// The document converter could not produce an artifact.
    #[error("conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Single mode was asked for a record index the source does not have.
    #[error("record index {index} out of range (source has {available} records)")]
    RecordOutOfRange { index: usize, available: usize },

    /// Aggregate mode with zero eligible records: no artifact is produced.
    #[error("not enough data to build an invoice (no records)")]
    InsufficientData,
}

/// Convenience constructor for [`PipelineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PipelineError {
    PipelineError::Io {
        path: path.into(),
        source,
    }
}
