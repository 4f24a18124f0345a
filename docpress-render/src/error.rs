//! Error types for docpress-render.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template handling.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Underlying I/O failure reading a template file.
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text does not scan as markup with at least one element.
    /// Rendering must not proceed past this.
    #[error("template '{name}' is not well-formed markup: {detail}")]
    InvalidTemplate { name: String, detail: String },
}
