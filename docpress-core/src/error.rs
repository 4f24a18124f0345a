//! Error types for docpress-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading a source file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O failure (file missing, permission denied, etc.).
    #[error("failed to read source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parse error — includes the file path for context.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON parse error — includes the file path for context.
    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Structurally valid JSON that is not an object or array of objects.
    #[error("unexpected JSON shape in {path}: {detail}")]
    Malformed { path: PathBuf, detail: String },

    /// File extension is neither `.csv` nor `.json`. A normal, expected
    /// outcome for stray files in a data directory, not a hard fault.
    #[error("unsupported source format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Convenience constructor for [`LoadError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.into(),
        source,
    }
}
