//! Document converter boundary.
//!
//! The HTML→PDF engine is an external collaborator: the pipeline hands it
//! markup, a base directory for relative asset resolution, and a
//! stylesheet, and gets back an artifact on disk or a conversion error.
//! [`WkhtmltopdfConverter`] is the production implementation; tests drive
//! the pipeline through scripted implementations of the trait.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// All errors that can arise from a conversion attempt.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// I/O failure staging the conversion payload.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The converter program could not be started at all.
    #[error("could not launch '{program}' (is it installed and on PATH?): {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran but did not produce the artifact.
    #[error("converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConvertError {
    ConvertError::Io {
        path: path.into(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Turns rendered markup into a document artifact at `output`.
///
/// Synchronous and blocking from the pipeline's perspective. `base_dir` is
/// the directory relative asset references resolve against.
pub trait DocumentConverter {
    fn convert(
        &self,
        markup: &str,
        base_dir: &Path,
        stylesheet: &str,
        output: &Path,
    ) -> Result<(), ConvertError>;
}

// ---------------------------------------------------------------------------
// wkhtmltopdf
// ---------------------------------------------------------------------------

/// Converter backed by the external `wkhtmltopdf` binary.
///
/// The markup is staged as a temporary `.html` file inside `base_dir` so
/// relative asset paths resolve the same way they would for a template
/// opened from that directory; the stylesheet travels as a temporary
/// `.css` passed via `--user-style-sheet`.
#[derive(Debug, Clone)]
pub struct WkhtmltopdfConverter {
    program: PathBuf,
}

impl Default for WkhtmltopdfConverter {
    fn default() -> Self {
        WkhtmltopdfConverter {
            program: PathBuf::from("wkhtmltopdf"),
        }
    }
}

impl WkhtmltopdfConverter {
    /// Use a specific binary instead of `wkhtmltopdf` from `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        WkhtmltopdfConverter {
            program: program.into(),
        }
    }
}

impl DocumentConverter for WkhtmltopdfConverter {
    fn convert(
        &self,
        markup: &str,
        base_dir: &Path,
        stylesheet: &str,
        output: &Path,
    ) -> Result<(), ConvertError> {
        let mut page = tempfile::Builder::new()
            .prefix(".docpress-")
            .suffix(".html")
            .tempfile_in(base_dir)
            .map_err(|e| io_err(base_dir, e))?;
        page.write_all(markup.as_bytes())
            .map_err(|e| io_err(page.path(), e))?;

        let mut style = tempfile::Builder::new()
            .prefix(".docpress-")
            .suffix(".css")
            .tempfile_in(base_dir)
            .map_err(|e| io_err(base_dir, e))?;
        style
            .write_all(stylesheet.as_bytes())
            .map_err(|e| io_err(style.path(), e))?;

        let result = Command::new(&self.program)
            .arg("--quiet")
            .arg("--enable-local-file-access")
            .arg("--user-style-sheet")
            .arg(style.path())
            .arg(page.path())
            .arg(output)
            .output()
            .map_err(|source| ConvertError::Launch {
                program: self.program.display().to_string(),
                source,
            })?;

        if !result.status.success() {
            return Err(ConvertError::Failed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_owned(),
            });
        }

        log::debug!("converted: {}", output.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
