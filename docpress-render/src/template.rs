//! Template store — raw markup text plus its placeholder set.

use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

use crate::error::TemplateError;

/// `{{ name }}` with optional inner whitespace; names are identifiers.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

pub(crate) fn placeholder_regex() -> &'static Regex {
    &PLACEHOLDER_RE
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A validated template: markup text and the name it is known by
/// (the file stem for file-backed templates).
///
/// Immutable once constructed; both constructors run the markup validity
/// check, so a `Template` in hand is always renderable.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    text: String,
}

impl Template {
    /// Read and validate a template file. The template name is the file
    /// stem (`templates/product_card.html` → `product_card`).
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_text(name, text)
    }

    /// Validate template text under an explicit name.
    pub fn from_text(
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let name = name.into();
        let text = text.into();
        validate_markup(&name, &text)?;
        Ok(Template { name, text })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The deduplicated set of placeholder names in this template.
    ///
    /// A pure function of the template text: recomputing always yields the
    /// same set, and order carries no meaning.
    pub fn placeholders(&self) -> BTreeSet<String> {
        PLACEHOLDER_RE
            .captures_iter(&self.text)
            .map(|cap| cap[1].to_owned())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Markup validity
// ---------------------------------------------------------------------------

/// Lenient well-formedness scan: the text must contain at least one
/// element tag and produce no parse errors.
///
/// End-name matching is disabled so HTML-style void elements (`<br>`,
/// `<hr>`) pass, matching the tolerance of lenient HTML parsers.
fn validate_markup(name: &str, text: &str) -> Result<(), TemplateError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().check_end_names = false;

    let mut saw_element = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) | Ok(Event::Empty(_)) => saw_element = true,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(TemplateError::InvalidTemplate {
                    name: name.to_owned(),
                    detail: err.to_string(),
                })
            }
        }
    }

    if !saw_element {
        return Err(TemplateError::InvalidTemplate {
            name: name.to_owned(),
            detail: "no element found".to_owned(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
