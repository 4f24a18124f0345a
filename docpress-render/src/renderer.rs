//! Flat substitution renderer.
//!
//! One pass over the template text: every `{{ key }}` whose key exists in
//! the record is replaced, everything else is left untouched. There is no
//! recursion and no template language — substituted values are never
//! re-scanned for placeholders.

use docpress_core::Record;

use crate::template::{placeholder_regex, Template};

/// Render a record into a template, HTML-escaping every substituted value.
///
/// Placeholders with no matching record field remain literally in the
/// output (`{{ name }}`) — a defined outcome, not an error.
pub fn render(template: &Template, record: &Record) -> String {
    substitute(template.text(), record, true)
}

/// Render without escaping. Only for payloads whose values embed
/// pre-built, already-escaped markup (the invoice table); everything
/// user-facing goes through [`render`].
pub fn render_raw(template: &Template, record: &Record) -> String {
    substitute(template.text(), record, false)
}

fn substitute(text: &str, record: &Record, escape: bool) -> String {
    placeholder_regex()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            match record.get(&caps[1]) {
                Some(value) => {
                    let formatted = value.to_string();
                    if escape {
                        escape_html(&formatted)
                    } else {
                        formatted
                    }
                }
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}

/// HTML-entity escaping for text embedded in markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
