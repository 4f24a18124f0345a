//! Source file loading — CSV and JSON → `Vec<Record>`.
//!
//! # API pattern
//!
//! Two forms per the crate contract:
//! - [`try_load_records`] — strict; returns `Result` with the full error.
//! - [`load_records`] — lossy; logs the failure and returns an empty
//!   sequence. Callers treat empty as their stop condition.
//!
//! # CSV column typing
//!
//! Every column starts as text. A column is retyped only when **every**
//! non-empty value in it agrees: all integers → `Integer`, else all floats
//! → `Float`, else all dates under the format probe → `DateTime`. One
//! non-conforming value keeps the whole column text; probe failures never
//! abort the load. JSON values keep the types the document declares.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value as JsonValue;

use crate::error::{io_err, LoadError};
use crate::types::{Record, Value};

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Load records from `path`, logging any failure and returning an empty
/// sequence instead of an error.
pub fn load_records(path: &Path) -> Vec<Record> {
    match try_load_records(path) {
        Ok(records) => records,
        Err(err @ LoadError::UnsupportedFormat { .. }) => {
            log::warn!("{err}");
            Vec::new()
        }
        Err(err) => {
            log::error!("{err}");
            Vec::new()
        }
    }
}

/// Load records from `path`, dispatching on the file extension.
pub fn try_load_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        _ => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Float,
    DateTime,
    Text,
}

fn load_csv(path: &Path) -> Result<Vec<Record>, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_owned())
        .collect();

    let mut rows = Vec::new();
    for row in reader.records() {
        rows.push(row.map_err(csv_err)?);
    }

    let column_types: Vec<ColumnType> = (0..headers.len())
        .map(|col| probe_column(rows.iter().filter_map(|row| row.get(col))))
        .collect();

    let records = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(col, header)| {
                    let cell = row.get(col).unwrap_or_default();
                    (header.clone(), typed_cell(cell, column_types[col]))
                })
                .collect()
        })
        .collect();
    Ok(records)
}

/// Decide a column's type from its non-empty values.
fn probe_column<'a>(values: impl Iterator<Item = &'a str> + Clone) -> ColumnType {
    let mut non_empty = values.map(str::trim).filter(|v| !v.is_empty()).peekable();
    if non_empty.peek().is_none() {
        return ColumnType::Text;
    }
    if non_empty.clone().all(|v| v.parse::<i64>().is_ok()) {
        return ColumnType::Integer;
    }
    if non_empty.clone().all(|v| v.parse::<f64>().is_ok()) {
        return ColumnType::Float;
    }
    if non_empty.clone().all(|v| parse_date_time(v).is_some()) {
        return ColumnType::DateTime;
    }
    ColumnType::Text
}

fn typed_cell(cell: &str, column_type: ColumnType) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Text(String::new());
    }
    match column_type {
        ColumnType::Integer => trimmed
            .parse::<i64>()
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Text(cell.to_owned())),
        ColumnType::Float => trimmed
            .parse::<f64>()
            .map(Value::Float)
            .unwrap_or_else(|_| Value::Text(cell.to_owned())),
        ColumnType::DateTime => parse_date_time(trimmed)
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Text(cell.to_owned())),
        ColumnType::Text => Value::Text(cell.to_owned()),
    }
}

// ---------------------------------------------------------------------------
// Date probing
// ---------------------------------------------------------------------------

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

/// Best-effort date/time parse over the supported formats.
///
/// Date-only forms resolve to midnight.
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<Record>, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let document: JsonValue = serde_json::from_str(&contents).map_err(|e| LoadError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    match document {
        JsonValue::Object(map) => Ok(vec![object_to_record(&map)]),
        JsonValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                JsonValue::Object(map) => Ok(object_to_record(map)),
                other => Err(LoadError::Malformed {
                    path: path.to_path_buf(),
                    detail: format!("element {index} is {}, expected an object", kind(other)),
                }),
            })
            .collect(),
        other => Err(LoadError::Malformed {
            path: path.to_path_buf(),
            detail: format!(
                "top level is {}, expected an object or array of objects",
                kind(&other)
            ),
        }),
    }
}

fn object_to_record(map: &serde_json::Map<String, JsonValue>) -> Record {
    map.iter()
        .map(|(key, value)| (key.clone(), scalar_value(value)))
        .collect()
}

/// Map a JSON value to a record scalar. Nested structures are stringified
/// as compact JSON, never interpreted.
fn scalar_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Value::Integer)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or_else(|| Value::Text(n.to_string())),
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Text(String::new()),
        nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => Value::Text(nested.to_string()),
    }
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a bool",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
