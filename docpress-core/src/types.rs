//! Domain types for loaded source data.
//!
//! A [`Record`] is an ordered field-name → [`Value`] mapping. Order is part
//! of the contract: the batch orchestrator falls back to "first field of
//! the first record" when no `id` field exists, so records must preserve
//! the order their source declared.

use std::fmt;

use chrono::NaiveDateTime;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Render format for date/time values throughout the pipeline.
pub const DATE_TIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A scalar field value, normalized at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Naive local date/time; renders as `DD.MM.YYYY HH:MM:SS`.
    DateTime(NaiveDateTime),
}

impl Value {
    /// Best-effort integer coercion.
    ///
    /// `Float` truncates toward zero; `Text` parses after trimming.
    /// Returns `None` for non-numeric text, bools and dates.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Float(f) => Some(*f as i64),
            Value::Text(s) => s.trim().parse::<i64>().ok(),
            Value::Bool(_) | Value::DateTime(_) => None,
        }
    }

    /// True for `Text` values (the only kind the CSV column probe retypes).
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATE_TIME_FORMAT)),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::DateTime(dt) => {
                serializer.serialize_str(&dt.format(DATE_TIME_FORMAT).to_string())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One flat record: field names mapped to scalar values, in source order.
///
/// Immutable once loaded; field counts are small (CSV columns / JSON keys),
/// so lookups scan the field list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Append a field. Last write wins on duplicate names.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field name declared first by the source, if any.
    pub fn first_key(&self) -> Option<&str> {
        self.fields.first().map(|(n, _)| n.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
