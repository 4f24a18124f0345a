//! # docpress-render
//!
//! Template store and flat substitution renderer.
//!
//! A [`Template`] is raw HTML text with `{{ placeholder }}` markers. The
//! renderer binds one record's values into the text in a single pass,
//! HTML-escaping every substituted value. Placeholders without a matching
//! record field are left verbatim — a defined outcome, not an error.
//!
//! ```rust
//! use docpress_core::{Record, Value};
//! use docpress_render::{render, Template};
//!
//! let template = Template::from_text("card", "<p>{{name}} - {{price}}</p>").unwrap();
//! let mut record = Record::new();
//! record.insert("name", Value::from("Widget"));
//! record.insert("price", Value::Integer(10));
//! assert_eq!(render(&template, &record), "<p>Widget - 10</p>");
//! ```

pub mod error;
pub mod renderer;
pub mod stylesheet;
pub mod template;

pub use error::TemplateError;
pub use renderer::{escape_html, render, render_raw};
pub use stylesheet::DEFAULT_STYLESHEET;
pub use template::Template;
