//! Aggregate invoice mode: several records collapse into one tabular
//! summary document with computed totals.

use chrono::Local;

use docpress_core::{Record, Value};
use docpress_render::{escape_html, render_raw, Template};

use crate::batch::{Generator, INVOICE_NAME_TOKEN};
use crate::error::PipelineError;
use crate::naming::{self, OutputArtifact};

/// Date format for the invoice header (date-only).
const INVOICE_DATE_FORMAT: &str = "%d.%m.%Y";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Invoice identity: fixed per run, merged into the template alongside the
/// computed line items.
#[derive(Debug, Clone)]
pub struct InvoiceConfig {
    pub invoice_id: String,
    pub customer_name: String,
    pub payment_method: String,
    /// Records taken as line items, from the front of the sequence.
    pub max_items: usize,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        InvoiceConfig {
            invoice_id: "INV-1001".to_owned(),
            customer_name: "Retail customer".to_owned(),
            payment_method: "Bank transfer".to_owned(),
            max_items: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// One invoice row derived from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLineItem {
    /// 1-based row number.
    pub position: usize,
    pub name: String,
    pub category: String,
    pub unit_price: i64,
    /// Fixed at 1.
    pub quantity: u32,
    pub line_total: i64,
}

/// Ordered line items plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSummary {
    pub items: Vec<InvoiceLineItem>,
    pub grand_total: i64,
}

impl InvoiceSummary {
    /// Build a summary from the first `max_items` records.
    ///
    /// `price` is coerced to an integer, defaulting to 0 when absent or
    /// non-numeric; `name`/`category` default to `Unknown`/`Other`. Zero
    /// available records signal [`PipelineError::InsufficientData`].
    pub fn from_records(
        records: &[Record],
        max_items: usize,
    ) -> Result<InvoiceSummary, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::InsufficientData);
        }

        let items: Vec<InvoiceLineItem> = records
            .iter()
            .take(max_items)
            .enumerate()
            .map(|(index, record)| {
                let unit_price = record
                    .get("price")
                    .and_then(Value::to_integer)
                    .unwrap_or(0);
                let quantity = 1u32;
                InvoiceLineItem {
                    position: index + 1,
                    name: text_field(record, "name", "Unknown"),
                    category: text_field(record, "category", "Other"),
                    unit_price,
                    quantity,
                    line_total: unit_price * i64::from(quantity),
                }
            })
            .collect();

        let grand_total = items.iter().map(|item| item.line_total).sum();
        Ok(InvoiceSummary { items, grand_total })
    }

    /// The `<tr>` block for the invoice table, one row per line item,
    /// with name/category escaped for embedding.
    pub fn table_rows(&self) -> String {
        let mut rows = String::new();
        for item in &self.items {
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                item.position,
                escape_html(&item.name),
                escape_html(&item.category),
                item.unit_price,
                item.quantity,
                item.line_total,
            ));
        }
        rows
    }
}

fn text_field(record: &Record, field: &str, default: &str) -> String {
    record
        .get(field)
        .map(|value| value.to_string())
        .unwrap_or_else(|| default.to_owned())
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

impl Generator<'_> {
    /// Collapse `records` into one invoice document.
    ///
    /// The merged payload already contains escaped markup (`table_rows`),
    /// so substitution is raw. Produces exactly one artifact.
    pub fn generate_invoice(
        &self,
        template: &Template,
        records: &[Record],
        config: &InvoiceConfig,
    ) -> Result<OutputArtifact, PipelineError> {
        let timestamp = naming::batch_timestamp();
        let summary = InvoiceSummary::from_records(records, config.max_items)?;
        self.ensure_output_dir()?;

        let mut payload = Record::new();
        payload.insert("invoice_id", Value::from(config.invoice_id.clone()));
        payload.insert("customer_name", Value::from(config.customer_name.clone()));
        payload.insert(
            "date",
            Value::from(Local::now().format(INVOICE_DATE_FORMAT).to_string()),
        );
        payload.insert("payment_method", Value::from(config.payment_method.clone()));
        payload.insert("table_rows", Value::from(summary.table_rows()));
        payload.insert("grand_total", Value::Integer(summary.grand_total));

        let markup = render_raw(template, &payload);
        let file_name = naming::artifact_file_name(
            INVOICE_NAME_TOKEN,
            &naming::sanitize(&config.invoice_id),
            &timestamp,
        );
        let path = self.output_dir.join(file_name);
        self.convert(&markup, &path)?;

        log::info!(
            "invoice {} written ({} items, total {}): {}",
            config.invoice_id,
            summary.items.len(),
            summary.grand_total,
            path.display()
        );
        Ok(OutputArtifact {
            path,
            record_id: config.invoice_id.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
