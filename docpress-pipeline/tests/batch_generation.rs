//! End-to-end pipeline tests driving the orchestrator through a scripted
//! converter — no external binary involved.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use docpress_core::loader;
use docpress_core::{Record, Value};
use docpress_pipeline::{
    BatchScope, ConvertError, DocumentConverter, Generator, InvoiceConfig, PipelineError,
    RenderMode,
};
use docpress_render::Template;

// ---------------------------------------------------------------------------
// Scripted converter
// ---------------------------------------------------------------------------

/// Writes a stub artifact, or fails when the markup contains a marker.
/// Captures every payload for assertions.
struct ScriptedConverter {
    fail_marker: Option<&'static str>,
    payloads: RefCell<Vec<String>>,
}

impl ScriptedConverter {
    fn ok() -> Self {
        ScriptedConverter {
            fail_marker: None,
            payloads: RefCell::new(Vec::new()),
        }
    }

    fn failing_on(marker: &'static str) -> Self {
        ScriptedConverter {
            fail_marker: Some(marker),
            payloads: RefCell::new(Vec::new()),
        }
    }

    fn payloads(&self) -> Vec<String> {
        self.payloads.borrow().clone()
    }
}

impl DocumentConverter for ScriptedConverter {
    fn convert(
        &self,
        markup: &str,
        _base_dir: &Path,
        _stylesheet: &str,
        output: &Path,
    ) -> Result<(), ConvertError> {
        self.payloads.borrow_mut().push(markup.to_owned());
        if let Some(marker) = self.fail_marker {
            if markup.contains(marker) {
                return Err(ConvertError::Failed {
                    status: "exit status: 1".to_owned(),
                    stderr: "scripted failure".to_owned(),
                });
            }
        }
        fs::write(output, b"%PDF-1.4 stub").map_err(|source| ConvertError::Io {
            path: output.to_path_buf(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn product(id: &str, name: &str, price: i64) -> Record {
    let mut record = Record::new();
    record.insert("id", Value::from(id));
    record.insert("name", Value::from(name));
    record.insert("category", Value::from("Tools"));
    record.insert("price", Value::Integer(price));
    record
}

fn card_template() -> Template {
    Template::from_text("product_card", "<p>{{name}} - {{price}}</p>").unwrap()
}

fn invoice_template() -> Template {
    Template::from_text(
        "order_invoice",
        "<html><body>\
         <h1 class=\"header\">Invoice {{invoice_id}} ({{date}})</h1>\
         <p>{{customer_name}} / {{payment_method}}</p>\
         <table>{{table_rows}}<tr><th>Total</th><td>{{grand_total}}</td></tr></table>\
         </body></html>",
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Per-record batch
// ---------------------------------------------------------------------------

#[test]
fn batch_from_json_source_produces_one_artifact_per_record() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("products.json");
    fs::write(
        &source,
        r#"[{"id":"A1","name":"Widget","category":"Tools","price":10},
            {"id":"A2","name":"Gadget","category":"Tools","price":25}]"#,
    )
    .unwrap();

    let records = loader::load_records(&source);
    assert_eq!(records.len(), 2);

    let converter = ScriptedConverter::ok();
    let out = dir.path().join("output");
    let generator = Generator::new(&converter, &out, dir.path());
    let outcome = generator.generate_all(&card_template(), &records).unwrap();

    assert_eq!(outcome.artifacts.len(), 2);
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.artifacts[0].record_id, "A1");
    assert_eq!(outcome.artifacts[1].record_id, "A2");
    for artifact in &outcome.artifacts {
        assert!(artifact.path.exists(), "artifact written to storage");
        let name = artifact.path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("product_card_"));
        assert!(name.ends_with(".pdf"));
    }

    let payloads = converter.payloads();
    assert_eq!(payloads[0], "<p>Widget - 10</p>");
    assert_eq!(payloads[1], "<p>Gadget - 25</p>");
}

#[test]
fn artifacts_of_one_batch_share_a_timestamp_cohort() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptedConverter::ok();
    let generator = Generator::new(&converter, dir.path().join("out"), dir.path());

    let records = vec![product("A1", "Widget", 10), product("A2", "Gadget", 25)];
    let outcome = generator.generate_all(&card_template(), &records).unwrap();

    let suffix = |artifact: &docpress_pipeline::OutputArtifact| {
        let name = artifact.path.file_name().unwrap().to_string_lossy().into_owned();
        name.trim_start_matches("product_card_")
            .trim_start_matches(&artifact.record_id)
            .to_owned()
    };
    assert_eq!(suffix(&outcome.artifacts[0]), suffix(&outcome.artifacts[1]));
}

#[test]
fn failing_record_is_skipped_and_counted_never_aborting() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptedConverter::failing_on("Broken");
    let generator = Generator::new(&converter, dir.path().join("out"), dir.path());

    let records = vec![
        product("A1", "Widget", 10),
        product("A2", "Broken", 0),
        product("A3", "Gadget", 25),
    ];
    let outcome = generator.generate_all(&card_template(), &records).unwrap();

    assert_eq!(outcome.artifacts.len(), 2, "K produced");
    assert_eq!(outcome.failures.len(), 1, "N-K failed");
    assert_eq!(outcome.attempted(), 3);
    assert_eq!(outcome.failures[0].index, 1);
    assert_eq!(outcome.failures[0].record_id, "A2");
    // The record after the failure was still attempted.
    assert_eq!(outcome.artifacts[1].record_id, "A3");
}

#[test]
fn identifier_falls_back_to_first_field_for_every_record() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptedConverter::ok();
    let generator = Generator::new(&converter, dir.path().join("out"), dir.path());

    let mut first = Record::new();
    first.insert("sku", Value::from("S 1"));
    first.insert("name", Value::from("Widget"));
    let mut second = Record::new();
    second.insert("sku", Value::from("S 2"));
    second.insert("name", Value::from("Gadget"));

    let outcome = generator
        .generate_all(&card_template(), &[first, second])
        .unwrap();
    assert_eq!(outcome.artifacts[0].record_id, "S_1");
    assert_eq!(outcome.artifacts[1].record_id, "S_2");
}

#[test]
fn empty_batch_reports_zero_attempted() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptedConverter::ok();
    let generator = Generator::new(&converter, dir.path().join("out"), dir.path());
    let outcome = generator.generate_all(&card_template(), &[]).unwrap();
    assert_eq!(outcome.attempted(), 0);
}

// ---------------------------------------------------------------------------
// Single mode
// ---------------------------------------------------------------------------

#[test]
fn single_mode_produces_the_selected_record() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptedConverter::ok();
    let generator = Generator::new(&converter, dir.path().join("out"), dir.path());

    let records = vec![product("A1", "Widget", 10), product("A2", "Gadget", 25)];
    let artifact = generator
        .generate_single(&card_template(), &records, 1)
        .unwrap();
    assert_eq!(artifact.record_id, "A2");
    assert_eq!(converter.payloads(), vec!["<p>Gadget - 25</p>".to_owned()]);
}

#[test]
fn single_mode_failure_is_a_hard_stop() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptedConverter::failing_on("Widget");
    let generator = Generator::new(&converter, dir.path().join("out"), dir.path());

    let records = vec![product("A1", "Widget", 10)];
    let err = generator
        .generate_single(&card_template(), &records, 0)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Convert(_)));
}

#[test]
fn single_mode_rejects_out_of_range_index() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptedConverter::ok();
    let generator = Generator::new(&converter, dir.path().join("out"), dir.path());

    let records = vec![product("A1", "Widget", 10)];
    let err = generator
        .generate_single(&card_template(), &records, 5)
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::RecordOutOfRange {
            index: 5,
            available: 1
        }
    ));
}

// ---------------------------------------------------------------------------
// Invoice mode
// ---------------------------------------------------------------------------

#[test]
fn invoice_collapses_records_into_one_document() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptedConverter::ok();
    let generator = Generator::new(&converter, dir.path().join("out"), dir.path());

    let records = vec![
        product("A1", "Widget", 10),
        product("A2", "Gadget", 20),
        product("A3", "Doodad", 30),
        product("A4", "Ignored", 99),
    ];
    let artifact = generator
        .generate_invoice(&invoice_template(), &records, &InvoiceConfig::default())
        .unwrap();

    let name = artifact.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("order_invoice_INV-1001_"));
    assert!(artifact.path.exists());

    let payloads = converter.payloads();
    assert_eq!(payloads.len(), 1, "exactly one conversion");
    let markup = &payloads[0];
    assert_eq!(markup.matches("<tr><td>").count(), 3, "three line rows");
    assert!(markup.contains("<td>60</td>"), "grand total row");
    assert!(markup.contains("Invoice INV-1001"));
    assert!(!markup.contains("Ignored"), "fourth record not selected");
}

#[test]
fn invoice_with_no_records_signals_insufficient_data() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptedConverter::ok();
    let generator = Generator::new(&converter, dir.path().join("out"), dir.path());

    let err = generator
        .generate_invoice(&invoice_template(), &[], &InvoiceConfig::default())
        .unwrap_err();
    assert!(matches!(err, PipelineError::InsufficientData));
    assert!(converter.payloads().is_empty(), "no artifact produced");
}

#[test]
fn generate_dispatches_invoice_mode_exclusively() {
    let dir = TempDir::new().unwrap();
    let converter = ScriptedConverter::ok();
    let generator = Generator::new(&converter, dir.path().join("out"), dir.path());

    let records = vec![product("A1", "Widget", 10), product("A2", "Gadget", 20)];
    let outcome = generator
        .generate(
            &invoice_template(),
            &records,
            RenderMode::Invoice,
            BatchScope::All,
            &InvoiceConfig::default(),
        )
        .unwrap();

    // Invoice mode wins over the per-record scope: one aggregate artifact.
    assert_eq!(outcome.artifacts.len(), 1);
    assert_eq!(converter.payloads().len(), 1);
}
