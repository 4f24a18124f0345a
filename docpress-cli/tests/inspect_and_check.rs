//! CLI integration tests for the non-converting subcommands.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docpress() -> Command {
    Command::cargo_bin("docpress").expect("docpress binary")
}

#[test]
fn inspect_shows_a_record_table() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("products.csv");
    fs::write(&data, "id,name,price\nA1,Widget,10\nA2,Gadget,25\n").unwrap();

    docpress()
        .arg("inspect")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records"))
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("price"));
}

#[test]
fn inspect_limit_truncates_output() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("products.csv");
    fs::write(&data, "id\nA1\nA2\nA3\n").unwrap();

    docpress()
        .args(["inspect", "--limit", "1"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("showing 1"))
        .stdout(predicate::str::contains("and 2 more"));
}

#[test]
fn inspect_json_emits_parseable_records() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("products.json");
    fs::write(&data, r#"[{"id":"A1","price":10}]"#).unwrap();

    let output = docpress()
        .args(["inspect", "--json"])
        .arg(&data)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output).expect("inspect --json emits valid JSON");
    assert_eq!(parsed[0]["id"], "A1");
    assert_eq!(parsed[0]["price"], 10);
}

#[test]
fn inspect_unreadable_source_is_a_stop_condition() {
    let dir = TempDir::new().unwrap();
    docpress()
        .arg("inspect")
        .arg(dir.path().join("absent.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no records"));
}

#[test]
fn check_lists_placeholders_and_mode() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("product_card.html");
    fs::write(&template, "<p>{{name}} - {{price}} {{name}}</p>").unwrap();

    docpress()
        .arg("check")
        .arg(&template)
        .assert()
        .success()
        .stdout(predicate::str::contains("well-formed"))
        .stdout(predicate::str::contains("name, price"))
        .stdout(predicate::str::contains("per-record"));
}

#[test]
fn check_flags_invoice_templates() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("order_invoice.html");
    fs::write(&template, "<table>{{table_rows}}</table>").unwrap();

    docpress()
        .arg("check")
        .arg(&template)
        .assert()
        .success()
        .stdout(predicate::str::contains("invoice (aggregate)"));
}

#[test]
fn check_rejects_markup_without_elements() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("plain.html");
    fs::write(&template, "no markup here").unwrap();

    docpress()
        .arg("check")
        .arg(&template)
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejected"));
}

#[test]
fn generate_with_unsupported_source_stops_before_rendering() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("notes.txt");
    fs::write(&data, "not a source").unwrap();
    let template = dir.path().join("card.html");
    fs::write(&template, "<p>{{name}}</p>").unwrap();

    docpress()
        .arg("generate")
        .arg(&data)
        .arg(&template)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no records loaded"));
}

#[test]
fn init_creates_the_directory_layout() {
    let dir = TempDir::new().unwrap();
    docpress()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success();

    for name in ["data", "templates", "output"] {
        assert!(dir.path().join(name).is_dir(), "{name}/ should exist");
    }
}
