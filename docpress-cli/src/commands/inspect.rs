//! `docpress inspect` — preview the records a source file would load.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use docpress_core::{loader, Record};

/// Arguments for `docpress inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Source data file (.csv or .json).
    pub data: PathBuf,

    /// Number of records to show.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Emit machine-readable JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl InspectArgs {
    pub fn run(self) -> Result<()> {
        let records = loader::load_records(&self.data);
        if records.is_empty() {
            bail!("no records loaded from {}", self.data.display());
        }

        let shown = &records[..records.len().min(self.limit)];

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(shown).context("failed to serialize records")?
            );
            return Ok(());
        }

        println!(
            "{} {} records in {} (showing {})",
            "✓".green(),
            records.len(),
            self.data.display(),
            shown.len()
        );
        println!("{}", preview_table(shown));
        if records.len() > shown.len() {
            println!("… and {} more records", records.len() - shown.len());
        }
        Ok(())
    }
}

/// Build a table over the first record's columns. Records missing a column
/// show an empty cell — JSON sources may have heterogeneous keys.
fn preview_table(records: &[Record]) -> String {
    let headers: Vec<String> = records
        .first()
        .map(|record| record.keys().map(str::to_owned).collect())
        .unwrap_or_default();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for record in records {
        builder.push_record(
            headers
                .iter()
                .map(|header| record.get(header).map(|v| v.to_string()).unwrap_or_default()),
        );
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
