//! `docpress generate` — the full pipeline: load, render, convert.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use docpress_core::loader;
use docpress_pipeline::{
    viewer, BatchScope, Generator, InvoiceConfig, RenderMode, WkhtmltopdfConverter,
};
use docpress_render::Template;

use crate::RenderModeArg;

/// Arguments for `docpress generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Source data file (.csv or .json).
    pub data: PathBuf,

    /// HTML template file with `{{ placeholder }}` markers.
    pub template: PathBuf,

    /// Generate only the given record (1-based) instead of the whole batch.
    #[arg(long)]
    pub record: Option<usize>,

    /// Override the render mode inferred from the template name.
    #[arg(long)]
    pub mode: Option<RenderModeArg>,

    /// Directory artifacts are written to.
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Open the last produced document in the platform viewer.
    #[arg(long)]
    pub open: bool,

    /// Invoice id (invoice mode).
    #[arg(long, default_value = "INV-1001")]
    pub invoice_id: String,

    /// Customer name (invoice mode).
    #[arg(long, default_value = "Retail customer")]
    pub customer: String,

    /// Payment method (invoice mode).
    #[arg(long, default_value = "Bank transfer")]
    pub payment: String,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let records = loader::load_records(&self.data);
        if records.is_empty() {
            bail!(
                "no records loaded from {} — nothing to generate",
                self.data.display()
            );
        }
        println!("Loaded {} records.", records.len());

        let template = Template::from_file(&self.template)
            .with_context(|| format!("template {} rejected", self.template.display()))?;

        let placeholders: Vec<String> = template.placeholders().into_iter().collect();
        let listing = if placeholders.is_empty() {
            "none".to_owned()
        } else {
            placeholders.join(", ")
        };
        println!("{} {listing}", "placeholders:".blue());

        let mode = self
            .mode
            .map(RenderMode::from)
            .unwrap_or_else(|| RenderMode::infer(template.name()));

        let scope = match self.record {
            Some(0) => bail!("--record is 1-based; use --record 1 for the first record"),
            Some(n) => BatchScope::Single(n - 1),
            None => BatchScope::All,
        };

        let invoice = InvoiceConfig {
            invoice_id: self.invoice_id,
            customer_name: self.customer,
            payment_method: self.payment,
            ..InvoiceConfig::default()
        };

        let assets_dir = self
            .template
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        let converter = WkhtmltopdfConverter::default();
        let generator = Generator::new(&converter, &self.output_dir, &assets_dir);

        let outcome = generator.generate(&template, &records, mode, scope, &invoice)?;

        for artifact in &outcome.artifacts {
            println!("  {}  {}", "✎".green(), artifact.path.display());
        }
        for failure in &outcome.failures {
            println!(
                "  {}  record {} ({}): {}",
                "✗".red(),
                failure.index + 1,
                failure.record_id,
                failure.error
            );
        }
        println!(
            "{} {} produced, {} failed of {} attempted",
            if outcome.failures.is_empty() {
                "✓".green()
            } else {
                "!".yellow()
            },
            outcome.artifacts.len(),
            outcome.failures.len(),
            outcome.attempted()
        );

        if outcome.artifacts.is_empty() {
            bail!("no documents were produced");
        }

        if self.open {
            if let Some(last) = outcome.artifacts.last() {
                viewer::open_artifact(&last.path);
            }
        }
        Ok(())
    }
}
