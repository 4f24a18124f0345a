//! `docpress check` — validate a template and list its placeholders.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use docpress_pipeline::RenderMode;
use docpress_render::Template;

/// Arguments for `docpress check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// HTML template file.
    pub template: PathBuf,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let template = Template::from_file(&self.template)
            .with_context(|| format!("template {} rejected", self.template.display()))?;

        println!("{} '{}' is well-formed", "✓".green(), template.name());

        let placeholders: Vec<String> = template.placeholders().into_iter().collect();
        if placeholders.is_empty() {
            println!("{} none", "placeholders:".blue());
        } else {
            println!("{} {}", "placeholders:".blue(), placeholders.join(", "));
        }

        if RenderMode::infer(template.name()) == RenderMode::Invoice {
            println!("render mode: invoice (aggregate)");
        } else {
            println!("render mode: per-record");
        }
        Ok(())
    }
}
