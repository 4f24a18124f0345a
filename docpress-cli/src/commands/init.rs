//! `docpress init` — create the working directory layout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

/// Arguments for `docpress init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Root to create the layout under.
    #[arg(default_value = ".")]
    pub root: PathBuf,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        for name in ["data", "templates", "output"] {
            let dir = self.root.join(name);
            if dir.exists() {
                println!("  ·  {} (exists)", dir.display());
                continue;
            }
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("could not create {}", dir.display()))?;
            println!("  {}  {}", "✎".green(), dir.display());
        }
        println!(
            "{} put source files under data/ and templates under templates/",
            "✓".green()
        );
        Ok(())
    }
}
