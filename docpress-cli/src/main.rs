//! docpress — record-driven PDF generation CLI.
//!
//! # Usage
//!
//! ```text
//! docpress generate <data> <template> [--record <n>] [--mode per-record|invoice]
//!                   [--output-dir <dir>] [--open] [--invoice-id <id>]
//! docpress inspect <data> [--limit <n>] [--json]
//! docpress check <template>
//! docpress init [<root>]
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, generate::GenerateArgs, init::InitArgs, inspect::InspectArgs};
use docpress_pipeline::RenderMode;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "docpress",
    version,
    about = "Generate PDF documents from CSV/JSON records and HTML templates",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render records through a template and convert them to PDF.
    Generate(GenerateArgs),

    /// Preview the records a source file would load.
    Inspect(InspectArgs),

    /// Validate a template and list its placeholders.
    Check(CheckArgs),

    /// Create the data/, templates/ and output/ directories.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Shared RenderMode argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `RenderMode` from CLI args.
#[derive(Debug, Clone, Copy)]
pub struct RenderModeArg(pub RenderMode);

impl FromStr for RenderModeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "per-record" | "batch" => Ok(Self(RenderMode::PerRecord)),
            "invoice" => Ok(Self(RenderMode::Invoice)),
            other => Err(format!(
                "unknown render mode '{other}'; expected: per-record, invoice"
            )),
        }
    }
}

impl fmt::Display for RenderModeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            RenderMode::PerRecord => write!(f, "per-record"),
            RenderMode::Invoice => write!(f, "invoice"),
        }
    }
}

impl From<RenderModeArg> for RenderMode {
    fn from(arg: RenderModeArg) -> Self {
        arg.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Inspect(args) => args.run(),
        Commands::Check(args) => args.run(),
        Commands::Init(args) => args.run(),
    }
}
