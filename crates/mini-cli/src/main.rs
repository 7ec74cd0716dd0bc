//! `mini` CLI — check, format, query and export MINI configuration files.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a file (exit code 1 and the failing line on error)
//! mini check -i game.mini
//!
//! # Normalize formatting (stdin → stdout)
//! cat game.mini | mini fmt
//!
//! # Rewrite a file in place
//! mini fmt -i game.mini -o game.mini
//!
//! # Print a single value by dotted path
//! mini get game.window.dimensions -i game.mini
//!
//! # Export to pretty-printed JSON
//! mini json -i game.mini -o game.json
//! ```
//!
//! Diagnostics go to stderr and are filtered with `RUST_LOG`
//! (default `mini_core=warn`), e.g. `RUST_LOG=mini_core=debug mini check -i x.mini`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mini_core::{MiniFile, ParseMode};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mini", version, about = "MINI configuration file CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and report the first error, if any
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Parse and re-emit a file in normalized form
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the value at a dotted path, e.g. `game.window.width`
    Get {
        /// Dotted path of the value
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Export a file as pretty-printed JSON
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "mini_core=warn".into()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { input } => {
            let file = load(input.as_deref())?;
            let root = file.root();
            println!(
                "ok: {} top-level section(s), {} value(s)",
                root.section_count(),
                count_values(root)
            );
        }
        Commands::Fmt { input, output } => {
            let file = load(input.as_deref())?;
            let text = file.to_text().context("Failed to write MINI text")?;
            write_output(output.as_deref(), &text)?;
        }
        Commands::Get { path, input } => {
            let file = load(input.as_deref())?;
            let value = file
                .root()
                .value(&path)
                .with_context(|| format!("No value at '{}'", path))?;
            let text = value
                .to_text()
                .with_context(|| format!("Value at '{}' cannot be written", path))?;
            println!("{}", text);
        }
        Commands::Json { input, output } => {
            let file = load(input.as_deref())?;
            let json = mini_core::to_json(file.root());
            let pretty = serde_json::to_string_pretty(&json)?;
            write_output(output.as_deref(), &pretty)?;
        }
    }

    Ok(())
}

/// Parse the input file, or stdin when no path is given.
fn load(path: Option<&str>) -> Result<MiniFile> {
    let mut file = MiniFile::new();
    match path {
        Some(path) => {
            file.parse(path, ParseMode::Reset)
                .with_context(|| format!("Failed to parse MINI file: {}", path))?;
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            file.parse_str(&buf, ParseMode::Reset)
                .context("Failed to parse MINI from stdin")?;
        }
    }
    tracing::debug!(sections = file.root().section_count(), "input parsed");
    Ok(file)
}

/// Number of values in a section and all of its descendants.
fn count_values(section: &mini_core::Section) -> usize {
    section.value_count()
        + section
            .sections()
            .map(|(_, child)| count_values(child))
            .sum::<usize>()
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
