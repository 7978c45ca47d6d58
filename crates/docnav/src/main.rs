//! docnav CLI - Documentation navigation outline generator.
//!
//! Scans a directory of Markdown files, reads `title`, `linkTitle` and
//! `weight` from their front matter, and prints an indented outline suitable
//! for a static site's navigation configuration.

mod error;
mod outline;
mod output;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use outline::OutlineArgs;
use output::Output;

/// docnav - Documentation navigation outline generator.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    #[command(flatten)]
    outline: OutlineArgs,

    /// Increase log verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // -v/-vv select a level, otherwise use RUST_LOG or default to WARN
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.outline.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
