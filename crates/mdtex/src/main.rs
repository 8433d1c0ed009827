//! mdtex CLI - Markdown to LaTeX converter.
//!
//! Converts a markdown file (or stdin) into a LaTeX fragment written to
//! stdout or to the configured output file.

mod convert;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use convert::ConvertArgs;
use output::Output;

/// mdtex - Markdown to LaTeX converter.
#[derive(Parser)]
#[command(name = "mdtex", version, about)]
struct Cli {
    #[command(flatten)]
    args: ConvertArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.args.execute() {
        output.failed(&err);
        std::process::exit(1);
    }
}
