// src/main.rs
//
// html2bb — convert rich-text editor HTML to BBCode
//
// - Reads HTML from INPUT ("-" or omitted: stdin) and writes BBCode to OUTPUT
//   (omitted: stdout).
// - Output contains only bracket tags, newlines and text.
// - Exit status is non-zero on I/O errors, non-UTF-8 input, or when a rewrite loop
//   hits --max-rounds.
//
// CLI flags:
//   --debug          : log pass/round details to stderr (RUST_LOG takes precedence)
//   --max-rounds N   : iteration ceiling for each fixed-point loop (N >= 1)

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use html2bb::{Converter, DEFAULT_MAX_ROUNDS};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Log conversion details to stderr
    #[arg(long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Iteration ceiling for each fixed-point loop (at least 1)
    #[arg(
        long = "max-rounds",
        default_value_t = DEFAULT_MAX_ROUNDS as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    max_rounds: u64,

    /// Input file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let src = read_input(cli.input.as_deref())?;
    let max_rounds = usize::try_from(cli.max_rounds).unwrap_or(usize::MAX);
    let converter = Converter::with_max_rounds(max_rounds);
    let out = converter
        .convert(&src)
        .context("failed to convert markup")?;
    info!(input = src.len(), output = out.len(), "converted");

    write_output(cli.output.as_deref(), &out)
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let bytes = match path {
        Some(p) if p != Path::new("-") => {
            fs::read(p).with_context(|| format!("failed to read {}", p.display()))?
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    String::from_utf8(bytes).context("input is not valid UTF-8")
}

fn write_output(path: Option<&Path>, out: &str) -> Result<()> {
    match path {
        Some(p) => fs::write(p, out).with_context(|| format!("failed to write {}", p.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(out.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write stdout")
        }
    }
}
