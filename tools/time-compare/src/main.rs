//! time-compare: count time-coincident lines between two log files
//!
//! Usage:
//!   time-compare <file1> <file2>              # ISO/Zulu timestamps, 1s spans
//!   time-compare -o 5 -v <file1> <file2>      # 5s spans, log every coincidence
//!
//! Grep the incident lines out of one log and the suspicious lines out of
//! another, then check how many of them line up in time.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use time_compare::{compare_files, overlap_from_secs, SpanParser, TimeFormat};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "time-compare", about = "Count time-coincident lines between two log files")]
struct Cli {
  /// Time format of the first file.
  #[arg(long = "time-format1", default_value = "iso")]
  time_format1: String,

  /// Time format of the second file.
  #[arg(long = "time-format2", default_value = "iso")]
  time_format2: String,

  /// Span length in seconds given to every timestamp.
  #[arg(short, long, default_value_t = 1.0)]
  overlap: f64,

  /// Log every coincidence.
  #[arg(short, long)]
  verbose: bool,

  #[arg(num_args = 2, required = true)]
  files: Vec<PathBuf>,
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("info")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .try_init();

  if let Err(e) = run_binary(&cli) {
    let _ = writeln!(io::stderr(), "time-compare: {:#}", e);
    std::process::exit(2);
  }
}

fn run_binary(cli: &Cli) -> Result<()> {
  let overlap = overlap_from_secs(cli.overlap)
    .ok_or_else(|| anyhow!("invalid overlap: {}", cli.overlap))?;
  let first = SpanParser::new(TimeFormat::from_tag(&cli.time_format1)?, overlap);
  let second = SpanParser::new(TimeFormat::from_tag(&cli.time_format2)?, overlap);

  let tally = compare_files([&cli.files[0], &cli.files[1]], [&first, &second])?;
  println!("{} coincidents and {} misses", tally.coincidents, tally.misses);
  Ok(())
}
