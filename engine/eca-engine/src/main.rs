//! Binary entrypoint: run the analysis described by a YAML config file and
//! print the report to stdout (text by default, one JSON object with `--json`).

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eca_engine::{report, Config, Engine};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "eca", about = "Find log texts that recur around incident timestamps")]
struct Cli {
  /// YAML analysis configuration.
  config: PathBuf,

  /// Emit the report as JSON.
  #[arg(long)]
  json: bool,

  /// Log classification details to stderr.
  #[arg(short, long)]
  verbose: bool,
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .try_init();

  if let Err(e) = run_binary(&cli) {
    let _ = writeln!(io::stderr(), "eca: {:#}", e);
    std::process::exit(1);
  }
}

fn run_binary(cli: &Cli) -> Result<()> {
  let config = Config::load(&cli.config)
    .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
  tracing::debug!(?config, "loaded configuration");

  let report = Engine::new(config).run().context("analysis failed")?;

  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  if cli.json {
    serde_json::to_writer(&mut out, &report)?;
    writeln!(out)?;
  } else {
    out.write_all(report::render(&report).as_bytes())?;
  }
  out.flush()?;
  Ok(())
}
