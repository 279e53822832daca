//! Analysis configuration: thresholds, window size and event sources, loaded
//! from YAML with sane defaults.

use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use serde::Deserialize;

use crate::dateparser;
use crate::error::EcaError;
use crate::normalize::Normalizer;
use crate::source::EventSource;
use crate::threshold::ThresholdFilter;

// ---------------------------------------------------------------------------
// YAML data model
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
  #[serde(default = "default_range")]
  range: String,
  #[serde(default = "default_threshold")]
  percentile: u32,
  #[serde(default = "default_threshold")]
  accuracy: u32,
  #[serde(default)]
  sources: Option<Vec<RawSource>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawSource {
  filename: PathBuf,
  #[serde(default)]
  master: bool,
  #[serde(default = "default_date_format")]
  date_format: String,
  #[serde(rename = "type", default = "default_source_type")]
  source_type: String,
  #[serde(default)]
  normalizers: Vec<String>,
}

fn default_range() -> String {
  "1s".to_string()
}

fn default_threshold() -> u32 {
  90
}

fn default_date_format() -> String {
  "auto".to_string()
}

fn default_source_type() -> String {
  "text-events".to_string()
}

// ---------------------------------------------------------------------------
// Validated configuration
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Config {
  /// Symmetric window around each incident.
  pub range: TimeDelta,
  /// Minimum within-count, as a percentage of the incident count.
  pub percentile: u32,
  /// Minimum share of a text's occurrences that must be within the window.
  pub accuracy: u32,
  pub sources: Vec<EventSource>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      range: TimeDelta::seconds(1),
      percentile: default_threshold(),
      accuracy: default_threshold(),
      sources: Vec::new(),
    }
  }
}

impl Config {
  /// Read and validate a YAML config file. Relative source filenames are
  /// resolved against the directory holding the config file.
  pub fn load(path: &Path) -> Result<Self, EcaError> {
    let text = std::fs::read_to_string(path).map_err(|e| EcaError::io(path, e))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Self::from_yaml(&text, base_dir)
  }

  pub fn from_yaml(text: &str, base_dir: &Path) -> Result<Self, EcaError> {
    let raw: RawConfig = serde_yaml::from_str(text)?;

    let range = parse_range(&raw.range)?;
    check_percentage("percentile", raw.percentile)?;
    check_percentage("accuracy", raw.accuracy)?;

    let raw_sources = raw
      .sources
      .ok_or_else(|| EcaError::config("sources", "missing list of event sources"))?;

    let sources = raw_sources
      .into_iter()
      .map(|s| build_source(s, base_dir))
      .collect::<Result<Vec<_>, EcaError>>()?;

    Ok(Self {
      range,
      percentile: raw.percentile,
      accuracy: raw.accuracy,
      sources,
    })
  }

  /// Sources providing incident timestamps.
  pub fn master_sources(&self) -> impl Iterator<Item = &EventSource> {
    self.sources.iter().filter(|s| s.is_master())
  }

  /// Sources whose lines get classified.
  pub fn candidate_sources(&self) -> impl Iterator<Item = &EventSource> {
    self.sources.iter().filter(|s| !s.is_master())
  }

  pub fn threshold_filter(&self) -> ThresholdFilter {
    ThresholdFilter::new(self.percentile, self.accuracy)
  }
}

fn build_source(raw: RawSource, base_dir: &Path) -> Result<EventSource, EcaError> {
  let path = base_dir.join(&raw.filename);
  let parser = dateparser::create_parser(&raw.date_format)?;

  let mut source = match raw.source_type.as_str() {
    "text-events" => EventSource::new(path, parser, raw.master),
    other => return Err(EcaError::UnknownSourceType(other.to_string())),
  };
  for tag in &raw.normalizers {
    source.add_normalizer(Normalizer::from_tag(tag)?);
  }
  Ok(source)
}

/// Parse a window size such as `2s` or `0.5s`.
pub fn parse_range(text: &str) -> Result<TimeDelta, EcaError> {
  let secs = text
    .trim()
    .strip_suffix('s')
    .and_then(|n| n.trim().parse::<f64>().ok())
    .ok_or_else(|| EcaError::config("range", &format!("unknown time format: {}", text)))?;
  if !secs.is_finite() || secs < 0.0 {
    return Err(EcaError::config(
      "range",
      &format!("must be a non-negative number of seconds: {}", text),
    ));
  }
  Ok(TimeDelta::microseconds((secs * 1_000_000.0).round() as i64))
}

fn check_percentage(field: &str, value: u32) -> Result<(), EcaError> {
  if value > 100 {
    return Err(EcaError::config(field, &format!("expected 0..=100, got {}", value)));
  }
  Ok(())
}
