//! Integration tests for the analysis engine: config file -> report.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use eca_engine::{report, Config, EcaError, Engine};
use tempfile::TempDir;

fn fmt(ts: NaiveDateTime) -> String {
  ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Incidents every 5th step (2s after) and every 7th step (2s before); the
/// error log has a background line each step plus a special line per incident.
fn write_generated_case(dir: &Path) {
  let mut ts = NaiveDate::from_ymd_opt(2024, 3, 1)
    .unwrap()
    .and_hms_opt(8, 0, 0)
    .unwrap();
  let mut events = String::new();
  let mut errors = String::new();

  for i in 0..100 {
    errors.push_str(&format!("{} - normal message\n", fmt(ts)));
    if i % 5 == 0 {
      events.push_str(&format!("{} - error event occured\n", fmt(ts + TimeDelta::seconds(2))));
      errors.push_str(&format!("{} - some special text every fifth\n", fmt(ts)));
    } else if i % 7 == 0 {
      events.push_str(&format!("{} - error event occured\n", fmt(ts - TimeDelta::seconds(2))));
      errors.push_str(&format!("{} - some special text every seventh\n", fmt(ts)));
    }
    ts += TimeDelta::seconds(4 * 60 + 13);
  }

  fs::write(dir.join("events.log"), events).unwrap();
  fs::write(dir.join("errors.log"), errors).unwrap();
}

fn write_config(dir: &Path, yaml: &str) -> std::path::PathBuf {
  let path = dir.join("eca.yaml");
  fs::write(&path, yaml).unwrap();
  path
}

const GENERATED_CONFIG: &str = r#"
range: 3s
percentile: 30
accuracy: 90
sources:
  - filename: events.log
    master: true
  - filename: errors.log
"#;

#[test]
fn generated_case_reports_periodic_texts() {
  let dir = TempDir::new().unwrap();
  write_generated_case(dir.path());
  let config = Config::load(&write_config(dir.path(), GENERATED_CONFIG)).unwrap();

  let report = Engine::new(config).run().unwrap();

  // 20 multiples of 5 plus 12 multiples of 7 that are not multiples of 5.
  assert_eq!(report.summary.incidents, 32);
  assert_eq!(report.summary.min_count, 9);

  let texts: Vec<(&str, u64, u64)> = report
    .qualifying
    .iter()
    .map(|q| (q.text.as_str(), q.within, q.outside))
    .collect();
  assert_eq!(
    texts,
    vec![
      (" - some special text every fifth", 20, 0),
      (" - some special text every seventh", 12, 0),
    ]
  );

  // Background line: 32 within, 67 outside, the last one past the final incident.
  assert_eq!(report.summary.within, 3);
  assert_eq!(report.summary.outside, 1);
  assert_eq!(report.summary.not_applicable, 1);
}

#[test]
fn strict_percentile_drops_the_rarer_text() {
  let dir = TempDir::new().unwrap();
  write_generated_case(dir.path());
  let yaml = GENERATED_CONFIG.replace("percentile: 30", "percentile: 50");
  let config = Config::load(&write_config(dir.path(), &yaml)).unwrap();

  let report = Engine::new(config).run().unwrap();
  assert_eq!(report.summary.min_count, 16);
  assert_eq!(report.qualifying.len(), 1);
  assert_eq!(report.qualifying[0].text, " - some special text every fifth");
}

#[test]
fn empty_master_source_means_nothing_applies() {
  let dir = TempDir::new().unwrap();
  fs::write(dir.path().join("incidents.log"), "").unwrap();
  fs::write(
    dir.path().join("app.log"),
    "2024-03-01T10:00:00Z started\n2024-03-01T10:00:05Z ready\n",
  )
  .unwrap();
  let config = Config::load(&write_config(
    dir.path(),
    "sources:\n  - filename: incidents.log\n    master: true\n  - filename: app.log\n",
  ))
  .unwrap();

  let report = Engine::new(config).run().unwrap();
  assert_eq!(report.summary.incidents, 0);
  assert_eq!(report.summary.within, 0);
  assert_eq!(report.summary.outside, 0);
  assert_eq!(report.summary.not_applicable, 2);
  assert!(report.qualifying.is_empty());

  let text = report::render(&report);
  assert!(text.contains("Total 0 incidents, 0 texts found within event range, 0 outside. 2 not applicable."));
}

#[test]
fn deterministic_output_across_runs() {
  let dir = TempDir::new().unwrap();
  write_generated_case(dir.path());
  let path = write_config(dir.path(), GENERATED_CONFIG);

  let first = Engine::new(Config::load(&path).unwrap()).run().unwrap();
  let second = Engine::new(Config::load(&path).unwrap()).run().unwrap();
  assert_eq!(
    serde_json::to_string(&first).unwrap(),
    serde_json::to_string(&second).unwrap()
  );
}

#[test]
fn json_report_shape() {
  let dir = TempDir::new().unwrap();
  write_generated_case(dir.path());
  let config = Config::load(&write_config(dir.path(), GENERATED_CONFIG)).unwrap();
  let report = Engine::new(config).run().unwrap();

  let value = serde_json::to_value(&report).unwrap();
  assert_eq!(value["summary"]["incidents"], 32);
  assert_eq!(value["qualifying"][0]["within"], 20);
  assert_eq!(value["qualifying"][0]["fingerprint"].as_str().unwrap().len(), 16);
}

#[test]
fn unreadable_candidate_file_is_fatal() {
  let dir = TempDir::new().unwrap();
  fs::write(dir.path().join("incidents.log"), "2024-03-01T10:00:00Z down\n").unwrap();
  let config = Config::load(&write_config(
    dir.path(),
    "sources:\n  - filename: incidents.log\n    master: true\n  - filename: missing.log\n",
  ))
  .unwrap();

  let err = Engine::new(config).run().unwrap_err();
  assert!(matches!(err, EcaError::Io { .. }));
  assert!(err.to_string().contains("missing.log"));
}

#[test]
fn unknown_normalizer_fails_before_analysis() {
  let dir = TempDir::new().unwrap();
  let err = Config::load(&write_config(
    dir.path(),
    "sources:\n  - filename: app.log\n    normalizers: [no-digits, no-vowels]\n",
  ))
  .unwrap_err();
  assert!(err.to_string().contains("no-vowels"));
}
