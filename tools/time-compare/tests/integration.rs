//! End-to-end checks for the time-compare binary.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn write_pair(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
  let incidents = dir.path().join("incidents.log");
  let suspects = dir.path().join("suspects.log");
  fs::write(
    &incidents,
    "2024-03-01T10:00:00Z outage\n\
     2024-03-01T11:00:00Z outage\n\
     2024-03-01T12:00:00Z outage\n",
  )
  .unwrap();
  fs::write(
    &suspects,
    "2024-03-01T10:00:00.4Z gc pause\n\
     2024-03-01T11:00:00.2Z gc pause\n\
     2024-03-01T11:30:00Z gc pause\n",
  )
  .unwrap();
  (incidents, suspects)
}

#[test]
fn prints_coincidents_and_misses() {
  let dir = TempDir::new().unwrap();
  let (incidents, suspects) = write_pair(&dir);

  let output = Command::new(env!("CARGO_BIN_EXE_time-compare"))
    .arg(&incidents)
    .arg(&suspects)
    .output()
    .expect("failed to run time-compare");

  assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
  assert_eq!(
    String::from_utf8_lossy(&output.stdout).trim(),
    "2 coincidents and 1 misses"
  );
}

#[test]
fn unknown_time_format_fails() {
  let dir = TempDir::new().unwrap();
  let (incidents, suspects) = write_pair(&dir);

  let output = Command::new(env!("CARGO_BIN_EXE_time-compare"))
    .args(["--time-format1", "epoch"])
    .arg(&incidents)
    .arg(&suspects)
    .output()
    .expect("failed to run time-compare");

  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("epoch"));
}

#[test]
fn missing_file_fails() {
  let dir = TempDir::new().unwrap();
  let (incidents, _) = write_pair(&dir);

  let output = Command::new(env!("CARGO_BIN_EXE_time-compare"))
    .arg(&incidents)
    .arg(dir.path().join("nope.log"))
    .output()
    .expect("failed to run time-compare");

  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("nope.log"));
}

#[test]
fn huge_overlap_makes_every_pair_coincide() {
  let dir = TempDir::new().unwrap();
  let (incidents, suspects) = write_pair(&dir);

  let output = Command::new(env!("CARGO_BIN_EXE_time-compare"))
    .args(["-o", "1e13"])
    .arg(&incidents)
    .arg(&suspects)
    .output()
    .expect("failed to run time-compare");

  assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
  assert_eq!(
    String::from_utf8_lossy(&output.stdout).trim(),
    "3 coincidents and 0 misses"
  );
}
