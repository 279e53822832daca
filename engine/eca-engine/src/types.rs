//! Core types for the analysis engine (internal models + report contract).

use chrono::NaiveDateTime;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Point in time extracted from a log line (microsecond resolution, no zone).
pub type Timestamp = NaiveDateTime;

/// One dated line from an event source. `line` has the timestamp text removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
  pub timestamp: Timestamp,
  pub line: String,
}

// ---------------------------------------------------------------------------
// Classification zones
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
  /// Close to at least one incident.
  Within,
  /// Inside the incident span but not close to any incident.
  Outside,
  /// Before the first or after the last incident (plus range).
  NotApplicable,
}

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// Stable hex digest of a normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(pub String);

// ---------------------------------------------------------------------------
// Output types (report contract)
// ---------------------------------------------------------------------------

/// A normalized text that passed the percentile and accuracy thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualifyingText {
  pub fingerprint: Fingerprint,
  pub text: String,
  pub within: u64,
  pub outside: u64,
}

/// Aggregate counts over one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
  /// Number of incident timestamps.
  pub incidents: usize,
  /// Minimum within-count a text needs (derived from percentile).
  pub min_count: u64,
  /// Distinct texts seen within the incident window.
  pub within: usize,
  /// Distinct texts seen outside the incident window.
  pub outside: usize,
  /// Distinct texts outside the incident span.
  pub not_applicable: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
  pub summary: Summary,
  pub qualifying: Vec<QualifyingText>,
}
