//! Percentile / accuracy filtering of classified texts.
//!
//! A text qualifies when it shows up near enough incidents (`percentile`) and
//! when enough of its occurrences are near an incident (`accuracy`).

use tracing::{debug, info};

use crate::classify::Classification;
use crate::fingerprint;
use crate::types::{QualifyingText, Report, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdFilter {
  /// Minimum within-count as a percentage of the incident count (0..=100).
  pub percentile: u32,
  /// Minimum share of occurrences inside the window, in percent (0..=100).
  pub accuracy: u32,
}

impl ThresholdFilter {
  pub fn new(percentile: u32, accuracy: u32) -> Self {
    Self {
      percentile,
      accuracy,
    }
  }

  /// `floor(incidents * percentile / 100)`.
  pub fn min_count(&self, incidents: usize) -> u64 {
    incidents as u64 * u64::from(self.percentile) / 100
  }

  pub fn qualifies(&self, within: u64, outside: u64, min_count: u64) -> bool {
    let total = within + outside;
    if total == 0 {
      return false;
    }
    within >= min_count && within * 100 / total >= u64::from(self.accuracy)
  }

  /// Build the report: qualifying texts by within-count descending, ties in
  /// first-seen order.
  pub fn apply(&self, tables: &Classification, incidents: usize) -> Report {
    let min_count = self.min_count(incidents);
    info!(min_count, incidents, "applying thresholds");

    let mut qualifying: Vec<QualifyingText> = tables
      .within
      .iter()
      .filter_map(|(text, within)| {
        let outside = tables.outside.get(text);
        debug!(within, total = within + outside, "candidate {:?}", text);
        self.qualifies(within, outside, min_count).then(|| QualifyingText {
          fingerprint: fingerprint::compute(text),
          text: text.to_string(),
          within,
          outside,
        })
      })
      .collect();

    // Stable sort keeps first-seen order among equal counts.
    qualifying.sort_by(|a, b| b.within.cmp(&a.within));

    Report {
      summary: Summary {
        incidents,
        min_count,
        within: tables.within.len(),
        outside: tables.outside.len(),
        not_applicable: tables.not_applicable.len(),
      },
      qualifying,
    }
  }
}
