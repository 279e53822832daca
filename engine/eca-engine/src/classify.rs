//! Sort normalized lines into zones relative to the incident timestamps and
//! count how often each distinct text lands in each zone.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::EcaError;
use crate::source::EventSource;
use crate::timestamp::TimestampIndex;
use crate::types::{Timestamp, Zone};

/// Occurrence counts per normalized text, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
  counts: IndexMap<String, u64>,
}

impl FrequencyTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn increment(&mut self, text: String) {
    *self.counts.entry(text).or_insert(0) += 1;
  }

  /// Count for `text`, zero when never seen.
  pub fn get(&self, text: &str) -> u64 {
    self.counts.get(text).copied().unwrap_or(0)
  }

  /// Number of distinct texts.
  pub fn len(&self) -> usize {
    self.counts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.counts.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
    self.counts.iter().map(|(text, count)| (text.as_str(), *count))
  }
}

/// The three frequency tables produced by one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
  pub within: FrequencyTable,
  pub outside: FrequencyTable,
  pub not_applicable: FrequencyTable,
}

impl Classification {
  fn table_mut(&mut self, zone: Zone) -> &mut FrequencyTable {
    match zone {
      Zone::Within => &mut self.within,
      Zone::Outside => &mut self.outside,
      Zone::NotApplicable => &mut self.not_applicable,
    }
  }
}

pub struct LineClassifier<'a> {
  index: &'a mut TimestampIndex,
  tables: Classification,
}

impl<'a> LineClassifier<'a> {
  pub fn new(index: &'a mut TimestampIndex) -> Self {
    index.ensure_prepared();
    Self {
      index,
      tables: Classification::default(),
    }
  }

  /// Zone a line at `timestamp` falls into. Applicability is checked first.
  pub fn zone_of(&mut self, timestamp: Timestamp) -> Zone {
    if !self.index.is_applicable(timestamp) {
      Zone::NotApplicable
    } else if self.index.in_range(timestamp) {
      Zone::Within
    } else {
      Zone::Outside
    }
  }

  /// Count an already-normalized text.
  pub fn classify(&mut self, timestamp: Timestamp, text: String) -> Zone {
    let zone = self.zone_of(timestamp);
    match zone {
      Zone::Within => debug!("inside:  {} - {}", timestamp, preview(&text)),
      Zone::Outside => debug!("outside: {} - {}", timestamp, preview(&text)),
      Zone::NotApplicable => {}
    }
    self.tables.table_mut(zone).increment(text);
    zone
  }

  /// Scan `source`, normalize each line with its chain and count it.
  pub fn classify_source(&mut self, source: &EventSource) -> Result<(), EcaError> {
    for event in source.events()? {
      let event = event?;
      let text = source.normalize(&event.line);
      self.classify(event.timestamp, text);
    }
    Ok(())
  }

  pub fn finish(self) -> Classification {
    self.tables
  }
}

fn preview(text: &str) -> String {
  text.chars().take(80).collect()
}
