//! In-memory index of incident timestamps with window-membership queries.
//!
//! Appends are cheap and mark the index stale; every query first calls
//! [`TimestampIndex::ensure_prepared`], which re-sorts and recomputes the
//! oldest/youngest bounds only when something was appended since the last query.

use chrono::TimeDelta;

use crate::types::Timestamp;

#[derive(Debug, Clone)]
pub struct TimestampIndex {
  range: TimeDelta,
  timestamps: Vec<Timestamp>,
  stale: bool,
  oldest: Option<Timestamp>,
  youngest: Option<Timestamp>,
}

impl TimestampIndex {
  /// Empty index using `range` as the symmetric window around every timestamp.
  pub fn new(range: TimeDelta) -> Self {
    Self {
      range,
      timestamps: Vec::new(),
      stale: false,
      oldest: None,
      youngest: None,
    }
  }

  pub fn append(&mut self, timestamp: Timestamp) {
    self.timestamps.push(timestamp);
    self.stale = true;
  }

  pub fn len(&self) -> usize {
    self.timestamps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.timestamps.is_empty()
  }

  /// Sort and recompute bounds if anything was appended since the last call.
  pub fn ensure_prepared(&mut self) {
    if !self.stale {
      return;
    }
    self.timestamps.sort_unstable();
    self.oldest = self.timestamps.first().copied();
    self.youngest = self.timestamps.last().copied();
    self.stale = false;
  }

  pub fn oldest(&mut self) -> Option<Timestamp> {
    self.ensure_prepared();
    self.oldest
  }

  pub fn youngest(&mut self) -> Option<Timestamp> {
    self.ensure_prepared();
    self.youngest
  }

  /// Timestamps in ascending order.
  pub fn iter(&mut self) -> impl Iterator<Item = &Timestamp> {
    self.ensure_prepared();
    self.timestamps.iter()
  }

  /// True iff `oldest - range < timestamp < youngest + range`.
  ///
  /// An empty index has no span, so nothing is applicable.
  pub fn is_applicable(&mut self, timestamp: Timestamp) -> bool {
    self.ensure_prepared();
    let (Some(oldest), Some(youngest)) = (self.oldest, self.youngest) else {
      return false;
    };
    let after_start = oldest
      .checked_sub_signed(self.range)
      .map_or(true, |lower| timestamp > lower);
    let before_end = youngest
      .checked_add_signed(self.range)
      .map_or(true, |upper| timestamp < upper);
    after_start && before_end
  }

  /// True iff some incident `t` satisfies `timestamp + range > t` and
  /// `timestamp < t + range`, i.e. the two windows overlap.
  ///
  /// Both bounds are strict: a line exactly `range` away from an incident is
  /// not in range.
  pub fn in_range(&mut self, timestamp: Timestamp) -> bool {
    self.ensure_prepared();
    let lower = timestamp.checked_sub_signed(self.range);
    let upper = timestamp.checked_add_signed(self.range);

    // First incident strictly after `timestamp - range`.
    let first = match lower {
      Some(lower) => self.timestamps.partition_point(|t| *t <= lower),
      None => 0,
    };
    match self.timestamps.get(first) {
      Some(t) => upper.map_or(true, |upper| *t < upper),
      None => false,
    }
  }
}

impl Extend<Timestamp> for TimestampIndex {
  fn extend<I: IntoIterator<Item = Timestamp>>(&mut self, iter: I) {
    for timestamp in iter {
      self.append(timestamp);
    }
  }
}
