//! Core engine: collects incidents, classifies candidate lines, applies thresholds.

use tracing::info;

use crate::classify::{Classification, LineClassifier};
use crate::config::Config;
use crate::error::EcaError;
use crate::timestamp::TimestampIndex;
use crate::types::Report;

/// One-shot analysis over the sources of a [`Config`].
pub struct Engine {
  config: Config,
}

impl Engine {
  pub fn new(config: Config) -> Self {
    Self { config }
  }

  /// Index every timestamp found in the master sources.
  pub fn collect_incidents(&self) -> Result<TimestampIndex, EcaError> {
    let mut index = TimestampIndex::new(self.config.range);
    for source in self.config.master_sources() {
      let before = index.len();
      for event in source.events()? {
        index.append(event?.timestamp);
      }
      info!(
        path = %source.path().display(),
        incidents = index.len() - before,
        "collected incidents"
      );
    }
    Ok(index)
  }

  /// Count the candidate sources' normalized lines per zone.
  pub fn classify(&self, index: &mut TimestampIndex) -> Result<Classification, EcaError> {
    let mut classifier = LineClassifier::new(index);
    for source in self.config.candidate_sources() {
      info!(path = %source.path().display(), "classifying");
      classifier.classify_source(source)?;
    }
    Ok(classifier.finish())
  }

  /// Run the whole pipeline.
  pub fn run(&self) -> Result<Report, EcaError> {
    let mut index = self.collect_incidents()?;
    let tables = self.classify(&mut index)?;
    Ok(self.config.threshold_filter().apply(&tables, index.len()))
  }
}
