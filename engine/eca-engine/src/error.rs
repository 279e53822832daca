//! Structured error types for the analysis engine.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcaError {
  #[error("configuration: {field}: {reason}")]
  Config { field: String, reason: String },

  #[error("unknown event type: {0}")]
  UnknownSourceType(String),

  #[error("unknown date-parser: {0}")]
  UnknownDateFormat(String),

  #[error("unknown normalizer: {0}")]
  UnknownNormalizer(String),

  #[error("cannot read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("yaml: {0}")]
  Yaml(#[from] serde_yaml::Error),
}

impl EcaError {
  pub fn config(field: &str, reason: &str) -> Self {
    Self::Config {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}
