//! Text-file event sources.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::dateparser::DateParser;
use crate::error::EcaError;
use crate::normalize::{self, Normalizer};
use crate::types::Event;

/// A log file read as a stream of dated events.
///
/// Master sources provide incident timestamps; the others provide the lines
/// that get classified against them.
#[derive(Debug)]
pub struct EventSource {
  path: PathBuf,
  parser: Box<dyn DateParser>,
  normalizers: Vec<Normalizer>,
  master: bool,
}

impl EventSource {
  pub fn new(path: impl Into<PathBuf>, parser: Box<dyn DateParser>, master: bool) -> Self {
    Self {
      path: path.into(),
      parser,
      normalizers: Vec::new(),
      master,
    }
  }

  pub fn add_normalizer(&mut self, normalizer: Normalizer) {
    self.normalizers.push(normalizer);
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn is_master(&self) -> bool {
    self.master
  }

  pub fn normalizers(&self) -> &[Normalizer] {
    &self.normalizers
  }

  /// Run `line` through this source's normalizer chain.
  pub fn normalize(&self, line: &str) -> String {
    normalize::apply_chain(&self.normalizers, line)
  }

  /// Open the file and iterate over its dated lines.
  ///
  /// Every call reopens the file; nothing is cached between scans. Lines
  /// without a recognizable timestamp are skipped.
  pub fn events(&self) -> Result<Events<'_>, EcaError> {
    let file = File::open(&self.path).map_err(|e| EcaError::io(&self.path, e))?;
    Ok(Events {
      source: self,
      reader: BufReader::new(file),
      buf: Vec::new(),
      failed: false,
    })
  }
}

/// Iterator returned by [`EventSource::events`].
pub struct Events<'a> {
  source: &'a EventSource,
  reader: BufReader<File>,
  buf: Vec<u8>,
  failed: bool,
}

impl Iterator for Events<'_> {
  type Item = Result<Event, EcaError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed {
      return None;
    }
    loop {
      self.buf.clear();
      match self.reader.read_until(b'\n', &mut self.buf) {
        Ok(0) => return None,
        Ok(_) => {
          let text = String::from_utf8_lossy(&self.buf);
          if let Some((timestamp, line)) = self.source.parser.process(text.trim()) {
            return Some(Ok(Event { timestamp, line }));
          }
        }
        Err(e) => {
          self.failed = true;
          return Some(Err(EcaError::io(&self.source.path, e)));
        }
      }
    }
  }
}
