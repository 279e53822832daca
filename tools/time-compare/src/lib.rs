//! Merge-style scan of two time-ordered log files, counting lines whose time
//! spans coincide.
//!
//! Each dated line becomes a span `[t, t + overlap]`. The scan always advances
//! the file whose current span starts earlier, so both files must already be
//! sorted by time.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use chrono::TimeDelta;
use eca_engine::dateparser::{DateParser, ZuluParser};
use eca_engine::{EcaError, Timestamp};
use tracing::info;

/// Supported time formats for `--time-formatN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
  /// ISO-8601 with trailing `Z`.
  Iso,
}

impl TimeFormat {
  pub fn from_tag(tag: &str) -> Result<Self, EcaError> {
    match tag {
      "iso" => Ok(Self::Iso),
      other => Err(EcaError::UnknownDateFormat(other.to_string())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
  pub time: Timestamp,
  pub duration: TimeDelta,
}

impl TimeSpan {
  /// End of the span; `None` when it lies past the representable range.
  pub fn end(&self) -> Option<Timestamp> {
    self.time.checked_add_signed(self.duration)
  }

  /// Spans coincide unless one lies entirely before or entirely after the other.
  /// An unrepresentable end is treated as unbounded.
  pub fn is_coincident(&self, other: &TimeSpan) -> bool {
    let (s1, s2) = (self.time, self.end());
    let (o1, o2) = (other.time, other.end());
    let before = o1 < s1 && o2.is_some_and(|o2| o2 < s1);
    let after = s2.is_some_and(|s2| o1 > s2 && o2.map_or(true, |o2| o2 > s2));
    !(before || after)
  }
}

/// Turns lines into spans of a fixed length.
#[derive(Debug, Clone, Copy)]
pub struct SpanParser {
  format: TimeFormat,
  overlap: TimeDelta,
}

impl SpanParser {
  pub fn new(format: TimeFormat, overlap: TimeDelta) -> Self {
    Self { format, overlap }
  }

  pub fn parse(&self, line: &str) -> Option<TimeSpan> {
    let time = match self.format {
      TimeFormat::Iso => ZuluParser.process(line)?.0,
    };
    Some(TimeSpan {
      time,
      duration: self.overlap,
    })
  }
}

/// Convert `--overlap` seconds to a duration; `None` for negative or non-finite input.
pub fn overlap_from_secs(secs: f64) -> Option<TimeDelta> {
  if !secs.is_finite() || secs < 0.0 {
    return None;
  }
  Some(TimeDelta::microseconds((secs * 1_000_000.0).round() as i64))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
  pub coincidents: u64,
  pub misses: u64,
}

/// Scan two named readers. Stops as soon as either one is exhausted.
pub fn compare(
  mut inputs: [(&Path, &mut dyn BufRead); 2],
  parsers: [&SpanParser; 2],
) -> Result<Tally, EcaError> {
  let mut tally = Tally::default();
  let mut lines: [Option<String>; 2] = [None, None];

  loop {
    let spans = [0usize, 1].map(|i| lines[i].as_deref().and_then(|l| parsers[i].parse(l)));
    let mut advance = spans.map(|s| s.is_none());

    if let [Some(a), Some(b)] = spans {
      if a.is_coincident(&b) {
        info!("coincidence at {} <> {}", a.time, b.time);
        tally.coincidents += 1;
        advance = [true, true];
      } else {
        tally.misses += 1;
      }
      if a.time < b.time {
        advance[0] = true;
      } else {
        advance[1] = true;
      }
    }

    for i in 0..2 {
      if advance[i] {
        let (path, reader) = &mut inputs[i];
        match read_trimmed(&mut **reader).map_err(|e| EcaError::io(*path, e))? {
          Some(line) => lines[i] = Some(line),
          None => return Ok(tally),
        }
      }
    }
  }
}

/// Open both files and scan them.
pub fn compare_files(paths: [&Path; 2], parsers: [&SpanParser; 2]) -> Result<Tally, EcaError> {
  let open = |path: &Path| {
    File::open(path)
      .map(BufReader::new)
      .map_err(|e| EcaError::io(path, e))
  };
  let mut first = open(paths[0])?;
  let mut second = open(paths[1])?;
  compare([(paths[0], &mut first), (paths[1], &mut second)], parsers)
}

fn read_trimmed(reader: &mut dyn BufRead) -> io::Result<Option<String>> {
  let mut buf = String::new();
  if reader.read_line(&mut buf)? == 0 {
    return Ok(None);
  }
  Ok(Some(buf.trim().to_string()))
}
