//! Extract timestamps from raw log lines.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::error::EcaError;
use crate::types::Timestamp;

/// `2024-03-01T10:00:00.123Z`
static ZULU_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?P<year>\d\d\d\d)-(?P<month>\d\d)-(?P<day>\d\d)T(?P<hours>\d\d):(?P<minutes>\d\d):(?P<seconds>\d+)(?:\.)?(?P<fraction>\d+)?Z",
  )
  .unwrap()
});

/// `[2024-03-01 10:00:00,123]`, brackets and fraction optional.
static BRACKET_FULLTIME_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"\[?(?P<year>\d\d\d\d)-(?P<month>\d\d)-(?P<day>\d\d)[ T](?P<hours>\d\d):(?P<minutes>\d\d):(?P<seconds>\d+)(?:[,\.])?(?P<fraction>\d+)?\]?",
  )
  .unwrap()
});

/// Strategy for finding a timestamp in a line.
pub trait DateParser: std::fmt::Debug {
  /// Returns the timestamp and the line with the timestamp text removed, or
  /// `None` when the line carries no recognizable timestamp.
  fn process(&self, line: &str) -> Option<(Timestamp, String)>;
}

/// ISO-8601 timestamps with a trailing `Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZuluParser;

impl DateParser for ZuluParser {
  fn process(&self, line: &str) -> Option<(Timestamp, String)> {
    extract(&ZULU_RE, line)
  }
}

/// Date and time separated by space or `T`, optionally in square brackets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketFulltimeParser;

impl DateParser for BracketFulltimeParser {
  fn process(&self, line: &str) -> Option<(Timestamp, String)> {
    extract(&BRACKET_FULLTIME_RE, line)
  }
}

/// Tries each known format in turn; first match wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoParser;

impl DateParser for AutoParser {
  fn process(&self, line: &str) -> Option<(Timestamp, String)> {
    ZuluParser
      .process(line)
      .or_else(|| BracketFulltimeParser.process(line))
  }
}

/// Build the parser selected by a `date-format` config value.
pub fn create_parser(tag: &str) -> Result<Box<dyn DateParser>, EcaError> {
  match tag {
    "auto" => Ok(Box::new(AutoParser)),
    other => Err(EcaError::UnknownDateFormat(other.to_string())),
  }
}

fn extract(re: &Regex, line: &str) -> Option<(Timestamp, String)> {
  let caps = re.captures(line)?;
  let timestamp = timestamp_from(&caps)?;
  Some((timestamp, re.replace_all(line, "").into_owned()))
}

fn timestamp_from(caps: &Captures<'_>) -> Option<Timestamp> {
  let field = |name: &str| caps.name(name)?.as_str().parse::<u32>().ok();
  let year = caps.name("year")?.as_str().parse::<i32>().ok()?;
  let micros = caps.name("fraction").map_or(0, |m| fraction_micros(m.as_str()));

  NaiveDate::from_ymd_opt(year, field("month")?, field("day")?)?.and_hms_micro_opt(
    field("hours")?,
    field("minutes")?,
    field("seconds")?,
    micros,
  )
}

/// Decimal fraction digits truncated to microseconds ("5" -> 500000).
fn fraction_micros(digits: &str) -> u32 {
  digits
    .chars()
    .filter_map(|c| c.to_digit(10))
    .chain(std::iter::repeat(0))
    .take(6)
    .fold(0, |acc, d| acc * 10 + d)
}
