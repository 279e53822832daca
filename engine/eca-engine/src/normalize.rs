//! Text normalizers: mask the volatile parts of a log line so that repeated
//! messages collapse onto one counting key.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::EcaError;

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static PUNCTUATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]+").unwrap());
static CHANGEID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\sI[0-9a-f]+\s").unwrap());
static JOLT_HASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[0-9a-f]+\]").unwrap());
static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalizer {
  /// Every digit run becomes `9`.
  NoDigits,
  /// Every run of punctuation becomes `_`.
  NoPunctuations,
  /// Gerrit change-ids (` I1f2e... `).
  NoChangeid,
  /// Bracketed hex hashes (`[3fa9c0]`).
  NoJoltHash,
  /// Lowercase hyphenated UUIDs.
  NoUuid,
}

/// Config tag -> normalizer.
const TAGS: &[(&str, Normalizer)] = &[
  ("no-digits", Normalizer::NoDigits),
  ("no-punctuations", Normalizer::NoPunctuations),
  ("no-changeid", Normalizer::NoChangeid),
  ("no-jolt-hash", Normalizer::NoJoltHash),
  ("no-uuid", Normalizer::NoUuid),
];

impl Normalizer {
  pub fn from_tag(tag: &str) -> Result<Self, EcaError> {
    TAGS
      .iter()
      .find(|(t, _)| *t == tag)
      .map(|(_, n)| *n)
      .ok_or_else(|| EcaError::UnknownNormalizer(tag.to_string()))
  }

  pub fn normalize(self, line: &str) -> String {
    let (re, replacement): (&Regex, &str) = match self {
      Self::NoDigits => (&*DIGITS_RE, "9"),
      Self::NoPunctuations => (&*PUNCTUATION_RE, "_"),
      Self::NoChangeid => (&*CHANGEID_RE, " change-id "),
      Self::NoJoltHash => (&*JOLT_HASH_RE, "[jolt-hash]"),
      Self::NoUuid => (&*UUID_RE, "UUID"),
    };
    re.replace_all(line, replacement).into_owned()
  }
}

/// Apply `chain` to `line` in order.
pub fn apply_chain(chain: &[Normalizer], line: &str) -> String {
  chain
    .iter()
    .fold(line.to_string(), |acc, n| n.normalize(&acc))
}
