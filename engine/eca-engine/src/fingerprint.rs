//! Stable fingerprints for normalized texts, so a reported text can be
//! tracked across runs without comparing the full string.

use crate::types::Fingerprint;

/// blake3 digest of the normalized text, truncated to 16 hex chars.
pub fn compute(text: &str) -> Fingerprint {
  let hex = blake3::hash(text.as_bytes()).to_hex();
  Fingerprint(hex[..16].to_string())
}
