//! Human-readable rendering of a [`Report`].

use std::fmt::Write;

use crate::types::Report;

const RULE: &str =
  "---------------------------------------------------------------------------------------------------";

/// Render the text report printed by the `eca` binary.
pub fn render(report: &Report) -> String {
  let mut out = String::new();
  out.push_str(
    "Normalized texts occurring during incident event zone that matches accuracy and percentile settings:\n",
  );
  out.push_str(RULE);
  out.push('\n');
  for q in &report.qualifying {
    let _ = writeln!(
      out,
      "within zone:{} occurrences, out of zone: {}:\n{}\n",
      q.within,
      q.outside,
      escape(&q.text)
    );
  }
  out.push_str(RULE);
  out.push('\n');

  let s = &report.summary;
  let _ = writeln!(
    out,
    "Total {} incidents, {} texts found within event range, {} outside. {} not applicable.",
    s.incidents, s.within, s.outside, s.not_applicable
  );
  out
}

/// Make a text safe to print: non-printable characters become `\xNN`,
/// `\uNNNN` or `\UNNNNNNNN` escapes.
pub fn escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    let code = u32::from(c);
    if is_printable(c) {
      out.push(c);
    } else if code <= 0xff {
      let _ = write!(out, "\\x{:02x}", code);
    } else if code <= 0xffff {
      let _ = write!(out, "\\u{:04x}", code);
    } else {
      let _ = write!(out, "\\U{:08x}", code);
    }
  }
  out
}

fn is_printable(c: char) -> bool {
  c == ' ' || !(c.is_control() || c.is_whitespace() || is_format(c))
}

/// Invisible formatting characters (zero-width joiners, direction marks, BOM).
///
/// A short list of the common ones, not the full Unicode `Cf` category.
/// Private-use and unassigned code points, Arabic number signs, interlinear
/// annotation marks and tag characters are printed as-is.
fn is_format(c: char) -> bool {
  matches!(
    c,
    '\u{ad}' | '\u{200b}'..='\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2060}'..='\u{2064}' | '\u{feff}'
  )
}
