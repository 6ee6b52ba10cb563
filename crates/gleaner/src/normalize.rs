//! Text cleaning for institution strings.
//!
//! Raw affiliation text pulled out of a PDF carries marker digits, email addresses, broken line
//! wraps, and stray symbols. [`Normalizer::clean`] strips all of that and rejects whatever is too
//! short to be an institution name.
//!
//! The cleaning steps run in a fixed order, each assuming the previous ones ran:
//!
//! 1. Strip a leading run of digits and whitespace (a residual affiliation marker)
//! 2. Remove email-address-shaped substrings
//! 3. Collapse whitespace runs, including newlines, into single spaces and trim
//! 4. Drop characters outside the allow-list: word characters in any script, spaces, and `, . ( ) '
//!    " / -`
//! 5. Remove numeric tokens standing alone between spaces, keeping digits that belong to a larger
//!    token such as `230031,` or `D-85748`
//! 6. Trim again
//!
//! The steps are repeated until the text stops changing, so cleaning an already cleaned string is
//! a no-op.
//!
//! # Examples
//!
//! ```
//! use gleaner::normalize::Normalizer;
//!
//! let normalizer = Normalizer::default();
//! assert_eq!(
//!   normalizer.clean("1 Institute of Plasma Physics,\n  Hefei 230031, China (jdoe@ipp.ac.cn)"),
//!   "Institute of Plasma Physics, Hefei 230031, China"
//! );
//! assert_eq!(normalizer.clean("2 Dept."), "");
//! ```

use super::*;

/// Default minimum length, in characters, of an accepted institution string.
pub const DEFAULT_MIN_LENGTH: usize = 10;

lazy_static! {
  /// Marker digits (and the whitespace after them) at the very start of the text.
  static ref LEADING_MARKER: Regex = Regex::new(r"^\d+\s*").unwrap();
  /// Anything that looks like `local@domain`.
  static ref EMAIL: Regex = Regex::new(r"\S+@\S+").unwrap();
  /// Runs of whitespace of any kind.
  static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
  /// Characters outside the allow-list.
  static ref DISALLOWED: Regex = Regex::new(r#"[^\w ,.()'"/-]"#).unwrap();
  /// A digit run with a space on either side.
  static ref ISOLATED_NUMBER: Regex = Regex::new(r" \d+ ").unwrap();
}

/// Cleans raw institution text and filters out noise.
///
/// The only tunable is the minimum accepted length. Anything shorter after cleaning is treated as
/// "no institution" and comes back as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
  /// Minimum number of characters (Unicode scalar values) a cleaned string must have.
  min_length: usize,
}

impl Default for Normalizer {
  fn default() -> Self { Self { min_length: DEFAULT_MIN_LENGTH } }
}

impl Normalizer {
  /// Creates a normalizer that rejects cleaned strings shorter than `min_length` characters.
  pub fn new(min_length: usize) -> Self { Self { min_length } }

  /// The minimum accepted length of a cleaned string.
  pub fn min_length(&self) -> usize { self.min_length }

  /// Cleans `raw` into an institution string, or returns an empty string when nothing usable is
  /// left.
  pub fn clean(&self, raw: &str) -> String {
    let mut current = clean_pass(raw);
    loop {
      let next = clean_pass(&current);
      if next == current {
        break;
      }
      current = next;
    }

    if current.chars().count() < self.min_length {
      trace!("Discarding short institution candidate: {current:?}");
      return String::new();
    }
    current
  }
}

/// One pass of the cleaning steps, in order.
fn clean_pass(raw: &str) -> String {
  let text = LEADING_MARKER.replace(raw, "");
  let text = EMAIL.replace_all(&text, "");
  let text = WHITESPACE.replace_all(&text, " ");
  let text = DISALLOWED.replace_all(text.trim(), "");
  let text = ISOLATED_NUMBER.replace_all(&text, " ");
  text.trim().to_string()
}
