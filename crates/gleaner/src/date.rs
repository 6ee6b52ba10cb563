//! Publication date location and canonicalization.
//!
//! Dates are found with the configured date rules (by default the literal `Published` followed by
//! day, month name and year) and canonicalized into a [`CanonicalDate`] rendered as `YYYY/MM/DD`.
//!
//! PDF text extraction is careless with spaces: it inserts them inside words (`"Octo ber"`) and
//! drops them between words (`"3May2021"`). The captured text is therefore re-tokenized into
//! alternating digit and letter runs before it is split into day, month and year.
//!
//! Month names resolve through a fixed English table. An unknown name does not fail the parse:
//! it defaults to `"01"` and the date is marked [`DateConfidence::MonthDefaulted`] so callers can
//! tell a real January from a guess.
//!
//! # Examples
//!
//! ```
//! use gleaner::date::{CanonicalDate, DateConfidence};
//!
//! let date = CanonicalDate::from_raw("Published 3 Ma y2021").unwrap();
//! assert_eq!(date.to_string(), "2021/05/03");
//! assert_eq!(date.confidence, DateConfidence::Exact);
//!
//! let date = CanonicalDate::from_raw("30 Octorber 2019").unwrap();
//! assert_eq!(date.to_string(), "2019/01/30");
//! assert_eq!(date.confidence, DateConfidence::MonthDefaulted);
//! ```

use chrono::NaiveDate;

use crate::rules::{self, PatternRule};

use super::*;

/// English month names and their two-digit numbers.
const MONTHS: [(&str, &str); 12] = [
  ("January", "01"),
  ("February", "02"),
  ("March", "03"),
  ("April", "04"),
  ("May", "05"),
  ("June", "06"),
  ("July", "07"),
  ("August", "08"),
  ("September", "09"),
  ("October", "10"),
  ("November", "11"),
  ("December", "12"),
];

/// Month used when the month name is not in the table.
const FALLBACK_MONTH: &str = "01";

lazy_static! {
  /// A run of digits or a run of ASCII letters.
  static ref DATE_TOKEN: Regex = Regex::new(r"\d+|[A-Za-z]+").unwrap();
}

/// How much of a [`CanonicalDate`] was actually read from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateConfidence {
  /// Day, month and year were all recognized.
  #[default]
  Exact,
  /// The month name was not recognized and was replaced by `"01"`.
  MonthDefaulted,
}

/// A publication date as zero-padded strings, displayed as `YYYY/MM/DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalDate {
  /// Four-digit year
  pub year:       String,
  /// Two-digit month, `01` to `12`
  pub month:      String,
  /// Two-digit day
  pub day:        String,
  /// Whether the month was resolved or defaulted
  pub confidence: DateConfidence,
}

impl Display for CanonicalDate {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}/{}/{}", self.year, self.month, self.day)
  }
}

impl CanonicalDate {
  /// Canonicalizes a raw `<day> <month-name> <year>` string.
  ///
  /// A leading `Published` is ignored, as is any whitespace inside or between the tokens. Returns
  /// `None` unless the text splits into exactly a day of one or two digits, a month name, and a
  /// four-digit year.
  pub fn from_raw(raw: &str) -> Option<Self> {
    let raw = raw.trim();
    let raw = raw.strip_prefix("Published").unwrap_or(raw);

    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized =
      DATE_TOKEN.find_iter(&compact).map(|m| m.as_str()).collect::<Vec<_>>().join(" ");
    trace!("Normalized date {raw:?} into {normalized:?}");

    let tokens = normalized.split(' ').collect::<Vec<_>>();
    let (day, month, year) = match tokens.as_slice() {
      [day, month, year] => (*day, *month, *year),
      _ => {
        debug!("Date {normalized:?} does not have exactly three tokens");
        return None;
      },
    };

    let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !is_digits(day) || day.len() > 2 || !is_digits(year) || year.len() != 4 || is_digits(month)
    {
      debug!("Date {normalized:?} is not shaped like <day> <month> <year>");
      return None;
    }

    let (month, confidence) = match resolve_month(month) {
      Some(number) => (number, DateConfidence::Exact),
      None => {
        warn!("Unknown month name {month:?}, defaulting to {FALLBACK_MONTH}");
        (FALLBACK_MONTH, DateConfidence::MonthDefaulted)
      },
    };

    Some(Self {
      year: year.to_string(),
      month: month.to_string(),
      day: format!("{day:0>2}"),
      confidence,
    })
  }

  /// The date as a calendar date, if it is one (`2021/02/30` is not).
  pub fn to_naive_date(&self) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
      self.year.parse().ok()?,
      self.month.parse().ok()?,
      self.day.parse().ok()?,
    )
  }
}

/// Looks up the two-digit number of an English month name, ignoring case.
pub fn resolve_month(name: &str) -> Option<&'static str> {
  MONTHS.iter().find(|(month, _)| month.eq_ignore_ascii_case(name)).map(|(_, number)| *number)
}

/// Finds the publication date in `page_text` using the first matching rule.
///
/// Capture group 1 of the matching rule is canonicalized with [`CanonicalDate::from_raw`]. A
/// missing marker or an unparseable capture gives `None`.
pub fn extract_date(page_text: &str, rules: &[PatternRule]) -> Option<CanonicalDate> {
  let Some((rule, captures)) = rules::first_match(rules, page_text) else {
    debug!("No date rule matched");
    return None;
  };
  let raw = captures.get(1)?.as_str();
  let date = CanonicalDate::from_raw(raw);
  debug!("Date rule \"{}\" captured {raw:?}, parsed as {date:?}", rule.name);
  date
}
