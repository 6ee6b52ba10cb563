//! Console output shared by the commands.

use gleaner::date::DateConfidence;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warning messages
pub static WARNING_PREFIX: &str = "! ";
/// Continuation line for tree structure
pub static ITEM_PREFIX: &str = "├─";
/// Last item in a tree structure
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Shown for a field that was not found
pub static MISSING: &str = "-";

/// Prints an informational line to stderr.
pub fn info(message: &str) { eprintln!("{} {message}", style(INFO_PREFIX).cyan()); }

/// Prints a success line to stdout.
pub fn success(message: &str) { println!("{} {message}", style(SUCCESS_PREFIX).green()); }

/// Prints a warning line to stderr and logs it.
pub fn warning(message: &str) {
  warn!("{message}");
  eprintln!("{} {message}", style(WARNING_PREFIX).yellow());
}

/// Renders one document's record as an indented tree.
pub fn render_record(path: &Path, record: &MetadataRecord) -> String {
  let date = match &record.pub_date {
    Some(date) if date.confidence == DateConfidence::MonthDefaulted =>
      format!("{date} (month not recognized)"),
    Some(date) => date.to_string(),
    None => MISSING.to_string(),
  };
  let or_missing = |value: Option<&str>| match value {
    Some(value) if !value.is_empty() => value.to_string(),
    _ => MISSING.to_string(),
  };

  let fields = [
    ("Date", date),
    ("DOI", or_missing(record.doi.as_deref())),
    ("Volume/issue", or_missing(record.volume_issue.as_deref())),
    ("First institution", or_missing(Some(record.first_institution.as_str()))),
    ("Second institution", or_missing(Some(record.second_institution.as_str()))),
  ];

  let mut out = format!("{}\n", style(path.display()).bold());
  for (i, (label, value)) in fields.iter().enumerate() {
    let branch = if i + 1 == fields.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
    let label = format!("{:<20}", format!("{label}:"));
    out.push_str(&format!("{branch} {}{value}\n", style(label).green()));
  }
  out
}
