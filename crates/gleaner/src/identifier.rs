//! DOI and volume/issue location.
//!
//! Both identifiers are printed on the first page of an article, the DOI as a resolver URL and
//! the volume/issue in the running citation line, e.g.
//!
//! ```text
//! Nucl. Fusion 60 (2020) 016001 (12pp)    https://doi.org/10.1088/1741-4326/ab4b1c
//! ```
//!
//! Neither value is validated beyond what its rule matches.

use crate::rules::{self, PatternRule};

use super::*;

/// Finds a DOI in `page_text` with the first matching rule.
///
/// Returns capture group 1 verbatim; with the default rule that is everything after
/// `https://doi.org/` up to the next whitespace.
pub fn extract_doi(page_text: &str, rules: &[PatternRule]) -> Option<String> {
  let (rule, captures) = rules::first_match(rules, page_text)?;
  let doi = captures.get(1)?.as_str().to_string();
  debug!("DOI rule \"{}\" found {doi}", rule.name);
  Some(doi)
}

/// Finds the volume and issue in `page_text` with the first matching rule.
///
/// Returns capture groups 1 and 2 joined by a single space, `"VOLUME ISSUE"`.
pub fn extract_volume_issue(page_text: &str, rules: &[PatternRule]) -> Option<String> {
  let (rule, captures) = rules::first_match(rules, page_text)?;
  let volume = captures.get(1)?.as_str();
  let issue = captures.get(2)?.as_str();
  debug!("Volume/issue rule \"{}\" found volume {volume}, issue {issue}", rule.name);
  Some(format!("{volume} {issue}"))
}
