//! Institution recovery from the affiliation block of an article.
//!
//! Affiliations are found with two heuristics, tried in order.
//!
//! 1. **Numbered list.** Journals print affiliations as footnotes keyed by a small marker digit:
//!
//!    ```text
//!    1 Institute of Plasma Physics, Chinese Academy of Sciences,
//!      Hefei 230031, China
//!    2 University of Science and Technology of China, Hefei 230026, China
//!    ```
//!
//!    A line starting with a single digit `1`-`9` and whitespace opens a block. A following line
//!    continues the block only while it looks wrapped: the block so far ends in `,` or `-`, or
//!    the line is indented. Any other line closes it, as do blank lines and the next marker line.
//!    Blocks containing an institution keyword are cleaned and stored by marker (a later block
//!    with the same marker replaces an earlier one). The result is ordered by marker, which
//!    preserves author order.
//!
//! 2. **Keyword lines.** Only when the numbered list yields nothing, every line containing a
//!    keyword is cleaned and kept in order of appearance, skipping exact duplicates. Appearance
//!    order is not necessarily author order, and any line with a bare keyword qualifies, so a
//!    reference-list entry can be picked up as an institution. This is a known precision limit of
//!    the fallback.
//!
//! The parser does not know about pages; it reads whatever text it is handed.

use crate::normalize::Normalizer;

use super::*;

/// Number of institutions a [`MetadataRecord`](crate::extractor::MetadataRecord) reports.
pub const REPORTED_AFFILIATIONS: usize = 2;

lazy_static! {
  /// A line opening a numbered affiliation: marker digit, whitespace, then text.
  static ref MARKER_LINE: Regex = Regex::new(r"^[ \t]*([1-9])[ \t]+(\S.*)$").unwrap();
}

/// Which heuristic produced a list of affiliations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffiliationMethod {
  /// Marker-numbered affiliation list
  Numbered,
  /// Fallback scan for lines containing a keyword
  KeywordLines,
  /// Neither heuristic found anything
  #[default]
  NotFound,
}

/// Cleaned institutions in author order, along with the heuristic that found them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliations {
  /// Institution names, first author's first
  pub institutions: Vec<String>,
  /// Heuristic the names came from
  pub method:       AffiliationMethod,
}

impl Affiliations {
  /// The first institution, or `""`.
  pub fn first(&self) -> &str { self.institutions.first().map_or("", String::as_str) }

  /// The second institution, or `""`.
  pub fn second(&self) -> &str { self.institutions.get(1).map_or("", String::as_str) }

  /// Keeps at most `len` institutions.
  pub fn truncate(mut self, len: usize) -> Self {
    self.institutions.truncate(len);
    self
  }

  /// `(first, second)` as owned strings, empty where missing.
  pub fn into_pair(self) -> (String, String) {
    let mut institutions = self.institutions.into_iter();
    (institutions.next().unwrap_or_default(), institutions.next().unwrap_or_default())
  }
}

/// Two-phase affiliation heuristic over a keyword set.
#[derive(Debug, Clone)]
pub struct AffiliationParser {
  /// Alternation of the escaped keywords; `None` when no keywords are configured
  keywords:   Option<Regex>,
  /// Cleaner applied to every candidate
  normalizer: Normalizer,
}

impl AffiliationParser {
  /// Builds a parser recognizing institutions by any of `keywords`.
  ///
  /// Keywords are matched literally and case-sensitively; duplicates are ignored.
  pub fn new<S: AsRef<str>>(keywords: &[S], normalizer: Normalizer) -> Result<Self> {
    let mut unique: Vec<&str> = Vec::new();
    for keyword in keywords.iter().map(AsRef::as_ref) {
      if !keyword.is_empty() && !unique.contains(&keyword) {
        unique.push(keyword);
      }
    }

    let keywords = if unique.is_empty() {
      warn!("No institution keywords configured, affiliations will never be found");
      None
    } else {
      let alternation = unique.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
      Some(Regex::new(&alternation)?)
    };
    Ok(Self { keywords, normalizer })
  }

  /// Whether `text` contains at least one institution keyword.
  pub fn has_keyword(&self, text: &str) -> bool {
    self.keywords.as_ref().is_some_and(|keywords| keywords.is_match(text))
  }

  /// Recovers every institution found in `text`, numbered list first, keyword lines otherwise.
  pub fn parse(&self, text: &str) -> Affiliations {
    let numbered = self.numbered(text);
    if !numbered.is_empty() {
      debug!("Found {} numbered affiliation(s)", numbered.len());
      return Affiliations {
        institutions: numbered.into_values().collect(),
        method:       AffiliationMethod::Numbered,
      };
    }

    debug!("No numbered affiliations, falling back to keyword lines");
    let institutions = self.keyword_lines(text);
    let method = if institutions.is_empty() {
      AffiliationMethod::NotFound
    } else {
      AffiliationMethod::KeywordLines
    };
    debug!("Found {} affiliation(s) by keyword", institutions.len());
    Affiliations { institutions, method }
  }

  /// Phase 1: keyword-bearing numbered blocks, keyed by marker.
  pub fn numbered(&self, text: &str) -> BTreeMap<u8, String> {
    let mut affiliations = BTreeMap::new();
    for (marker, block) in numbered_blocks(text) {
      if !self.has_keyword(&block) {
        trace!("Skipping block {marker} without keyword: {block:?}");
        continue;
      }
      let institution = self.normalizer.clean(&block);
      if institution.is_empty() {
        continue;
      }
      if let Some(previous) = affiliations.insert(marker, institution) {
        trace!("Marker {marker} seen again, replacing {previous:?}");
      }
    }
    affiliations
  }

  /// Phase 2: cleaned keyword-bearing lines in order of appearance, without duplicates.
  pub fn keyword_lines(&self, text: &str) -> Vec<String> {
    let mut institutions: Vec<String> = Vec::new();
    for line in text.lines().filter(|line| self.has_keyword(line)) {
      let institution = self.normalizer.clean(line);
      if !institution.is_empty() && !institutions.contains(&institution) {
        institutions.push(institution);
      }
    }
    institutions
  }
}

/// Splits `text` into `(marker, block)` pairs.
///
/// A block starts at a marker line and takes in the wrapped lines that follow it (see
/// [`continues_block`]). Lines outside any block are ignored.
fn numbered_blocks(text: &str) -> Vec<(u8, String)> {
  let mut blocks = Vec::new();
  let mut current: Option<(u8, String)> = None;

  for line in text.lines() {
    if let Some(captures) = MARKER_LINE.captures(line) {
      blocks.extend(current.take());
      let Ok(marker) = captures[1].parse::<u8>() else { continue };
      current = Some((marker, captures[2].to_string()));
      continue;
    }
    match current.as_mut() {
      Some((_, block)) if continues_block(block, line) => {
        block.push('\n');
        block.push_str(line);
      },
      _ => blocks.extend(current.take()),
    }
  }
  blocks.extend(current);
  blocks
}

/// Whether `line` wraps the affiliation in `block` rather than starting new text.
fn continues_block(block: &str, line: &str) -> bool {
  if line.trim().is_empty() {
    return false;
  }
  block.trim_end().ends_with([',', '-']) || line.starts_with([' ', '\t'])
}
