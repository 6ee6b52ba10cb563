//! Configuration of the extraction heuristics.
//!
//! None of the journal-specific knowledge is baked into the parsers. The journal name used by the
//! volume/issue pattern, the institution keywords, the affiliation length threshold, the page
//! indices to read, and every pattern rule come from a [`Config`], usually loaded from TOML:
//!
//! ```toml
//! journal = "Nucl. Fusion"
//! min_affiliation_length = 10
//! identifier_page = 0
//! affiliation_pages = [0, 1]
//! date_page = 1
//! keywords = ["University", "Institute", "Laboratory"]
//!
//! [[date_rules]]
//! name = "published"
//! pattern = 'Published\s+(\d{1,2}\s*[A-Za-z]+\s*\d{4})'
//! ```
//!
//! Every field has a default, so a file only needs to name what it changes.
//!
//! # Examples
//!
//! ```
//! use gleaner::configuration::Config;
//!
//! let config = Config::from_toml_str("journal = \"Plasma Phys. Control. Fusion\"").unwrap();
//! assert_eq!(config.journal, "Plasma Phys. Control. Fusion");
//! assert_eq!(config.min_affiliation_length, 10);
//! ```

use crate::rules::PatternRule;

use super::*;

/// Journal whose volume/issue line is recognized by default.
pub const DEFAULT_JOURNAL: &str = "Nucl. Fusion";

/// Institution keywords recognized by default, grouped by language.
pub const DEFAULT_KEYWORDS: &[&str] = &[
  // English
  "University",
  "Institute",
  "Laboratory",
  "Laboratories",
  "Center",
  "Centre",
  "Department",
  "School",
  "College",
  "Academy",
  // German
  "Universität",
  "Institut",
  "Zentrum",
  "zentrum",
  "Abteilung",
  "Schule",
  "schule",
  // French
  "Université",
  "Laboratoire",
  "École",
  "Département",
  // Chinese
  "大学",
  "研究所",
  "实验室",
  "中心",
  "学院",
  "研究院",
  // Japanese
  "実験室",
  "センター",
  // Russian
  "Университет",
  "Институт",
  "Лаборатория",
  "Центр",
  // Spanish
  "Universidad",
  "Instituto",
  "Laboratorio",
  "Centro",
  "Departamento",
  "Escuela",
  // Portuguese
  "Universidade",
  "Laboratório",
  "Escola",
  // Italian
  "Università",
  "Istituto",
  "Dipartimento",
  "Scuola",
];

/// Pattern of the default date rule: `Published` then day, month name and year, tolerating
/// stray or missing whitespace inside the date.
pub const PUBLISHED_PATTERN: &str =
  r"Published\s+(\d(?:\s*\d)?\s*[A-Za-z](?:\s*[A-Za-z])*\s*\d(?:\s*\d){3})";

/// Pattern of the default DOI rule.
pub const DOI_URL_PATTERN: &str = r"https://doi\.org/(\S+)";

lazy_static! {
  /// Compiled [`PUBLISHED_PATTERN`].
  static ref PUBLISHED: Regex = Regex::new(PUBLISHED_PATTERN).unwrap();
  /// Compiled [`DOI_URL_PATTERN`].
  static ref DOI_URL: Regex = Regex::new(DOI_URL_PATTERN).unwrap();
}

/// Settings for every parser and for the page layout of the documents being read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Journal name token preceding `VOLUME (ISSUE)`, e.g. `"Nucl. Fusion"`. Empty disables the
  /// journal rule.
  pub journal:                String,
  /// Minimum length, in characters, of an accepted institution string.
  pub min_affiliation_length: usize,
  /// Page holding the DOI and volume/issue line.
  pub identifier_page:        usize,
  /// Pages scanned together for affiliations.
  pub affiliation_pages:      Vec<usize>,
  /// Page holding the publication date.
  pub date_page:              usize,
  /// Institution keywords. An affiliation candidate must contain at least one of them.
  pub keywords:               Vec<String>,
  /// Date rules, tried in order. Capture group 1 holds the raw date.
  pub date_rules:             Vec<PatternRule>,
  /// DOI rules, tried in order. Capture group 1 holds the DOI.
  pub doi_rules:              Vec<PatternRule>,
  /// Volume/issue rules tried after the journal rule. Capture groups 1 and 2 hold volume and
  /// issue.
  pub volume_issue_rules:     Vec<PatternRule>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      journal:                DEFAULT_JOURNAL.to_string(),
      min_affiliation_length: normalize::DEFAULT_MIN_LENGTH,
      identifier_page:        0,
      affiliation_pages:      vec![0, 1],
      date_page:              1,
      keywords:               DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
      date_rules:             vec![PatternRule {
        name:    "published".to_string(),
        pattern: PUBLISHED.clone(),
      }],
      doi_rules:              vec![PatternRule {
        name:    "doi-url".to_string(),
        pattern: DOI_URL.clone(),
      }],
      volume_issue_rules:     Vec::new(),
    }
  }
}

impl Config {
  /// Parses and validates a configuration from TOML text.
  pub fn from_toml_str(content: &str) -> Result<Self> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads, parses and validates a configuration file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Self::from_toml_str(&content)
  }

  /// Renders the configuration as TOML.
  pub fn to_toml_string(&self) -> Result<String> { Ok(toml::to_string_pretty(self)?) }

  /// Platform-specific location of the configuration file, e.g.
  /// `~/.config/gleaner/config.toml` on Linux.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("gleaner").join("config.toml")
  }

  /// Checks the invariants serde cannot express.
  ///
  /// Every rule must have the capture groups its parser reads, keywords must be non-empty
  /// strings, and the journal name must produce a valid pattern.
  pub fn validate(&self) -> Result<()> {
    if self.keywords.iter().any(|keyword| keyword.trim().is_empty()) {
      return Err(GleanerError::Config("Institution keywords must not be empty".to_string()));
    }
    for rule in &self.date_rules {
      rule.require_captures(1)?;
    }
    for rule in &self.doi_rules {
      rule.require_captures(1)?;
    }
    for rule in &self.volume_issue_rules {
      rule.require_captures(2)?;
    }
    self.journal_rule()?;
    Ok(())
  }

  /// Builds the volume/issue rule for [`Config::journal`].
  ///
  /// Whitespace inside the journal name matches any amount of whitespace, and an optional `.` may
  /// follow it. Returns `None` when no journal is configured.
  pub fn journal_rule(&self) -> Result<Option<PatternRule>> {
    if self.journal.trim().is_empty() {
      return Ok(None);
    }
    let journal = self.journal.split_whitespace().map(regex::escape).collect::<Vec<_>>();
    let pattern = format!(r"{}\.?\s*(\d+)\s*\((\d+)\)", journal.join(r"\s*"));
    Ok(Some(PatternRule::new("journal", &pattern)?))
  }

  /// All volume/issue rules in precedence order: the journal rule first, then the configured
  /// extras.
  pub fn all_volume_issue_rules(&self) -> Result<Vec<PatternRule>> {
    let mut rules: Vec<PatternRule> = self.journal_rule()?.into_iter().collect();
    rules.extend(self.volume_issue_rules.iter().cloned());
    Ok(rules)
  }

  /// Sets the journal name token.
  pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
    self.journal = journal.into();
    self
  }

  /// Sets the minimum accepted institution length.
  pub fn with_min_affiliation_length(mut self, min_length: usize) -> Self {
    self.min_affiliation_length = min_length;
    self
  }

  /// Replaces the institution keyword list.
  pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>, {
    self.keywords = keywords.into_iter().map(Into::into).collect();
    self
  }

  /// Sets the page indices read for identifiers, affiliations and the date.
  pub fn with_pages(
    mut self,
    identifier_page: usize,
    affiliation_pages: Vec<usize>,
    date_page: usize,
  ) -> Self {
    self.identifier_page = identifier_page;
    self.affiliation_pages = affiliation_pages;
    self.date_page = date_page;
    self
  }
}
