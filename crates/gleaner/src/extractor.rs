//! Metadata extraction over a page-text provider.
//!
//! An [`Extractor`] compiles a [`Config`] once and then turns any [`PageSource`] into a
//! [`MetadataRecord`]. Each field is read from its own page:
//!
//! | Field                      | Page (default)                    |
//! |----------------------------|-----------------------------------|
//! | DOI, volume/issue          | `identifier_page` (0)             |
//! | First/second institution   | `affiliation_pages` (0 and 1)     |
//! | Publication date           | `date_page` (1)                   |
//!
//! Affiliation pages are joined with a blank line between them, so a numbered block never runs
//! from the end of one page into the next.
//!
//! Extraction never fails. A field whose heuristics find nothing, or whose page is missing or
//! unreadable, is simply left empty.
//!
//! An [`Extractor`] holds only compiled patterns and configuration, so it is `Send + Sync` and can
//! be shared across threads behind an [`Arc`](std::sync::Arc).

use crate::{
  affiliation::{AffiliationParser, Affiliations, REPORTED_AFFILIATIONS},
  date::CanonicalDate,
  identifier,
  rules::PatternRule,
};

use super::*;

/// Separator placed between affiliation pages.
const PAGE_BREAK: &str = "\n\n";

/// Metadata recovered from one document.
///
/// Every field is independently optional; institutions that were not found are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
  /// DOI suffix, e.g. `10.1088/1741-4326/ab4b1c`
  pub doi:                Option<String>,
  /// Volume and issue as `"VOLUME ISSUE"`
  pub volume_issue:       Option<String>,
  /// Publication date
  pub pub_date:           Option<CanonicalDate>,
  /// First institution in author order
  pub first_institution:  String,
  /// Second institution in author order
  pub second_institution: String,
}

impl MetadataRecord {
  /// Whether nothing at all was recovered.
  pub fn is_empty(&self) -> bool {
    self.doi.is_none()
      && self.volume_issue.is_none()
      && self.pub_date.is_none()
      && self.first_institution.is_empty()
      && self.second_institution.is_empty()
  }
}

/// Compiled extraction heuristics for one configuration.
#[derive(Debug, Clone)]
pub struct Extractor {
  /// Configuration the extractor was built from
  config:             Config,
  /// Volume/issue rules, journal rule first
  volume_issue_rules: Vec<PatternRule>,
  /// Affiliation heuristics
  affiliations:       AffiliationParser,
}

impl Extractor {
  /// Validates `config` and compiles its heuristics.
  ///
  /// # Errors
  ///
  /// Fails when the configuration is invalid, see [`Config::validate`].
  pub fn new(config: Config) -> Result<Self> {
    config.validate()?;
    let volume_issue_rules = config.all_volume_issue_rules()?;
    let affiliations =
      AffiliationParser::new(&config.keywords, Normalizer::new(config.min_affiliation_length))?;
    debug!(
      "Built extractor for journal {:?} with {} keyword(s), {} date rule(s), {} DOI rule(s), {} \
       volume/issue rule(s)",
      config.journal,
      config.keywords.len(),
      config.date_rules.len(),
      config.doi_rules.len(),
      volume_issue_rules.len()
    );
    Ok(Self { config, volume_issue_rules, affiliations })
  }

  /// The configuration in use.
  pub fn config(&self) -> &Config { &self.config }

  /// Extracts every field from the configured pages of `pages`.
  pub fn extract<P: PageSource + ?Sized>(&self, pages: &P) -> MetadataRecord {
    let identifier_text = pages.page_text(self.config.identifier_page);
    let date_text = pages.page_text(self.config.date_page);
    let affiliation_text = self
      .config
      .affiliation_pages
      .iter()
      .map(|&index| pages.page_text(index))
      .collect::<Vec<_>>()
      .join(PAGE_BREAK);

    let (first_institution, second_institution) =
      self.extract_affiliations(&affiliation_text).into_pair();
    let record = MetadataRecord {
      doi: self.extract_doi(&identifier_text),
      volume_issue: self.extract_volume_issue(&identifier_text),
      pub_date: self.extract_date(&date_text),
      first_institution,
      second_institution,
    };
    if record.is_empty() {
      debug!("Nothing recovered from the document");
    }
    record
  }

  /// Finds the publication date in `page_text`.
  pub fn extract_date(&self, page_text: &str) -> Option<CanonicalDate> {
    date::extract_date(page_text, &self.config.date_rules)
  }

  /// Finds the DOI in `page_text`.
  pub fn extract_doi(&self, page_text: &str) -> Option<String> {
    identifier::extract_doi(page_text, &self.config.doi_rules)
  }

  /// Finds the volume and issue in `page_text`, as `"VOLUME ISSUE"`.
  pub fn extract_volume_issue(&self, page_text: &str) -> Option<String> {
    identifier::extract_volume_issue(page_text, &self.volume_issue_rules)
  }

  /// Finds up to two institutions in `page_text`, in author order.
  pub fn extract_affiliations(&self, page_text: &str) -> Affiliations {
    self.affiliations.parse(page_text).truncate(REPORTED_AFFILIATIONS)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{affiliation::AffiliationMethod, pages::Pages};

  const FIRST_PAGE: &str = "IOP Publishing | International Atomic Energy Agency
Nucl. Fusion 61 (2021) 016001 (12pp)                https://doi.org/10.1088/1741-4326/abc0d1

Edge turbulence in a tokamak

A. Author1, B. Author2 and C. Author1,3

1 Institute of Plasma Physics, Chinese Academy of Sciences, Hefei 230031,
  China
2 University of Science and Technology of China, Hefei 230026, China
3 Max-Planck-Institut fur Plasmaphysik, D-85748 Garching, Germany

E-mail: a.author@ipp.ac.cn";

  const SECOND_PAGE: &str = "Received 1 July 2020
Accepted for publication 2 October 2020
Published 3 December 2020";

  fn extractor() -> Extractor { Extractor::new(Config::default()).unwrap() }

  #[traced_test]
  #[test]
  fn test_full_record() {
    let record = extractor().extract(&vec![FIRST_PAGE, SECOND_PAGE]);
    assert_eq!(record.doi.as_deref(), Some("10.1088/1741-4326/abc0d1"));
    assert_eq!(record.volume_issue.as_deref(), Some("61 2021"));
    assert_eq!(record.pub_date.unwrap().to_string(), "2020/12/03");
    assert_eq!(
      record.first_institution,
      "Institute of Plasma Physics, Chinese Academy of Sciences, Hefei 230031, China"
    );
    assert_eq!(
      record.second_institution,
      "University of Science and Technology of China, Hefei 230026, China"
    );
  }

  #[traced_test]
  #[test]
  fn test_empty_document() {
    let record = extractor().extract(&Pages::default());
    assert!(record.is_empty());
    assert_eq!(record, MetadataRecord::default());
    assert!(logs_contain("Nothing recovered from the document"));
  }

  #[test]
  fn test_missing_second_page() {
    let record = extractor().extract(&vec![FIRST_PAGE]);
    assert!(record.pub_date.is_none());
    assert_eq!(record.doi.as_deref(), Some("10.1088/1741-4326/abc0d1"));
    assert!(!record.first_institution.is_empty());
  }

  #[test]
  fn test_affiliations_do_not_run_across_pages() {
    let pages = vec![
      "1 Department of Physics, University of Wisconsin, Madison, WI, USA",
      "continued text from the article body that mentions nothing",
    ];
    let affiliations = extractor().extract_affiliations(&pages.join(PAGE_BREAK));
    assert_eq!(affiliations.method, AffiliationMethod::Numbered);
    assert_eq!(
      affiliations.first(),
      "Department of Physics, University of Wisconsin, Madison, WI, USA"
    );

    let record = extractor().extract(&pages);
    assert_eq!(record.first_institution, affiliations.first());
    assert_eq!(record.second_institution, "");
  }

  #[test]
  fn test_at_most_two_institutions() {
    let text = "1 University of Tokyo, Tokyo, Japan\n2 Kyoto University, Kyoto, Japan\n3 National \
                Institutes for Quantum Science and Technology, Naka, Japan";
    let affiliations = extractor().extract_affiliations(text);
    assert_eq!(affiliations.institutions.len(), 2);
    assert_eq!(affiliations.second(), "Kyoto University, Kyoto, Japan");
  }

  #[test]
  fn test_configured_pages() {
    let config = Config::default().with_pages(1, vec![1], 2);
    let extractor = Extractor::new(config).unwrap();
    let pages = vec!["cover page", FIRST_PAGE, SECOND_PAGE];

    let record = extractor.extract(&pages);
    assert_eq!(record.volume_issue.as_deref(), Some("61 2021"));
    assert_eq!(record.pub_date.unwrap().to_string(), "2020/12/03");
    assert!(record.first_institution.starts_with("Institute of Plasma Physics"));
  }

  #[test]
  fn test_individual_operations() {
    let extractor = extractor();
    assert_eq!(extractor.extract_date(SECOND_PAGE).unwrap().to_string(), "2020/12/03");
    assert!(extractor.extract_date(FIRST_PAGE).is_none());
    assert_eq!(extractor.extract_doi(FIRST_PAGE).as_deref(), Some("10.1088/1741-4326/abc0d1"));
    assert!(extractor.extract_volume_issue(SECOND_PAGE).is_none());
    assert_eq!(extractor.config().journal, configuration::DEFAULT_JOURNAL);
  }

  #[test]
  fn test_invalid_config_is_rejected() {
    let config =
      Config { doi_rules: vec![PatternRule::new("bare", "doi").unwrap()], ..Default::default() };
    assert!(matches!(
      Extractor::new(config),
      Err(GleanerError::RuleCaptures(name, 1)) if name == "bare"
    ));

    let config = Config::default().with_keywords(["University", " "]);
    assert!(matches!(Extractor::new(config), Err(GleanerError::Config(_))));
  }

  #[test]
  fn test_record_serializes() {
    let record = extractor().extract(&vec![FIRST_PAGE, SECOND_PAGE]);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["doi"], "10.1088/1741-4326/abc0d1");
    assert_eq!(json["pub_date"]["year"], "2020");
    assert_eq!(json["pub_date"]["confidence"], "exact");
    assert_eq!(serde_json::from_value::<MetadataRecord>(json).unwrap(), record);
  }
}
