use super::*;

#[traced_test]
#[test]
fn test_nuclear_fusion_article() -> TestResult<()> {
  let pages = fixture("nf_article.txt")?;
  assert_eq!(pages.page_count(), Some(3));

  let record = Extractor::new(Config::default())?.extract(&pages);
  assert_eq!(record.doi.as_deref(), Some("10.1088/1741-4326/ab4b1c"));
  assert_eq!(record.volume_issue.as_deref(), Some("60 2020"));

  let date = record.pub_date.unwrap();
  assert_eq!(date.to_string(), "2019/11/21");
  assert_eq!(date.confidence, DateConfidence::Exact);

  assert_eq!(
    record.first_institution,
    "Institute of Plasma Physics, Chinese Academy of Sciences, Hefei 230031, People's Republic of \
     China"
  );
  assert_eq!(
    record.second_institution,
    "University of Science and Technology of China, Hefei 230026, People's Republic of China"
  );
  Ok(())
}

#[traced_test]
#[test]
fn test_configured_journal_layout() -> TestResult<()> {
  let config = Config::from_path("tests/data/ppcf.toml")?;
  assert_eq!(config.journal, "Plasma Phys. Control. Fusion");
  assert_eq!(config.affiliation_pages, vec![0]);

  let extractor = Extractor::new(config)?;
  let record = extractor.extract(&fixture("ppcf_article.txt")?);
  assert_eq!(record.doi.as_deref(), Some("10.1088/1361-6587/abcd12"));
  assert_eq!(record.volume_issue.as_deref(), Some("63 2"));

  let date = record.pub_date.unwrap();
  assert_eq!(date.to_string(), "2021/01/14");
  assert_eq!(date.confidence, DateConfidence::MonthDefaulted);
  assert!(logs_contain("Unknown month name"));

  let pages = fixture("ppcf_article.txt")?;
  let affiliations = extractor.extract_affiliations(&pages.page_text(0));
  assert_eq!(affiliations.method, AffiliationMethod::KeywordLines);
  assert_eq!(
    record.first_institution,
    "Fakultät für Physik, Ludwig-Maximilians-Universität München, Germany"
  );
  assert_eq!(
    record.second_institution,
    "Department of Physics, University of Oxford, Oxford OX1 3PU, United Kingdom"
  );
  Ok(())
}

#[test]
fn test_default_config_written_and_reloaded() -> TestResult<()> {
  let dir = tempfile::tempdir()?;
  let path = dir.path().join("config.toml");
  std::fs::write(&path, Config::default().to_toml_string()?)?;

  let extractor = Extractor::new(Config::from_path(&path)?)?;
  let record = extractor.extract(&fixture("nf_article.txt")?);
  assert_eq!(record.volume_issue.as_deref(), Some("60 2020"));
  assert_eq!(record.pub_date.unwrap().to_string(), "2019/11/21");
  Ok(())
}

#[test]
fn test_document_without_metadata() -> TestResult<()> {
  let pages = Pages::from_form_feeds("Lecture notes\x0cNothing to see here\x0c");
  let record = Extractor::new(Config::default())?.extract(&pages);
  assert!(record.is_empty());
  Ok(())
}
