use lopdf::{
  content::{Content, Operation},
  dictionary, Document, Object, Stream,
};

use super::*;

/// One text object per line, Courier at 10pt.
fn text_operations(lines: &[&str]) -> Vec<Operation> {
  let mut operations = Vec::new();
  for (i, line) in lines.iter().enumerate() {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec!["F1".into(), Object::Integer(10)]));
    operations.push(Operation::new("Td", vec![
      Object::Integer(50),
      Object::Integer(780 - 14 * i as i64),
    ]));
    operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    operations.push(Operation::new("ET", vec![]));
  }
  operations
}

/// Builds a PDF with one text object per line.
fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
  build_pdf_from(pages.iter().map(|lines| text_operations(lines)).collect())
}

/// Builds a PDF whose pages run the given content operations.
fn build_pdf_from(pages: Vec<Vec<Operation>>) -> Vec<u8> {
  let mut doc = Document::with_version("1.5");
  let pages_id = doc.new_object_id();
  let font_id = doc.add_object(dictionary! {
    "Type" => "Font",
    "Subtype" => "Type1",
    "BaseFont" => "Courier",
  });
  let resources_id = doc.add_object(dictionary! {
    "Font" => dictionary! { "F1" => font_id },
  });

  let mut kids: Vec<Object> = Vec::new();
  for operations in pages {
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
      "Type" => "Page",
      "Parent" => pages_id,
      "Contents" => content_id,
      "Resources" => resources_id,
    });
    kids.push(page_id.into());
  }

  let count = kids.len() as i64;
  doc.objects.insert(
    pages_id,
    Object::Dictionary(dictionary! {
      "Type" => "Pages",
      "Kids" => kids,
      "Count" => count,
      "Resources" => resources_id,
      "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    }),
  );
  let catalog_id = doc.add_object(dictionary! {
    "Type" => "Catalog",
    "Pages" => pages_id,
  });
  doc.trailer.set("Root", catalog_id);

  let mut bytes = Vec::new();
  doc.save_to(&mut bytes).unwrap();
  bytes
}

fn article_pdf() -> Vec<u8> {
  build_pdf(&[
    &[
      "Nucl. Fusion 62 (2022) 076012",
      "https://doi.org/10.1088/1741-4326/ac5e3d",
      "1 Southwestern Institute of Physics, Chengdu 610041, China",
      "2 Department of Engineering Physics, Tsinghua University, Beijing, China",
    ],
    &["Received 4 January 2022", "Published 9 May 2022"],
  ])
}

#[traced_test]
#[test]
fn test_pdf_pages() -> TestResult<()> {
  let pdf = PdfPages::from_bytes(&article_pdf())?;
  assert_eq!(pdf.page_count(), Some(2));
  assert!(pdf.page_text(0).contains("Nucl. Fusion 62 (2022) 076012"));
  assert!(pdf.page_text(1).contains("Published 9 May 2022"));
  assert_eq!(pdf.page_text(2), "");
  assert!(logs_contain("Page 2 requested from a 2-page PDF"));
  Ok(())
}

#[traced_test]
#[test]
fn test_pdf_extraction() -> TestResult<()> {
  let dir = tempfile::tempdir()?;
  let path = dir.path().join("article.pdf");
  std::fs::write(&path, article_pdf())?;

  let record = Extractor::new(Config::default())?.extract(&PdfPages::open(&path)?);
  assert_eq!(record.doi.as_deref(), Some("10.1088/1741-4326/ac5e3d"));
  assert_eq!(record.volume_issue.as_deref(), Some("62 2022"));
  assert_eq!(record.pub_date.unwrap().to_string(), "2022/05/09");
  assert_eq!(record.first_institution, "Southwestern Institute of Physics, Chengdu 610041, China");
  assert_eq!(
    record.second_institution,
    "Department of Engineering Physics, Tsinghua University, Beijing, China"
  );
  Ok(())
}

#[test]
fn test_corrupt_pdf_is_an_error() -> TestResult<()> {
  let dir = tempfile::tempdir()?;
  let path = dir.path().join("broken.pdf");
  std::fs::write(&path, b"%PDF-1.5\nthis is not really a pdf")?;
  assert!(matches!(PdfPages::open(&path), Err(GleanerError::Lopdf(_))));
  Ok(())
}

#[traced_test]
#[test]
fn test_undecodable_page_reads_empty() -> TestResult<()> {
  // A font selection whose name operand is a number cannot be mapped to an encoding
  let broken = vec![
    Operation::new("BT", vec![]),
    Operation::new("Tf", vec![Object::Integer(10), Object::Integer(10)]),
    Operation::new("Tj", vec![Object::string_literal("University of Nowhere")]),
    Operation::new("ET", vec![]),
  ];
  let pdf = PdfPages::from_bytes(&build_pdf_from(vec![
    text_operations(&["https://doi.org/10.1088/1741-4326/ac5e3d"]),
    broken,
  ]))?;
  assert_eq!(pdf.page_count(), Some(2));
  assert_eq!(pdf.page_text(1), "");
  assert!(logs_contain("Could not decode text"));

  let record = Extractor::new(Config::default())?.extract(&pdf);
  assert_eq!(record.doi.as_deref(), Some("10.1088/1741-4326/ac5e3d"));
  assert_eq!(record.first_institution, "");
  Ok(())
}
