//! PDF page text via [`lopdf`].
//!
//! [`PdfPages`] parses a document once and decodes a page's text each time it is asked for one.
//! Only the pages the extractor reads (by default the first three) are ever decoded.
//!
//! Text comes out in content-stream order with one line per text object, which for the journals
//! this crate targets is close enough to reading order. Pages built from images, or using fonts
//! lopdf cannot map back to Unicode, read as empty or garbled text; the extractor then reports the
//! affected fields as absent.

use lopdf::Document;

use super::*;

/// A parsed PDF document serving its pages as text.
#[derive(Debug)]
pub struct PdfPages {
  /// The parsed document
  document:     Document,
  /// Page numbers as lopdf knows them, in page order
  page_numbers: Vec<u32>,
}

impl PdfPages {
  /// Opens and parses the PDF at `path`.
  ///
  /// # Errors
  ///
  /// Returns [`GleanerError::Lopdf`] when the file is missing, is not a PDF, or cannot be parsed.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Opening PDF {}", path.display());
    Ok(Self::from_document(Document::load(path)?))
  }

  /// Parses a PDF held in memory.
  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    Ok(Self::from_document(Document::load_mem(bytes)?))
  }

  /// Wraps an already parsed document.
  pub fn from_document(document: Document) -> Self {
    let page_numbers = document.get_pages().keys().copied().collect::<Vec<_>>();
    trace!("PDF has {} page(s)", page_numbers.len());
    Self { document, page_numbers }
  }
}

impl PageSource for PdfPages {
  fn page_text(&self, index: usize) -> String {
    let Some(&page_number) = self.page_numbers.get(index) else {
      debug!("Page {index} requested from a {}-page PDF", self.page_numbers.len());
      return String::new();
    };
    match self.document.extract_text(&[page_number]) {
      Ok(text) => text,
      Err(e) => {
        warn!("Could not decode text of PDF page {page_number}: {e}");
        String::new()
      },
    }
  }

  fn page_count(&self) -> Option<usize> { Some(self.page_numbers.len()) }
}
