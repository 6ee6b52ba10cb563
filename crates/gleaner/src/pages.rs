//! Page-text providers.
//!
//! The extractor never decodes documents itself. It asks a [`PageSource`] for the text of a page
//! by index and treats whatever comes back, including nothing, as the page. A provider must not
//! fail: an out-of-range index or a page it cannot decode reads as an empty string.
//!
//! Provided implementations:
//! - [`Pages`], in-memory pages, e.g. split out of `pdftotext` output
//! - slices and vectors of strings
//! - [`PdfPages`](crate::pdf::PdfPages), decoded from a PDF on demand
//!
//! # Examples
//!
//! ```
//! use gleaner::pages::{PageSource, Pages};
//!
//! let pages = Pages::from_form_feeds("first page\x0csecond page\x0c");
//! assert_eq!(pages.page_count(), Some(2));
//! assert_eq!(pages.page_text(1), "second page");
//! assert_eq!(pages.page_text(9), "");
//! ```

use super::*;

/// Form feed, the page separator written by `pdftotext` and similar tools.
pub const FORM_FEED: char = '\x0c';

/// A document readable page by page.
pub trait PageSource {
  /// Text of page `index` (zero-based) in reading order, or an empty string when the page does not
  /// exist or cannot be read.
  fn page_text(&self, index: usize) -> String;

  /// Number of pages, when known.
  fn page_count(&self) -> Option<usize> { None }
}

impl<T: AsRef<str>> PageSource for [T] {
  fn page_text(&self, index: usize) -> String {
    match self.get(index) {
      Some(page) => page.as_ref().to_string(),
      None => {
        debug!("Page {index} requested from a {}-page document", self.len());
        String::new()
      },
    }
  }

  fn page_count(&self) -> Option<usize> { Some(self.len()) }
}

impl<T: AsRef<str>> PageSource for Vec<T> {
  fn page_text(&self, index: usize) -> String { self.as_slice().page_text(index) }

  fn page_count(&self) -> Option<usize> { Some(self.len()) }
}

impl<P: PageSource + ?Sized> PageSource for &P {
  fn page_text(&self, index: usize) -> String { (**self).page_text(index) }

  fn page_count(&self) -> Option<usize> { (**self).page_count() }
}

/// Pages held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pages {
  /// Text of each page, in order
  pages: Vec<String>,
}

impl Pages {
  /// Wraps already separated page texts.
  pub fn new(pages: Vec<String>) -> Self { Self { pages } }

  /// Splits text on form feeds, one page per segment.
  ///
  /// A single trailing form feed (as `pdftotext` writes after the last page) does not start an
  /// extra page.
  pub fn from_form_feeds(text: &str) -> Self {
    let text = text.strip_suffix(FORM_FEED).unwrap_or(text);
    Self { pages: text.split(FORM_FEED).map(str::to_string).collect() }
  }

  /// Reads a text file and splits it with [`Pages::from_form_feeds`].
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    trace!("Reading page text from {}", path.display());
    Ok(Self::from_form_feeds(&std::fs::read_to_string(path)?))
  }

  /// The page texts.
  pub fn as_slice(&self) -> &[String] { &self.pages }
}

impl PageSource for Pages {
  fn page_text(&self, index: usize) -> String { self.pages.page_text(index) }

  fn page_count(&self) -> Option<usize> { Some(self.pages.len()) }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[traced_test]
  #[test]
  fn test_out_of_range_reads_empty() {
    let pages = vec!["only page"];
    assert_eq!(pages.page_text(0), "only page");
    assert_eq!(pages.page_text(1), "");
    assert_eq!(pages.page_text(usize::MAX), "");
    assert!(logs_contain("Page 1 requested from a 1-page document"));

    let empty: Vec<String> = Vec::new();
    assert_eq!(empty.page_text(0), "");
    assert_eq!(empty.page_count(), Some(0));
  }

  #[test]
  fn test_form_feed_split() {
    let pages = Pages::from_form_feeds("one\nline two\x0c\x0cthree\x0c");
    assert_eq!(pages.as_slice(), ["one\nline two", "", "three"]);
    assert_eq!(pages.page_text(1), "");

    assert_eq!(Pages::from_form_feeds("").page_count(), Some(1));
    assert_eq!(Pages::from_form_feeds("no separators").page_text(0), "no separators");
  }

  #[test]
  fn test_from_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paper.txt");
    std::fs::write(&path, "page zero\x0cpage one\x0c").unwrap();

    let pages = Pages::from_path(&path).unwrap();
    assert_eq!(pages.page_count(), Some(2));
    assert_eq!(pages.page_text(1), "page one");

    assert!(matches!(Pages::from_path(dir.path().join("missing.txt")), Err(GleanerError::Path(_))));
  }

  #[test]
  fn test_through_reference() {
    fn first_page(source: &dyn PageSource) -> String { source.page_text(0) }

    let pages = Pages::new(vec!["a".to_string(), "b".to_string()]);
    let borrowed = &pages;
    assert_eq!(first_page(&borrowed), "a");
    assert_eq!(borrowed.page_count(), Some(2));
  }
}
