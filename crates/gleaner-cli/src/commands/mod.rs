use super::*;

pub mod extract;
pub mod init;
pub mod page;

pub use extract::extract;
pub use init::init;
pub use page::page;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Extract metadata from documents
  Extract(extract::ExtractOptions),

  /// Print the text of one page of a document
  Page(page::PageOptions),

  /// Write the default configuration file
  Init(init::InitOptions),
}

/// Opens `path` as a page-text provider.
///
/// Files with a `.pdf` extension are decoded with lopdf unless `force_text` is set. Everything
/// else is read as UTF-8 text with pages separated by form feeds, as `pdftotext` writes them.
pub fn open_document(path: &Path, force_text: bool) -> Result<Box<dyn PageSource>> {
  if !force_text && is_pdf(path) {
    trace!("Reading {} as PDF", path.display());
    Ok(Box::new(PdfPages::open(path)?))
  } else {
    trace!("Reading {} as text", path.display());
    Ok(Box::new(Pages::from_path(path)?))
  }
}

/// Whether `path` has a `.pdf` extension, in any case.
fn is_pdf(path: &Path) -> bool {
  path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("pdf"))
}
