//! Module for dumping the text of a single page.

use super::*;

/// Arguments of `gleaner page`.
#[derive(Args, Clone)]
pub struct PageOptions {
  /// Document to read
  pub input: PathBuf,

  /// Zero-based page index
  pub index: usize,

  /// Read the input as form-feed separated text even if it looks like a PDF
  #[arg(long)]
  pub text: bool,
}

/// Function for the [`Commands::Page`] in the CLI.
pub fn page(_cli: &Cli, options: &PageOptions) -> Result<()> {
  let PageOptions { input, index, text } = options;
  let document = open_document(input, *text)?;

  if let Some(count) = document.page_count() {
    if *index >= count {
      return Err(CliError::PageOutOfRange { path: input.clone(), index: *index, count });
    }
  }
  let page_text = document.page_text(*index);
  debug!("Page {index} of {} has {} characters", input.display(), page_text.chars().count());
  println!("{page_text}");
  Ok(())
}
