//! Error types for the gleaner library.
//!
//! Extraction itself never fails: every `extract*` operation returns a value, with missing fields
//! left empty. The errors here cover the fallible edges around it:
//! - Loading and validating configuration
//! - Compiling pattern rules
//! - Opening PDF documents
//!
//! # Examples
//!
//! ```
//! use gleaner::{configuration::Config, error::GleanerError};
//!
//! let result = Config::from_toml_str("journal = 42");
//! match result {
//!   Err(GleanerError::TomlDe(e)) => println!("Bad configuration: {}", e),
//!   Err(e) => println!("Other error: {}", e),
//!   Ok(_) => println!("Loaded!"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`gleaner`](crate) crate.
pub type Result<T> = core::result::Result<T, GleanerError>;

/// Errors that can occur around metadata extraction.
#[derive(Error, Debug)]
pub enum GleanerError {
  /// A file system operation failed.
  ///
  /// This occurs when reading a configuration file or a PDF from disk.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// A configuration file could not be parsed as TOML or did not match the expected shape.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A configuration could not be rendered back to TOML.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A pattern rule or a pattern built from configuration is not a valid regular expression.
  #[error(transparent)]
  Regex(#[from] regex::Error),

  /// A pattern rule compiled, but does not expose the capture groups its parser reads.
  ///
  /// The first parameter is the rule name, the second the number of groups required.
  #[error("Rule \"{0}\" must have at least {1} capture group(s)")]
  RuleCaptures(String, usize),

  /// PDF parsing errors from the lopdf library.
  ///
  /// This variant wraps errors that occur while loading a document, such as:
  /// - Malformed or corrupted PDF files
  /// - Encrypted PDF files that require passwords
  ///
  /// Per-page decoding failures are not surfaced as errors; a page that cannot be decoded reads
  /// as empty text.
  #[error(transparent)]
  Lopdf(#[from] lopdf::Error),

  /// A semantic problem with an otherwise well-formed configuration.
  #[error("{0}")]
  Config(String),
}
