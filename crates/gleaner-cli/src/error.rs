//! Errors surfaced by the `gleaner` binary.

use thiserror::Error;

use super::*;

/// Error type alias used throughout the CLI.
pub type Result<T> = core::result::Result<T, CliError>;

/// Failures of a CLI command.
///
/// Extraction itself never fails; these come from configuration, input handling and output.
#[derive(Error, Debug)]
pub enum CliError {
  /// Configuration or document loading failed in the library.
  #[error(transparent)]
  Gleaner(#[from] GleanerError),

  /// Reading or writing a file failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// Rendering JSON output failed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// An input is not a valid glob pattern.
  #[error(transparent)]
  Pattern(#[from] glob::PatternError),

  /// A document worker panicked or was cancelled.
  #[error(transparent)]
  Join(#[from] tokio::task::JoinError),

  /// The worker limit semaphore was closed.
  #[error(transparent)]
  Acquire(#[from] tokio::sync::AcquireError),

  /// `gleaner page` was asked for a page the document does not have.
  #[error("Page {index} is out of range, {} has {count} page(s)", .path.display())]
  PageOutOfRange {
    /// Document that was read
    path:  PathBuf,
    /// Requested zero-based page index
    index: usize,
    /// Number of pages in the document
    count: usize,
  },
}
