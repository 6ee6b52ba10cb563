//! Bibliographic metadata extraction from the text of scientific articles.
//!
//! `gleaner` recovers a handful of structured facts from the raw, extracted text of specific pages
//! of an article, for documents where no machine-readable metadata field can be trusted:
//!
//! - Publication date, canonicalized as `YYYY/MM/DD`
//! - DOI
//! - Volume and issue
//! - The first two author affiliations
//!
//! Everything is driven by layout-agnostic pattern heuristics that degrade through fallbacks
//! instead of failing. Extraction is a total function: it always returns a record, possibly with
//! empty fields, and never an error.
//!
//! # Getting Started
//!
//! ```
//! use gleaner::{configuration::Config, extractor::Extractor, pages::Pages};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::new(Config::default())?;
//!
//! let pages = Pages::new(vec![
//!   "Nucl. Fusion 60 (2020) 016001\nhttps://doi.org/10.1088/1741-4326/ab4b1c\n\
//!    1 Institute of Plasma Physics, Chinese Academy of Sciences, Hefei, China\n\
//!    2 University of Science and Technology of China, Hefei, China"
//!     .to_string(),
//!   "Received 3 June 2019\nPublished 21 November 2019".to_string(),
//! ]);
//!
//! let record = extractor.extract(&pages);
//! assert_eq!(record.doi.as_deref(), Some("10.1088/1741-4326/ab4b1c"));
//! assert_eq!(record.volume_issue.as_deref(), Some("60 2020"));
//! assert_eq!(record.pub_date.unwrap().to_string(), "2019/11/21");
//! assert_eq!(
//!   record.first_institution,
//!   "Institute of Plasma Physics, Chinese Academy of Sciences, Hefei, China"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`normalize`]: Text cleaning shared by the affiliation heuristics
//! - [`date`]: Publication date location and canonicalization
//! - [`identifier`]: DOI and volume/issue location
//! - [`affiliation`]: Two-phase institution recovery
//! - [`extractor`]: Orchestration over a page-text provider
//! - [`rules`]: Named, ordered regex rules used by the parsers
//! - [`configuration`]: TOML configuration of journals, keywords, pages and rules
//! - [`pages`] and [`pdf`]: Page-text providers
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::BTreeMap,
  fmt::Display,
  path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod affiliation;
pub mod configuration;
pub mod date;
pub mod error;
pub mod extractor;
pub mod identifier;
pub mod normalize;
pub mod pages;
pub mod pdf;
pub mod rules;

use crate::{configuration::Config, error::*, normalize::Normalizer, pages::PageSource};

/// Common traits and types for ergonomic imports.
///
/// ```
/// use gleaner::prelude::*;
///
/// # fn example() -> Result<(), GleanerError> {
/// let extractor = Extractor::new(Config::default())?;
/// let record = extractor.extract(&vec!["https://doi.org/10.1088/1741-4326/ab1234"]);
/// assert_eq!(record.doi.as_deref(), Some("10.1088/1741-4326/ab1234"));
/// # Ok(())
/// # }
/// ```
pub mod prelude {
  pub use crate::{
    configuration::Config,
    error::GleanerError,
    extractor::{Extractor, MetadataRecord},
    pages::PageSource,
  };
}
