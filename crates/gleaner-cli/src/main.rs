//! Command line interface for the gleaner metadata extractor.
//!
//! This crate provides the `gleaner` binary on top of the `gleaner` library. It supports:
//! - Extracting date, DOI, volume/issue and institutions from many documents at once
//! - Dumping the text of a single page, to see what the heuristics are working with
//! - Writing a default configuration file to customize
//!
//! # Usage
//!
//! ```bash
//! # Extract metadata from every PDF in a directory, four documents at a time
//! gleaner extract 'papers/*.pdf' --jobs 4
//!
//! # Same, as JSON, from `pdftotext` output
//! gleaner extract --text --json papers/*.txt
//!
//! # Show what the second page of a PDF decodes to
//! gleaner page papers/nf_60_016001.pdf 1
//!
//! # Write the default configuration to the platform config directory
//! gleaner init
//! ```
//!
//! The configuration is read from `--config` when given, otherwise from the platform default
//! path if a file exists there, otherwise the built-in defaults apply. Logging verbosity is raised
//! with repeated `-v` flags.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
  sync::Arc,
};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use gleaner::{
  configuration::Config,
  error::GleanerError,
  extractor::{Extractor, MetadataRecord},
  pages::{PageSource, Pages},
  pdf::PdfPages,
};
use tracing::{debug, error, trace, warn};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Recover bibliographic metadata from scientific article text")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default platform-specific
  /// configuration directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,
}

impl Cli {
  /// Where the configuration lives: `--config`, or the platform default.
  pub fn config_path(&self) -> PathBuf { self.config.clone().unwrap_or_else(Config::default_path) }

  /// Loads the configuration for this invocation.
  ///
  /// An explicit `--config` must exist. Without it, the default path is used when a file exists
  /// there and the built-in defaults otherwise.
  pub fn load_config(&self) -> Result<Config> {
    let path = self.config_path();
    if self.config.is_none() && !path.exists() {
      debug!("No configuration at {}, using defaults", path.display());
      return Ok(Config::default());
    }
    Ok(Config::from_path(&path)?)
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

/// Entry point for the gleaner CLI application
///
/// Parses the command line, sets up logging and runs the requested command. Any error is printed
/// to stderr and turns into a failure exit status.
#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let result = match &cli.command {
    Commands::Extract(options) => extract(&cli, options).await,
    Commands::Page(options) => page(&cli, options),
    Commands::Init(options) => init(&cli, options),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{e:?}");
      eprintln!("{} {e}", style(ERROR_PREFIX).red());
      ExitCode::FAILURE
    },
  }
}
