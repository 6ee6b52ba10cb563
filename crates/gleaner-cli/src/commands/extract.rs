//! Module for extracting metadata from many documents.
//!
//! Documents are independent, so each one is opened and extracted on the blocking thread pool,
//! with at most `--jobs` in flight. Results are reported in input order regardless of which
//! document finishes first.

use serde::Serialize;
use tokio::{sync::Semaphore, task::JoinSet};

use super::*;

/// Arguments of `gleaner extract`.
#[derive(Args, Clone)]
pub struct ExtractOptions {
  /// Documents to read, as file paths or glob patterns
  #[arg(required = true)]
  pub inputs: Vec<String>,

  /// Read every input as form-feed separated text, even files ending in `.pdf`
  #[arg(long)]
  pub text: bool,

  /// Print a JSON array instead of one tree per document
  #[arg(long)]
  pub json: bool,

  /// Number of documents processed at once
  #[arg(long, short, default_value_t = default_jobs())]
  pub jobs: usize,
}

/// One document as printed by `--json`.
#[derive(Debug, Serialize)]
struct DocumentReport<'a> {
  /// Document the record came from
  path:   &'a Path,
  /// Recovered fields
  #[serde(flatten)]
  record: &'a MetadataRecord,
}

/// Outcome of one document worker: input position, path, and record or failure.
type Outcome = (usize, PathBuf, Result<MetadataRecord>);

/// One worker per available core.
fn default_jobs() -> usize { std::thread::available_parallelism().map_or(1, usize::from) }

/// Function for the [`Commands::Extract`] in the CLI.
pub async fn extract(cli: &Cli, options: &ExtractOptions) -> Result<()> {
  let ExtractOptions { inputs, text, json, jobs } = options;
  let extractor = Arc::new(Extractor::new(cli.load_config()?)?);

  let paths = expand_inputs(inputs)?;
  if paths.is_empty() {
    warning("No documents to read");
    return Ok(());
  }
  let jobs = (*jobs).max(1);
  debug!("Extracting from {} document(s), {jobs} at a time", paths.len());

  let semaphore = Arc::new(Semaphore::new(jobs));
  let mut tasks: JoinSet<Outcome> = JoinSet::new();
  for (index, path) in paths.into_iter().enumerate() {
    let permit = Arc::clone(&semaphore).acquire_owned().await?;
    let extractor = Arc::clone(&extractor);
    let force_text = *text;
    tasks.spawn_blocking(move || {
      let _permit = permit;
      let outcome = open_document(&path, force_text).map(|document| extractor.extract(&*document));
      (index, path, outcome)
    });
  }

  let mut outcomes = Vec::new();
  while let Some(joined) = tasks.join_next().await {
    outcomes.push(joined?);
  }
  outcomes.sort_by_key(|(index, ..)| *index);

  let mut records = Vec::new();
  for (_, path, outcome) in outcomes {
    match outcome {
      Ok(record) => records.push((path, record)),
      Err(e) => warning(&format!("Skipping {}: {e}", path.display())),
    }
  }

  if *json {
    let reports =
      records.iter().map(|(path, record)| DocumentReport { path, record }).collect::<Vec<_>>();
    println!("{}", serde_json::to_string_pretty(&reports)?);
  } else {
    for (path, record) in &records {
      print!("{}", render_record(path, record));
    }
  }
  Ok(())
}

/// Resolves inputs to document paths, in order and without duplicates.
///
/// An input naming an existing file is taken as is. Anything else is treated as a glob pattern,
/// and a pattern matching no file is reported and skipped.
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
  let mut paths: Vec<PathBuf> = Vec::new();
  for input in inputs {
    let literal = Path::new(input);
    let matches = if literal.exists() {
      vec![literal.to_path_buf()]
    } else {
      let mut matches = Vec::new();
      for entry in glob::glob(input)? {
        match entry {
          Ok(path) if path.is_dir() => trace!("Ignoring directory {}", path.display()),
          Ok(path) => matches.push(path),
          Err(e) => warning(&format!("Cannot read {}: {e}", e.path().display())),
        }
      }
      matches
    };

    if matches.is_empty() {
      warning(&format!("No documents match {input}"));
    }
    for path in matches {
      if !paths.contains(&path) {
        paths.push(path);
      }
    }
  }
  Ok(paths)
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_expand_inputs() {
    let dir = tempdir().unwrap();
    for name in ["b.txt", "a.txt", "c.pdf"] {
      std::fs::write(dir.path().join(name), "page").unwrap();
    }
    std::fs::create_dir(dir.path().join("d.txt")).unwrap();

    let inputs = vec![
      dir.path().join("c.pdf").display().to_string(),
      dir.path().join("*.txt").display().to_string(),
      dir.path().join("a.txt").display().to_string(),
      dir.path().join("missing-*.pdf").display().to_string(),
    ];
    let paths = expand_inputs(&inputs).unwrap();
    assert_eq!(paths, vec![
      dir.path().join("c.pdf"),
      dir.path().join("a.txt"),
      dir.path().join("b.txt"),
    ]);
  }

  #[test]
  fn test_invalid_pattern() {
    let inputs = vec!["papers/[unclosed".to_string()];
    assert!(matches!(expand_inputs(&inputs), Err(CliError::Pattern(_))));
  }
}
