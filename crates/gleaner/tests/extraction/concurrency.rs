use std::{sync::Arc, thread};

use super::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_extractor_is_thread_safe() { assert_send_sync::<Extractor>(); }

#[test]
fn test_shared_extractor() -> TestResult<()> {
  let extractor = Arc::new(Extractor::new(Config::default())?);
  let pages = Arc::new(fixture("nf_article.txt")?);
  let expected = extractor.extract(&*pages);

  let handles = (0..8)
    .map(|_| {
      let extractor = Arc::clone(&extractor);
      let pages = Arc::clone(&pages);
      thread::spawn(move || extractor.extract(&*pages))
    })
    .collect::<Vec<_>>();

  for handle in handles {
    assert_eq!(handle.join().unwrap(), expected);
  }
  assert_eq!(expected.doi.as_deref(), Some("10.1088/1741-4326/ab4b1c"));
  Ok(())
}
