//! Pipeline tests driving the scrape through a scripted page session.
//!
//! The scripted page serves fixed markup and records every lifecycle call,
//! so these tests cover the driver's sequencing and teardown guarantees
//! without a live browser.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nvdweek::error::{ScrapeError, Stage};
use nvdweek::renderer::{PageError, SearchPage};
use nvdweek::scrape::{run_scrape, ScrapeOptions};

const RESULTS_PAGE: &str = r#"
<html><head><title>Search Results</title></head><body>
<table>
  <tbody>
    <tr>
      <th scope="row"><a href="/vuln/detail/CVE-2024-0101">CVE-2024-0101</a></th>
      <td>Buffer overflow in the frobnicator.</td>
      <td>03/11/2024</td>
      <td>03/12/2024</td>
      <td>9.8 CRITICAL</td>
    </tr>
    <tr>
      <th scope="row"><a href="/vuln/detail/CVE-2024-0102">CVE-2024-0102</a></th>
      <td>Use-after-free in the renderer process.</td>
      <td>03/12/2024</td>
      <td>03/12/2024</td>
    </tr>
    <tr>
      <th scope="row"><a href="/vuln/detail/CVE-2024-0103">CVE-2024-0103</a></th>
      <td>Path traversal in the archive unpacker.</td>
      <td>03/13/2024</td>
      <td>03/14/2024</td>
      <td>5.3 MEDIUM</td>
    </tr>
  </tbody>
</table>
</body></html>
"#;

const URL: &str = "https://nvd.example.test/vuln/search/results?form_type=Advanced";

/// Shared counters surviving the page's consumption by `close`.
#[derive(Default)]
struct Calls {
    closed: AtomicUsize,
    consent_clicks: AtomicUsize,
    settles: AtomicUsize,
}

struct ScriptedPage {
    markup: &'static str,
    consent_present: bool,
    rows_appear: bool,
    calls: Arc<Calls>,
}

impl ScriptedPage {
    fn new(consent_present: bool, rows_appear: bool) -> (Box<dyn SearchPage>, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let page = ScriptedPage {
            markup: RESULTS_PAGE,
            consent_present,
            rows_appear,
            calls: Arc::clone(&calls),
        };
        (Box::new(page), calls)
    }
}

#[async_trait]
impl SearchPage for ScriptedPage {
    async fn navigate(&self, _url: &str, _timeout: Duration) -> Result<(), PageError> {
        Ok(())
    }

    async fn click(&self, _selector: &str, timeout: Duration) -> Result<(), PageError> {
        if self.consent_present {
            self.calls.consent_clicks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        } else {
            Err(PageError::Timeout(timeout))
        }
    }

    async fn wait_for(&self, _selector: &str, timeout: Duration) -> Result<(), PageError> {
        if self.rows_appear {
            Ok(())
        } else {
            Err(PageError::Timeout(timeout))
        }
    }

    async fn content(&self) -> Result<String, PageError> {
        Ok(self.markup.to_string())
    }

    async fn settle(&self, _delay: Duration) -> Result<(), PageError> {
        self.calls.settles.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), PageError> {
        self.calls.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn test_happy_path_extracts_rows_in_order() {
    let (page, calls) = ScriptedPage::new(true, true);
    let records = run_scrape(page, URL, &ScrapeOptions::default())
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].cve_id, "CVE-2024-0101");
    assert_eq!(records[1].cvss_score, "");
    assert_eq!(records[2].cve_id, "CVE-2024-0103");
    assert_eq!(calls.consent_clicks.load(Ordering::SeqCst), 1);
    assert_eq!(calls.settles.load(Ordering::SeqCst), 1);
    assert_eq!(calls.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_absent_consent_banner_yields_identical_records() {
    let (with_banner, _) = ScriptedPage::new(true, true);
    let (without_banner, calls) = ScriptedPage::new(false, true);

    let dismissed = run_scrape(with_banner, URL, &ScrapeOptions::default())
        .await
        .unwrap();
    let ignored = run_scrape(without_banner, URL, &ScrapeOptions::default())
        .await
        .unwrap();

    assert_eq!(dismissed, ignored);
    assert_eq!(calls.consent_clicks.load(Ordering::SeqCst), 0);
    assert_eq!(calls.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_results_wait_timeout_is_fatal_and_still_closes_once() {
    let (page, calls) = ScriptedPage::new(true, false);
    let err = run_scrape(page, URL, &ScrapeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::Timeout {
            stage: Stage::AwaitResults,
            ..
        }
    ));
    assert_eq!(calls.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_limit_caps_the_record_count() {
    let (page, _) = ScriptedPage::new(true, true);
    let options = ScrapeOptions {
        limit: Some(2),
        ..Default::default()
    };
    let records = run_scrape(page, URL, &options).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_snapshot_is_written_before_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rendered.html");

    let (page, _) = ScriptedPage::new(true, true);
    let options = ScrapeOptions {
        snapshot_path: Some(path.clone()),
        ..Default::default()
    };
    let records = run_scrape(page, URL, &options).await.unwrap();

    assert_eq!(records.len(), 3);
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, RESULTS_PAGE);
}

#[tokio::test]
async fn test_snapshot_write_failure_is_fatal_and_still_closes_once() {
    let (page, calls) = ScriptedPage::new(true, true);
    let options = ScrapeOptions {
        snapshot_path: Some(PathBuf::from("/nonexistent-dir/rendered.html")),
        ..Default::default()
    };
    let err = run_scrape(page, URL, &options).await.unwrap_err();

    match err {
        ScrapeError::Snapshot { path, .. } => {
            assert_eq!(path, PathBuf::from("/nonexistent-dir/rendered.html"));
        }
        other => panic!("expected snapshot error, got {other}"),
    }
    assert_eq!(calls.closed.load(Ordering::SeqCst), 1);
}
