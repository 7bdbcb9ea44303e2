//! The page driver: one browser session, one pass over the search page.
//!
//! Stages run strictly in sequence — navigate, consent, optional snapshot,
//! settle, await rows, extract — and each carries its own deadline. Any
//! fatal failure unwinds to [`run_scrape`], which closes the session
//! exactly once before propagating.

use tracing::{debug, info, warn};

use super::extract::extract_records;
use super::types::{
    ScrapeOptions, Vulnerability, CONSENT_SELECTOR, CONSENT_TIMEOUT, NAVIGATION_TIMEOUT,
    RESULTS_WAIT_TIMEOUT, ROW_SELECTOR, SETTLE_DELAY,
};
use crate::error::{ScrapeError, Stage};
use crate::renderer::{PageError, SearchPage};

/// Whether the consent banner was actually dismissed. Failing to find or
/// click the control within its window is an expected outcome, not an
/// error — the pipeline proceeds either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentOutcome {
    Dismissed,
    NotDismissed,
}

/// Run one scrape pass against `url` and return the extracted records.
///
/// The session is closed on every exit path; a teardown failure after a
/// successful pass is logged, never fatal.
pub async fn run_scrape(
    page: Box<dyn SearchPage>,
    url: &str,
    options: &ScrapeOptions,
) -> Result<Vec<Vulnerability>, ScrapeError> {
    let outcome = drive(page.as_ref(), url, options).await;
    if let Err(e) = page.close().await {
        warn!("browser teardown reported: {e}");
    }
    outcome
}

async fn drive(
    page: &dyn SearchPage,
    url: &str,
    options: &ScrapeOptions,
) -> Result<Vec<Vulnerability>, ScrapeError> {
    info!("navigating to {url}");
    page.navigate(url, NAVIGATION_TIMEOUT)
        .await
        .map_err(|e| fatal(Stage::Navigate, e))?;

    match dismiss_consent_banner(page).await {
        ConsentOutcome::Dismissed => debug!("consent banner dismissed"),
        ConsentOutcome::NotDismissed => debug!("no consent banner to dismiss"),
    }

    if let Some(path) = &options.snapshot_path {
        let markup = page.content().await.map_err(|e| fatal(Stage::Snapshot, e))?;
        tokio::fs::write(path, markup)
            .await
            .map_err(|source| ScrapeError::Snapshot {
                path: path.clone(),
                source,
            })?;
        info!("wrote page snapshot to {}", path.display());
    }

    // The table is populated by the page's own pagination scripts after
    // load, with no completion signal to wait on; give them a fixed window.
    page.settle(SETTLE_DELAY)
        .await
        .map_err(|e| fatal(Stage::Settle, e))?;

    page.wait_for(ROW_SELECTOR, RESULTS_WAIT_TIMEOUT)
        .await
        .map_err(|e| fatal(Stage::AwaitResults, e))?;

    let markup = page.content().await.map_err(|e| fatal(Stage::Extract, e))?;
    let records = extract_records(&markup, options.limit)?;
    info!("extracted {} record(s)", records.len());
    Ok(records)
}

/// Best-effort OneTrust dismissal with its own short deadline.
async fn dismiss_consent_banner(page: &dyn SearchPage) -> ConsentOutcome {
    match page.click(CONSENT_SELECTOR, CONSENT_TIMEOUT).await {
        Ok(()) => ConsentOutcome::Dismissed,
        Err(e) => {
            debug!("consent banner not dismissed: {e}");
            ConsentOutcome::NotDismissed
        }
    }
}

fn fatal(stage: Stage, error: PageError) -> ScrapeError {
    match error {
        PageError::Timeout(limit) => ScrapeError::Timeout { stage, limit },
        PageError::Browser(source) => ScrapeError::Browser { stage, source },
    }
}
