//! Error taxonomy for the scrape pipeline.
//!
//! Every fatal condition unwinds through the driver's teardown boundary and
//! surfaces to the CLI as a single diagnostic line. Consent-banner failures
//! are deliberately absent here — they are an expected outcome, not an
//! error (see `scrape::driver::ConsentOutcome`).

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Pipeline stage names, carried inside errors so every diagnostic
/// identifies where the scrape failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Navigate,
    ConsentBanner,
    Snapshot,
    Settle,
    AwaitResults,
    Extract,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Navigate => "navigating to the search page",
            Stage::ConsentBanner => "dismissing the consent banner",
            Stage::Snapshot => "capturing the page snapshot",
            Stage::Settle => "waiting for client-side rendering",
            Stage::AwaitResults => "waiting for the results table",
            Stage::Extract => "reading the rendered page",
        };
        f.write_str(name)
    }
}

/// A fatal scrape failure. One invocation is one attempt: none of these
/// are retried.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A bounded stage exceeded its deadline.
    #[error("timed out while {stage} (limit {}s)", limit.as_secs())]
    Timeout { stage: Stage, limit: Duration },

    /// A required field could not be read from a results row. The page
    /// layout no longer matches expectations; partial results would be
    /// misleading, so the whole scrape fails.
    #[error("results table layout changed: {0}")]
    Structure(String),

    /// Writing the raw-markup snapshot failed.
    #[error("failed to write page snapshot to {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The browser failed outside of a deadline.
    #[error("browser error while {stage}: {source}")]
    Browser {
        stage: Stage,
        source: anyhow::Error,
    },
}
