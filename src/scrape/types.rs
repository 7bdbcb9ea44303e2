//! Record type, options, and tuning constants for the weekly scrape.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// CSS selector for the result rows of the rendered search table.
pub const ROW_SELECTOR: &str = "table tbody tr";

/// CSS selector for the advisory id link inside a row's header cell.
pub const ID_SELECTOR: &str = r#"th[scope="row"] a"#;

/// CSS selector for the OneTrust consent-accept control.
pub const CONSENT_SELECTOR: &str = "#onetrust-accept-btn-handler";

/// Deadline for initial navigation.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Deadline for locating and clicking the consent banner. Best effort.
pub const CONSENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Unconditional post-navigation delay so the page's own scripts can finish
/// populating the table. The page exposes no "rendering complete" signal.
pub const SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Deadline for the results table rows to exist.
pub const RESULTS_WAIT_TIMEOUT: Duration = Duration::from_secs(60);

/// One advisory row from the NVD results table.
///
/// Field values are the trimmed cell text in the source's own display
/// format; absent cells map to empty strings, never to an error. Records
/// are built once by the extractor, in row order, and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vulnerability {
    pub cve_id: String,
    pub summary: String,
    pub published: String,
    pub last_modified: String,
    pub cvss_score: String,
}

/// Knobs for a single scrape invocation.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    /// Keep only the first N records, applied after full extraction.
    pub limit: Option<usize>,
    /// Write the rendered markup here before parsing.
    pub snapshot_path: Option<PathBuf>,
}
