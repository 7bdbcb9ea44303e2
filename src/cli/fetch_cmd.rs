//! Default command — fetch and print one week's advisories.

use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

use crate::present;
use crate::query::{build_search_url, formatted_date};
use crate::renderer::chromium::ChromiumPage;
use crate::scrape::{run_scrape, ScrapeOptions};
use crate::week;

/// Run the weekly fetch. Nothing is printed until the full record set is
/// in hand, so a failed scrape produces a diagnostic and no partial report.
pub async fn run(
    date: Option<NaiveDate>,
    limit: Option<usize>,
    json: bool,
    debug_html: Option<PathBuf>,
) -> Result<()> {
    let (start, end) = match date {
        Some(reference) => week::week_range(reference),
        None => week::current_week_range(),
    };
    let url = build_search_url(start, end);
    info!(
        "searching for advisories published {} through {}",
        formatted_date(start),
        formatted_date(end)
    );

    let page = ChromiumPage::launch().await?;
    let options = ScrapeOptions {
        limit,
        snapshot_path: debug_html,
    };
    let vulns = run_scrape(Box::new(page), url.as_str(), &options).await?;

    if json {
        println!("{}", present::render_json(&vulns)?);
    } else {
        println!("{}\n", present::render_header(start, end, vulns.len()));
        print!("{}", present::render_text(&vulns));
    }
    Ok(())
}
