//! Connectivity and selector-drift probe against the live search page.

use anyhow::Result;
use scraper::{Html, Selector};
use tracing::warn;

use crate::query::build_search_url;
use crate::renderer::chromium::ChromiumPage;
use crate::renderer::SearchPage;
use crate::scrape::types::{NAVIGATION_TIMEOUT, RESULTS_WAIT_TIMEOUT, ROW_SELECTOR};
use crate::week;

/// Navigate to the current week's results and report what rendered.
///
/// Useful when the fetch starts timing out: a page title with a zero row
/// count points at selector drift rather than connectivity.
pub async fn run() -> Result<()> {
    let (start, end) = week::current_week_range();
    let url = build_search_url(start, end);
    println!("Probing {url}");

    let page: Box<dyn SearchPage> = Box::new(ChromiumPage::launch().await?);
    let outcome = probe(page.as_ref(), url.as_str()).await;
    if let Err(e) = page.close().await {
        warn!("browser teardown reported: {e}");
    }

    let (title, rows) = outcome?;
    println!("Title:     {title}");
    println!("Row count: {rows}");
    Ok(())
}

async fn probe(page: &dyn SearchPage, url: &str) -> Result<(String, usize)> {
    page.navigate(url, NAVIGATION_TIMEOUT).await?;
    page.wait_for(ROW_SELECTOR, RESULTS_WAIT_TIMEOUT).await?;
    let markup = page.content().await?;

    let document = Html::parse_document(&markup);
    let title = document
        .select(&Selector::parse("title").unwrap())
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    let rows = document
        .select(&Selector::parse(ROW_SELECTOR).unwrap())
        .count();
    Ok((title, rows))
}
