//! Deterministic extraction of the rendered results table.

use scraper::{ElementRef, Html, Selector};

use super::types::{Vulnerability, ID_SELECTOR, ROW_SELECTOR};
use crate::error::ScrapeError;

/// Parse the rendered page markup into one record per table row, in
/// document order.
///
/// The four data cells are positional and individually optional — a short
/// row yields empty strings for its missing fields. A row without a
/// readable advisory id fails the whole scrape: it means the page layout
/// drifted, and partial results would be misleading. The `limit` cap is
/// applied only after every row has been extracted, so truncation never
/// masks a structural failure in a later row.
pub fn extract_records(
    html: &str,
    limit: Option<usize>,
) -> Result<Vec<Vulnerability>, ScrapeError> {
    let row_sel = Selector::parse(ROW_SELECTOR).unwrap();
    let id_sel = Selector::parse(ID_SELECTOR).unwrap();
    let cell_sel = Selector::parse("td").unwrap();

    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for (index, row) in document.select(&row_sel).enumerate() {
        let cve_id = row
            .select(&id_sel)
            .next()
            .map(|a| cell_text(&a))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ScrapeError::Structure(format!("row {} has no advisory id link", index + 1))
            })?;

        let cells: Vec<String> = row.select(&cell_sel).map(|c| cell_text(&c)).collect();
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();

        records.push(Vulnerability {
            cve_id,
            summary: cell(0),
            published: cell(1),
            last_modified: cell(2),
            cvss_score: cell(3),
        });
    }

    if let Some(limit) = limit {
        records.truncate(limit);
    }
    Ok(records)
}

fn cell_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
