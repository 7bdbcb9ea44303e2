//! NVD advanced-search URL construction.

use chrono::NaiveDate;
use url::Url;

/// Base endpoint for the NVD vulnerability search UI.
pub const SEARCH_URL: &str = "https://nvd.nist.gov/vuln/search/results";

/// Format a date the way the NVD query parameters expect it (`MM/DD/YYYY`,
/// zero-padded, locale-independent).
pub fn formatted_date(value: NaiveDate) -> String {
    value.format("%m/%d/%Y").to_string()
}

/// Assemble an advanced-search URL filtering on publication dates.
///
/// The parameter set is load-bearing: the endpoint only honors the
/// publication-date filter for `form_type=Advanced` with
/// `results_type=overview`. The query is set as a whole rather than through
/// the pair serializer, which would percent-encode the slashes the endpoint
/// expects literally.
pub fn build_search_url(start: NaiveDate, end: NaiveDate) -> Url {
    let mut url = Url::parse(SEARCH_URL).expect("static base URL parses");
    url.set_query(Some(&format!(
        "form_type=Advanced&results_type=overview&search_type=all\
         &pub_date_start_date={}&pub_date_end_date={}",
        formatted_date(start),
        formatted_date(end)
    )));
    url
}
