//! Rendering of extracted records as text or JSON.

use anyhow::Result;
use chrono::NaiveDate;

use crate::query::formatted_date;
use crate::scrape::Vulnerability;

/// Header line naming the resolved window and total count.
pub fn render_header(start: NaiveDate, end: NaiveDate, total: usize) -> String {
    format!(
        "Vulnerabilities published between {} and {} (total {total}):",
        formatted_date(start),
        formatted_date(end)
    )
}

/// Human-readable report body. An empty set gets its own message rather
/// than an empty body.
pub fn render_text(vulns: &[Vulnerability]) -> String {
    if vulns.is_empty() {
        return "No vulnerabilities published this week.\n".to_string();
    }

    let mut out = String::new();
    for vuln in vulns {
        let score = if vuln.cvss_score.is_empty() {
            String::new()
        } else {
            format!(" | Score: {}", vuln.cvss_score)
        };
        out.push_str(&format!(
            "{} | Published: {}{score}\n",
            vuln.cve_id, vuln.published
        ));
        out.push_str(&format!("  {}\n", vuln.summary));
        out.push_str(&format!("  Last Modified: {}\n\n", vuln.last_modified));
    }
    out
}

/// Machine-readable dump of the record set.
pub fn render_json(vulns: &[Vulnerability]) -> Result<String> {
    Ok(serde_json::to_string_pretty(vulns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: &str) -> Vulnerability {
        Vulnerability {
            cve_id: "CVE-2024-0101".into(),
            summary: "Buffer overflow in the frobnicator.".into(),
            published: "03/11/2024".into(),
            last_modified: "03/12/2024".into(),
            cvss_score: score.into(),
        }
    }

    #[test]
    fn test_empty_set_renders_no_results_message() {
        assert_eq!(render_text(&[]), "No vulnerabilities published this week.\n");
    }

    #[test]
    fn test_record_lines_and_separator() {
        let text = render_text(&[record("9.8 CRITICAL")]);
        assert_eq!(
            text,
            "CVE-2024-0101 | Published: 03/11/2024 | Score: 9.8 CRITICAL\n\
             \x20 Buffer overflow in the frobnicator.\n\
             \x20 Last Modified: 03/12/2024\n\n"
        );
    }

    #[test]
    fn test_missing_score_omits_the_score_segment() {
        let text = render_text(&[record("")]);
        assert!(!text.contains("Score:"));
        assert!(text.starts_with("CVE-2024-0101 | Published: 03/11/2024\n"));
    }

    #[test]
    fn test_header_names_window_and_count() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(
            render_header(start, end, 42),
            "Vulnerabilities published between 03/11/2024 and 03/17/2024 (total 42):"
        );
    }

    #[test]
    fn test_json_dump_is_an_array_of_records() {
        let json = render_json(&[record("5.3 MEDIUM")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["cve_id"], "CVE-2024-0101");
        assert_eq!(parsed[0]["cvss_score"], "5.3 MEDIUM");
    }
}
