//! Ranking-page fetch and top-2 extraction.
//!
//! One GET against the fixed ranking URL, then a fixed-selector walk over the
//! table body: company name, ticker (parentheses stripped), and the displayed
//! market-cap text, for the first two rows in document order.

use std::time::Duration;

use thiserror::Error;

use super::html::{class_cell_text, next_tag_block_ci, slice_between_ci};
use super::provider::FetchError;
use crate::domain::CompanyRecord;

/// Ranking page listing companies by market capitalization.
pub const DEFAULT_RANKING_URL: &str = "https://companiesmarketcap.com/";

/// The site serves an error page to non-browser agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Failure to extract two valid rows from the ranking page.
///
/// Not recoverable: downstream logic assumes exactly two entries, so there is
/// no meaningful fallback.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("ranking page yielded {found} usable rows (need 2)")]
    TooFewRows { found: usize },

    #[error("ranking row {row}: missing '{field}' cell")]
    MissingField { row: usize, field: &'static str },
}

/// Fetches the ranking page HTML.
pub struct RankingScraper {
    client: reqwest::blocking::Client,
    url: String,
}

impl RankingScraper {
    pub fn new(url: &str, user_agent: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            url: url.to_string(),
        }
    }

    /// Single GET; any transport or non-2xx failure is a [`FetchError`].
    pub fn fetch(&self) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        resp.text().map_err(|e| FetchError::Network(e.to_string()))
    }
}

impl Default for RankingScraper {
    fn default() -> Self {
        Self::new(DEFAULT_RANKING_URL, DEFAULT_USER_AGENT)
    }
}

/// Extract the first two ranking rows, in document order (index 0 = largest).
///
/// Each row must carry all three cells (`company-name`, `company-code`,
/// `td-right`); a missing cell inside the first two rows is an error, as is a
/// table with fewer than two rows.
pub fn extract_top_two(html: &str) -> Result<[CompanyRecord; 2], ExtractionError> {
    let tbody = slice_between_ci(html, "<tbody", "</tbody")
        .ok_or(ExtractionError::TooFewRows { found: 0 })?;

    let (r1_start, r1_end) = next_tag_block_ci(tbody, "<tr", "</tr>", 0)
        .ok_or(ExtractionError::TooFewRows { found: 0 })?;
    let (r2_start, r2_end) = next_tag_block_ci(tbody, "<tr", "</tr>", r1_end)
        .ok_or(ExtractionError::TooFewRows { found: 1 })?;

    let first = parse_row(&tbody[r1_start..r1_end], 0)?;
    let second = parse_row(&tbody[r2_start..r2_end], 1)?;
    Ok([first, second])
}

fn parse_row(row: &str, index: usize) -> Result<CompanyRecord, ExtractionError> {
    let name = class_cell_text(row, "company-name").ok_or(ExtractionError::MissingField {
        row: index,
        field: "company-name",
    })?;

    let ticker_raw = class_cell_text(row, "company-code").ok_or(ExtractionError::MissingField {
        row: index,
        field: "company-code",
    })?;
    let ticker = ticker_raw.replace(['(', ')'], "").trim().to_string();

    let cap_text = class_cell_text(row, "td-right").ok_or(ExtractionError::MissingField {
        row: index,
        field: "td-right",
    })?;

    if name.is_empty() || ticker.is_empty() || cap_text.is_empty() {
        return Err(ExtractionError::MissingField {
            row: index,
            field: if name.is_empty() {
                "company-name"
            } else if ticker.is_empty() {
                "company-code"
            } else {
                "td-right"
            },
        });
    }

    Ok(CompanyRecord::new(name, ticker, cap_text))
}
