//! Company record — one scraped ranking row plus its resolved live cap.

use serde::{Deserialize, Serialize};

/// One company from the ranking page.
///
/// Created once per scrape. `live_market_cap` is filled in by the resolver
/// afterwards; it stays `None` when the provider lookup fails, in which case
/// the presentation layer falls back to `displayed_market_cap_text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    /// Non-empty; uniquely keys the market-data lookup.
    pub ticker: String,
    /// The market-cap text exactly as displayed on the ranking page.
    pub displayed_market_cap_text: String,
    /// Authoritative current market cap from the data provider, in USD.
    pub live_market_cap: Option<f64>,
}

impl CompanyRecord {
    pub fn new(name: String, ticker: String, displayed_market_cap_text: String) -> Self {
        Self {
            name,
            ticker,
            displayed_market_cap_text,
            live_market_cap: None,
        }
    }

    /// The scraped text shown when no computed value is available.
    pub fn fallback_display(&self) -> &str {
        &self.displayed_market_cap_text
    }
}
