//! Yahoo Finance data provider.
//!
//! Fetches daily closes from the v8 chart API and share count / current
//! market cap from the v10 quoteSummary API. One request per operation, no
//! retries, no caching — every run re-fetches.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; response parsing is defensive about missing arrays and null rows.

use std::time::Duration;

use serde::Deserialize;

use super::provider::{FetchError, Lookback, MarketDataProvider};
use crate::domain::{PriceHistory, PricePoint};

/// Browser-like agent; both Yahoo endpoints reject the default reqwest agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ─── v8 chart API response ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

// ─── v10 quoteSummary response ──────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<SummaryData>>,
}

#[derive(Debug, Deserialize)]
struct SummaryData {
    #[serde(rename = "defaultKeyStatistics")]
    default_key_statistics: Option<KeyStatistics>,
    price: Option<PriceModule>,
}

#[derive(Debug, Deserialize)]
struct KeyStatistics {
    #[serde(rename = "sharesOutstanding")]
    shares_outstanding: Option<RawU64>,
}

#[derive(Debug, Deserialize)]
struct PriceModule {
    #[serde(rename = "marketCap")]
    market_cap: Option<RawF64>,
}

#[derive(Debug, Deserialize)]
struct RawU64 {
    raw: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawF64 {
    raw: Option<f64>,
}

// ─── Provider ───────────────────────────────────────────────────────

/// Yahoo Finance implementation of [`MarketDataProvider`].
pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    fn chart_url(ticker: &str, lookback: Lookback) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{ticker}\
             ?range={}&interval=1d",
            lookback.range_param()
        )
    }

    fn summary_url(ticker: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{ticker}\
             ?modules=defaultKeyStatistics%2Cprice"
        )
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.json::<T>()
            .map_err(|e| FetchError::Format(format!("{url}: {e}")))
    }

    /// Parse the chart API response into (date, close) points.
    ///
    /// Rows with a null close (holidays, half-days) are skipped; an empty
    /// result after skipping is an error.
    fn parse_chart(ticker: &str, resp: ChartResponse) -> Result<PriceHistory, FetchError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                FetchError::Format(format!("{}: {}", err.code, err.description))
            } else {
                FetchError::Format("empty chart result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Format("chart result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| FetchError::Format("no timestamps".into()))?;

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Format("no quote data".into()))?;

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let Some(close) = quote.close.get(i).copied().flatten() else {
                continue;
            };
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| FetchError::Format(format!("invalid timestamp: {ts}")))?;
            points.push(PricePoint { date, close });
        }

        if points.is_empty() {
            return Err(FetchError::EmptyHistory {
                ticker: ticker.to_string(),
            });
        }

        Ok(PriceHistory {
            ticker: ticker.to_string(),
            points,
        })
    }

    fn fetch_summary(&self, ticker: &str) -> Result<Option<SummaryData>, FetchError> {
        let resp: SummaryResponse = self.get_json(&Self::summary_url(ticker))?;
        Ok(resp
            .quote_summary
            .result
            .and_then(|r| r.into_iter().next()))
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataProvider for YahooProvider {
    fn history(&self, ticker: &str, lookback: Lookback) -> Result<PriceHistory, FetchError> {
        let resp: ChartResponse = self.get_json(&Self::chart_url(ticker, lookback))?;
        Self::parse_chart(ticker, resp)
    }

    fn shares_outstanding(&self, ticker: &str) -> Option<u64> {
        // Swallow-and-continue: any failure here degrades to None.
        self.fetch_summary(ticker)
            .ok()
            .flatten()
            .and_then(|s| s.default_key_statistics)
            .and_then(|k| k.shares_outstanding)
            .and_then(|v| v.raw)
    }

    fn current_market_cap(&self, ticker: &str) -> Option<f64> {
        self.fetch_summary(ticker)
            .ok()
            .flatten()
            .and_then(|s| s.price)
            .and_then(|p| p.market_cap)
            .and_then(|v| v.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_url_carries_range_and_interval() {
        let url = YahooProvider::chart_url("^IXIC", Lookback::SixMonths);
        assert!(url.contains("/v8/finance/chart/^IXIC"));
        assert!(url.contains("range=6mo"));
        assert!(url.contains("interval=1d"));
    }

    #[test]
    fn parse_chart_skips_null_closes() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000, 1704326400],
                    "indicators": {
                        "quote": [{ "close": [100.0, null, 102.0] }]
                    }
                }],
                "error": null
            }
        }"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        let hist = YahooProvider::parse_chart("AAPL", resp).unwrap();
        assert_eq!(hist.len(), 2);
        assert_eq!(hist.points[0].close, 100.0);
        assert_eq!(hist.points[1].close, 102.0);
    }

    #[test]
    fn parse_chart_surfaces_provider_error() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found" }
            }
        }"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        let err = YahooProvider::parse_chart("NOPE", resp).unwrap_err();
        assert!(matches!(err, FetchError::Format(_)));
    }

    #[test]
    fn parse_chart_all_null_is_empty_history() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704153600],
                    "indicators": { "quote": [{ "close": [null] }] }
                }],
                "error": null
            }
        }"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        let err = YahooProvider::parse_chart("AAPL", resp).unwrap_err();
        assert!(matches!(err, FetchError::EmptyHistory { .. }));
    }

    #[test]
    fn summary_parses_shares_and_cap() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "defaultKeyStatistics": {
                        "sharesOutstanding": { "raw": 15500000000, "fmt": "15.5B" }
                    },
                    "price": {
                        "marketCap": { "raw": 3400000000000.0, "fmt": "3.4T" }
                    }
                }]
            }
        }"#;
        let resp: SummaryResponse = serde_json::from_str(json).unwrap();
        let data = resp.quote_summary.result.unwrap().into_iter().next().unwrap();
        assert_eq!(
            data.default_key_statistics
                .unwrap()
                .shares_outstanding
                .unwrap()
                .raw,
            Some(15_500_000_000)
        );
        assert_eq!(
            data.price.unwrap().market_cap.unwrap().raw,
            Some(3.4e12)
        );
    }
}
