//! Market-data provider trait and structured fetch errors.
//!
//! The MarketDataProvider trait abstracts over the data source (Yahoo Finance
//! in production) so the pipelines can be driven by a mock in tests.

use thiserror::Error;

use crate::domain::PriceHistory;

/// Fixed trailing windows used by the pipelines.
///
/// Six months for charted series, two days for the delta-only volatility read.
/// There is deliberately no open-ended variant: the windows are part of the
/// product, not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    SixMonths,
    TwoDays,
}

impl Lookback {
    /// The provider-side range parameter for this window.
    pub fn range_param(self) -> &'static str {
        match self {
            Lookback::SixMonths => "6mo",
            Lookback::TwoDays => "2d",
        }
    }
}

/// Transport and response-shape failures from a data source.
///
/// These abort the pipeline; the recoverable "field missing" cases never
/// surface as errors (the provider methods return `Option` instead).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("response format changed: {0}")]
    Format(String),

    #[error("no usable history for '{ticker}'")]
    EmptyHistory { ticker: String },
}

/// Per-ticker market-data operations.
///
/// A failed history fetch is an error; a failed shares-outstanding or live
/// market-cap lookup degrades to `None` (swallow-and-continue policy) — one
/// missing field must not abort the whole run.
pub trait MarketDataProvider: Send + Sync {
    /// Closing-price history over a fixed trailing window.
    fn history(&self, ticker: &str, lookback: Lookback) -> Result<PriceHistory, FetchError>;

    /// Current share count, if the provider knows it.
    fn shares_outstanding(&self, ticker: &str) -> Option<u64>;

    /// Authoritative current market cap in USD, if the provider knows it.
    ///
    /// May differ from `close × shares_outstanding` due to reporting lag;
    /// callers retain both rather than reconciling them.
    fn current_market_cap(&self, ticker: &str) -> Option<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_params_match_provider_vocabulary() {
        assert_eq!(Lookback::SixMonths.range_param(), "6mo");
        assert_eq!(Lookback::TwoDays.range_param(), "2d");
    }
}
