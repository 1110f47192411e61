//! Data acquisition: market-data provider and ranking-page scraping.

pub mod html;
pub mod provider;
pub mod ranking;
pub mod yahoo;

pub use provider::{FetchError, Lookback, MarketDataProvider};
pub use ranking::{extract_top_two, ExtractionError, RankingScraper};
pub use yahoo::YahooProvider;
