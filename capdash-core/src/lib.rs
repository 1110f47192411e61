//! CapDash Core — domain types, data acquisition, and comparison logic.
//!
//! This crate contains everything below the presentation boundary:
//! - Domain types (company records, price history, market-cap series,
//!   comparison results)
//! - The market-data provider trait and its Yahoo Finance implementation
//! - Ranking-page fetching and top-2 row extraction
//! - Pure analytics functions (percentage changes, crash-day scan,
//!   market-cap derivation, all-or-nothing delta display)
//! - The top-2 comparator with its fixed allocation threshold

pub mod analytics;
pub mod compare;
pub mod data;
pub mod domain;

// Types that cross the runner boundary must stay Send + Sync.
#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn domain_types_are_send_sync() {
        assert_send::<domain::CompanyRecord>();
        assert_sync::<domain::CompanyRecord>();
        assert_send::<domain::PriceHistory>();
        assert_sync::<domain::PriceHistory>();
        assert_send::<domain::MarketCapSeries>();
        assert_sync::<domain::MarketCapSeries>();
        assert_send::<domain::ComparisonResult>();
        assert_sync::<domain::ComparisonResult>();
    }

    #[test]
    fn analytics_types_are_send_sync() {
        assert_send::<analytics::CrashDay>();
        assert_sync::<analytics::CrashDay>();
        assert_send::<analytics::SeriesDisplay>();
        assert_sync::<analytics::SeriesDisplay>();
    }

    #[test]
    fn error_types_are_send_sync() {
        assert_send::<data::FetchError>();
        assert_sync::<data::FetchError>();
        assert_send::<data::ExtractionError>();
        assert_sync::<data::ExtractionError>();
    }
}
