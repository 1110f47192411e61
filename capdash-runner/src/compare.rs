//! Top-companies comparator pipeline.
//!
//! Sequence: fetch ranking HTML → extract the top two rows → resolve each
//! company (history, share count, live cap) → derive cap series → per-company
//! display → comparison. Missing share counts and live caps degrade to
//! fallbacks; fetch and extraction failures abort the run.

use serde::{Deserialize, Serialize};

use capdash_core::analytics::{derive_market_cap_series, latest_with_change, SeriesDisplay};
use capdash_core::compare::compare_top_two;
use capdash_core::data::{extract_top_two, Lookback, MarketDataProvider, RankingScraper};
use capdash_core::domain::{CompanyRecord, ComparisonResult, MarketCapSeries};

use crate::PipelineError;

/// One company's panel: resolved record, delta display, and chart series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyPanel {
    pub record: CompanyRecord,
    /// Computed latest value + delta, or the signal to fall back to the
    /// scraped display text.
    pub display: SeriesDisplay,
    pub series: MarketCapSeries,
}

/// Everything the presentation layer needs for the comparator panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareReport {
    pub leader: CompanyPanel,
    pub runner_up: CompanyPanel,
    pub comparison: ComparisonResult,
}

/// Full pipeline: fetch the ranking page, then run on its HTML.
pub fn run_compare(
    scraper: &RankingScraper,
    provider: &dyn MarketDataProvider,
) -> Result<CompareReport, PipelineError> {
    let html = scraper.fetch()?;
    run_compare_on_html(&html, provider)
}

/// Pipeline body, separated from the fetch so tests can drive it with
/// fixture HTML.
pub fn run_compare_on_html(
    html: &str,
    provider: &dyn MarketDataProvider,
) -> Result<CompareReport, PipelineError> {
    let [first, second] = extract_top_two(html)?;

    let leader = resolve_company(provider, first)?;
    let runner_up = resolve_company(provider, second)?;

    let comparison = compare_top_two(leader.record.clone(), runner_up.record.clone());

    Ok(CompareReport {
        leader,
        runner_up,
        comparison,
    })
}

/// Resolve one company: 6-month history, share count, live cap.
///
/// The history fetch is the only hard failure here; a missing share count
/// yields an all-`None` series and a missing live cap leaves the record on
/// its scraped display text.
fn resolve_company(
    provider: &dyn MarketDataProvider,
    mut record: CompanyRecord,
) -> Result<CompanyPanel, PipelineError> {
    let history = provider.history(&record.ticker, Lookback::SixMonths)?;
    let shares = provider.shares_outstanding(&record.ticker);
    let series = derive_market_cap_series(&history, shares);

    record.live_market_cap = provider.current_market_cap(&record.ticker);

    let display = latest_with_change(&series.values());

    Ok(CompanyPanel {
        record,
        display,
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use capdash_core::data::FetchError;
    use capdash_core::domain::{Allocation, PriceHistory, PricePoint};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    struct StubProvider {
        closes: HashMap<String, Vec<f64>>,
        shares: HashMap<String, u64>,
        caps: HashMap<String, f64>,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                closes: HashMap::new(),
                shares: HashMap::new(),
                caps: HashMap::new(),
            }
        }

        fn with_closes(mut self, ticker: &str, closes: &[f64]) -> Self {
            self.closes.insert(ticker.to_string(), closes.to_vec());
            self
        }

        fn with_shares(mut self, ticker: &str, shares: u64) -> Self {
            self.shares.insert(ticker.to_string(), shares);
            self
        }

        fn with_cap(mut self, ticker: &str, cap: f64) -> Self {
            self.caps.insert(ticker.to_string(), cap);
            self
        }
    }

    impl MarketDataProvider for StubProvider {
        fn history(&self, ticker: &str, _lookback: Lookback) -> Result<PriceHistory, FetchError> {
            let closes = self
                .closes
                .get(ticker)
                .ok_or_else(|| FetchError::EmptyHistory { ticker: ticker.to_string() })?;
            let points = closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Duration::days(i as i64),
                    close,
                })
                .collect();
            Ok(PriceHistory { ticker: ticker.to_string(), points })
        }

        fn shares_outstanding(&self, ticker: &str) -> Option<u64> {
            self.shares.get(ticker).copied()
        }

        fn current_market_cap(&self, ticker: &str) -> Option<f64> {
            self.caps.get(ticker).copied()
        }
    }

    const RANKING_HTML: &str = r#"<html><table><tbody>
        <tr><td><div class="company-name">Apple</div>
            <div class="company-code">(AAPL)</div></td>
            <td class="td-right">$3.4 T</td></tr>
        <tr><td><div class="company-name">Microsoft</div>
            <div class="company-code">(MSFT)</div></td>
            <td class="td-right">$3.1 T</td></tr>
    </tbody></table></html>"#;

    #[test]
    fn full_pipeline_with_complete_data() {
        let provider = StubProvider::new()
            .with_closes("AAPL", &[100.0, 110.0])
            .with_shares("AAPL", 1_000)
            .with_cap("AAPL", 2000.0)
            .with_closes("MSFT", &[200.0, 190.0])
            .with_shares("MSFT", 500)
            .with_cap("MSFT", 1700.0);

        let report = run_compare_on_html(RANKING_HTML, &provider).unwrap();

        assert_eq!(report.leader.record.name, "Apple");
        assert_eq!(report.runner_up.record.name, "Microsoft");

        // Derived series: 100k → 110k, +10%.
        match report.leader.display {
            SeriesDisplay::Computed { latest, change_pct } => {
                assert_eq!(latest, 110_000.0);
                assert!((change_pct - 10.0).abs() < 1e-9);
            }
            SeriesDisplay::Unavailable => panic!("leader series should be complete"),
        }

        // Comparison runs on the authoritative caps, not the derived series.
        assert_eq!(report.comparison.absolute_diff, Some(300.0));
        assert_eq!(report.comparison.diff_percent, Some(15.0));
        assert_eq!(report.comparison.allocation, Some(Allocation::FullLeader));
    }

    #[test]
    fn missing_shares_degrades_to_fallback_display() {
        let provider = StubProvider::new()
            .with_closes("AAPL", &[100.0, 110.0])
            .with_shares("AAPL", 1_000)
            .with_cap("AAPL", 2000.0)
            .with_closes("MSFT", &[200.0, 190.0])
            // MSFT: no shares, no live cap.
            ;

        let report = run_compare_on_html(RANKING_HTML, &provider).unwrap();

        assert_eq!(report.runner_up.display, SeriesDisplay::Unavailable);
        assert_eq!(report.runner_up.record.fallback_display(), "$3.1 T");
        assert!(!report.runner_up.series.is_complete());
        assert_eq!(report.runner_up.series.points.len(), 2);

        // One missing cap: no diff, no allocation, no abort.
        assert_eq!(report.comparison.absolute_diff, None);
        assert_eq!(report.comparison.allocation, None);
    }

    #[test]
    fn failed_history_fetch_aborts_the_run() {
        let provider = StubProvider::new().with_closes("AAPL", &[100.0, 110.0]);
        // MSFT has no history at all.
        let err = run_compare_on_html(RANKING_HTML, &provider).unwrap_err();
        assert!(matches!(err, PipelineError::Fetch(FetchError::EmptyHistory { .. })));
    }

    #[test]
    fn rerun_on_identical_inputs_is_deterministic() {
        let provider = StubProvider::new()
            .with_closes("AAPL", &[100.0, 110.0])
            .with_shares("AAPL", 1_000)
            .with_cap("AAPL", 2000.0)
            .with_closes("MSFT", &[200.0, 190.0])
            .with_shares("MSFT", 500)
            .with_cap("MSFT", 1700.0);

        let first = run_compare_on_html(RANKING_HTML, &provider).unwrap();
        let second = run_compare_on_html(RANKING_HTML, &provider).unwrap();
        assert_eq!(first.comparison, second.comparison);
        assert_eq!(first.leader.series, second.leader.series);
    }
}
