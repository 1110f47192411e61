//! Index snapshot pipeline.
//!
//! One pass: 6-month index history, 2-day volatility read, day-over-day
//! changes, crash-day scan, and days elapsed since the last crash day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use capdash_core::analytics::{crash_days, days_since, pct_change, CrashDay};
use capdash_core::data::{Lookback, MarketDataProvider};
use capdash_core::domain::{PriceHistory, PricePoint};

use crate::PipelineError;

/// Close-to-close drop at or below this marks a crash day (and, on the
/// current day, the sell alert). Policy constant.
pub const CRASH_THRESHOLD_PCT: f64 = -3.0;

/// Volatility at or below this reads as a favorable entry. Policy constant.
pub const VOLATILITY_CALM_MAX: f64 = 15.0;

/// Everything the presentation layer needs for the index panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexReport {
    pub index_symbol: String,
    pub index_current: f64,
    /// Day-over-day change; `None` when the previous close is zero.
    pub index_change_pct: Option<f64>,
    pub volatility_symbol: String,
    pub volatility_current: f64,
    /// Day-over-day change; `None` when the previous close is zero.
    pub volatility_change_pct: Option<f64>,
    /// Volatility at or below the calm cutoff.
    pub volatility_calm: bool,
    /// Current day-over-day change breached the crash threshold.
    pub sell_alert: bool,
    /// All crash days in the window, oldest first.
    pub crash_days: Vec<CrashDay>,
    pub last_crash: Option<CrashDay>,
    /// Calendar days from the last crash day to `today`; `None` when the
    /// window contains no crash day.
    pub days_since_last_crash: Option<i64>,
    /// Full 6-month index series for charting.
    pub series: PriceHistory,
}

/// Run the index snapshot pipeline.
///
/// `today` is passed in rather than read from the clock so identical inputs
/// yield identical reports.
pub fn run_index_snapshot(
    provider: &dyn MarketDataProvider,
    index_symbol: &str,
    volatility_symbol: &str,
    today: NaiveDate,
) -> Result<IndexReport, PipelineError> {
    let index_history = provider.history(index_symbol, Lookback::SixMonths)?;
    let (index_prev, index_last) = last_two(&index_history)?;
    let index_change_pct = pct_change(index_prev.close, index_last.close);

    let vol_history = provider.history(volatility_symbol, Lookback::TwoDays)?;
    let (vol_prev, vol_last) = last_two(&vol_history)?;
    let volatility_change_pct = pct_change(vol_prev.close, vol_last.close);

    let crashes = crash_days(&index_history, CRASH_THRESHOLD_PCT);
    let last_crash = crashes.last().copied();

    Ok(IndexReport {
        index_symbol: index_symbol.to_string(),
        index_current: index_last.close,
        index_change_pct,
        volatility_symbol: volatility_symbol.to_string(),
        volatility_current: vol_last.close,
        volatility_change_pct,
        volatility_calm: vol_last.close <= VOLATILITY_CALM_MAX,
        sell_alert: index_change_pct.is_some_and(|c| c <= CRASH_THRESHOLD_PCT),
        days_since_last_crash: last_crash.map(|c| days_since(c.date, today)),
        last_crash,
        crash_days: crashes,
        series: index_history,
    })
}

fn last_two(history: &PriceHistory) -> Result<(PricePoint, PricePoint), PipelineError> {
    history
        .last_two()
        .ok_or_else(|| PipelineError::InsufficientHistory {
            symbol: history.ticker.clone(),
            points: history.len(),
        })
}
