//! Pure analytics functions — series in, scalars or derived series out.
//!
//! No dependencies on the data layer or the pipelines; everything here is
//! deterministic given its inputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CapPoint, MarketCapSeries, PriceHistory};

/// Percent change from `prev` to `current`; `None` when `prev` is zero.
pub fn pct_change(prev: f64, current: f64) -> Option<f64> {
    if prev == 0.0 {
        return None;
    }
    Some((current - prev) / prev * 100.0)
}

/// Close-to-close percentage changes; length is one less than the input.
pub fn daily_pct_changes(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| {
            if w[0] == 0.0 {
                0.0
            } else {
                (w[1] - w[0]) / w[0] * 100.0
            }
        })
        .collect()
}

/// A trading day whose close-to-close change fell at or below the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrashDay {
    pub date: NaiveDate,
    pub pct_change: f64,
    pub close: f64,
}

/// All days in the history with a change at or below `threshold_pct`.
///
/// The first point has no prior close and is never flagged.
pub fn crash_days(history: &PriceHistory, threshold_pct: f64) -> Vec<CrashDay> {
    let changes = daily_pct_changes(&history.closes());
    changes
        .iter()
        .enumerate()
        .filter(|(_, &pct)| pct <= threshold_pct)
        .map(|(i, &pct)| CrashDay {
            date: history.points[i + 1].date,
            pct_change: pct,
            close: history.points[i + 1].close,
        })
        .collect()
}

/// Calendar days elapsed from `date` to `today`.
pub fn days_since(date: NaiveDate, today: NaiveDate) -> i64 {
    (today - date).num_days()
}

/// Derive a market-cap series as `close × shares` per point.
///
/// With no share count the series keeps its dates but every value is `None` —
/// a market cap computed without a share count is meaningless, so partial
/// series are forbidden.
pub fn derive_market_cap_series(history: &PriceHistory, shares: Option<u64>) -> MarketCapSeries {
    let points = history
        .points
        .iter()
        .map(|p| CapPoint {
            date: p.date,
            market_cap: shares.map(|s| p.close * s as f64),
        })
        .collect();

    MarketCapSeries {
        ticker: history.ticker.clone(),
        points,
    }
}

/// Outcome of the last-value-plus-delta display computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SeriesDisplay {
    /// Last value and percent change from the second-to-last value.
    Computed { latest: f64, change_pct: f64 },
    /// Delta disabled; the caller falls back to the raw displayed text.
    Unavailable,
}

/// Last value and percent change for a series, all-or-nothing.
///
/// A single `None` anywhere disables the delta for the whole series, not just
/// at the missing index. Fewer than 2 points, or a zero second-to-last value,
/// also disables it.
pub fn latest_with_change(values: &[Option<f64>]) -> SeriesDisplay {
    if values.len() < 2 || values.iter().any(Option::is_none) {
        return SeriesDisplay::Unavailable;
    }

    let n = values.len();
    match (values[n - 2], values[n - 1]) {
        (Some(prev), Some(latest)) if prev != 0.0 => SeriesDisplay::Computed {
            latest,
            change_pct: (latest - prev) / prev * 100.0,
        },
        _ => SeriesDisplay::Unavailable,
    }
}
