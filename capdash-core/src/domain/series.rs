//! Price and market-cap time series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One closing price on one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Ordered closing-price series for one ticker over a fixed trailing window.
///
/// Immutable once fetched within a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub ticker: String,
    pub points: Vec<PricePoint>,
}

impl PriceHistory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Last and second-to-last closes, when the series has at least 2 points.
    pub fn last_two(&self) -> Option<(PricePoint, PricePoint)> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        Some((self.points[n - 2], self.points[n - 1]))
    }
}

/// One derived market-cap value on one trading day.
///
/// `market_cap` is `None` for every point of a series whose share count is
/// unknown — there are no partially-derived series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapPoint {
    pub date: NaiveDate,
    pub market_cap: Option<f64>,
}

/// Market-cap series derived as `close × shares_outstanding` per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCapSeries {
    pub ticker: String,
    pub points: Vec<CapPoint>,
}

impl MarketCapSeries {
    /// True when every point carries a value.
    pub fn is_complete(&self) -> bool {
        !self.points.is_empty() && self.points.iter().all(|p| p.market_cap.is_some())
    }

    /// The raw value column, in point order.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.market_cap).collect()
    }
}
