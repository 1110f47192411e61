//! Comparison outcome for the top two companies.

use serde::{Deserialize, Serialize};

use super::company::CompanyRecord;

/// Discrete allocation recommendation derived from the relative size gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Allocation {
    /// Hold 100% leader, liquidate runner-up (runner-up at least 10% smaller).
    FullLeader,
    /// Hold 50/50.
    SplitEven,
}

/// Result of comparing the rank-1 and rank-2 companies.
///
/// The diff fields and the allocation are `None` whenever the caps needed to
/// compute them are missing (or, for the allocation and percent, zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub leader: CompanyRecord,
    pub runner_up: CompanyRecord,
    /// `cap1 - cap2`, present only when both caps are known. Sign-preserved.
    pub absolute_diff: Option<f64>,
    /// `absolute_diff / cap1 * 100`, sign-preserved.
    pub diff_percent: Option<f64>,
    pub allocation: Option<Allocation>,
}
