//! Top-2 comparison and allocation classification.

use crate::domain::{Allocation, CompanyRecord, ComparisonResult};

/// Policy constant: the runner-up must be at least 10% smaller than the
/// leader for a full-leader allocation. Fixed, not configurable.
pub const ALLOCATION_RATIO_THRESHOLD: f64 = 0.9;

/// Compare the rank-1 and rank-2 companies by their live market caps.
///
/// - `absolute_diff` requires both caps; sign-preserved.
/// - `diff_percent` additionally requires a nonzero leader cap. A zero
///   difference reports `Some(0.0)` — a real value, not a missing one.
/// - Classification requires both caps present and nonzero; ratio at or below
///   the threshold means full-leader, otherwise split-even. A zero cap skips
///   classification entirely rather than dividing by zero.
pub fn compare_top_two(leader: CompanyRecord, runner_up: CompanyRecord) -> ComparisonResult {
    let cap1 = leader.live_market_cap;
    let cap2 = runner_up.live_market_cap;

    let absolute_diff = match (cap1, cap2) {
        (Some(a), Some(b)) => Some(a - b),
        _ => None,
    };

    let diff_percent = match (absolute_diff, cap1) {
        (Some(diff), Some(c1)) if c1 != 0.0 => Some(diff / c1 * 100.0),
        _ => None,
    };

    let allocation = match (cap1, cap2) {
        (Some(c1), Some(c2)) if c1 != 0.0 && c2 != 0.0 => {
            if c2 / c1 <= ALLOCATION_RATIO_THRESHOLD {
                Some(Allocation::FullLeader)
            } else {
                Some(Allocation::SplitEven)
            }
        }
        _ => None,
    };

    ComparisonResult {
        leader,
        runner_up,
        absolute_diff,
        diff_percent,
        allocation,
    }
}
