//! Property tests for extractor and comparator invariants.
//!
//! Uses proptest to verify:
//! 1. Extraction order — well-formed tables always yield the first two rows
//!    in document order, tickers stripped of parentheses
//! 2. Comparator totality — never panics, and never emits an allocation when
//!    either cap is absent or zero
//! 3. Derivation — a known share count gives `close × shares` at every point

use proptest::prelude::*;

use capdash_core::analytics::derive_market_cap_series;
use capdash_core::compare::{compare_top_two, ALLOCATION_RATIO_THRESHOLD};
use capdash_core::data::extract_top_two;
use capdash_core::domain::{Allocation, CompanyRecord, PriceHistory, PricePoint};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,12}( [A-Z][a-z]{2,8})?"
}

fn arb_ticker() -> impl Strategy<Value = String> {
    "[A-Z]{1,5}"
}

fn arb_cap_text() -> impl Strategy<Value = String> {
    (1u32..9999, prop::bool::ANY).prop_map(|(n, trillions)| {
        if trillions {
            format!("${}.{} T", n / 100, n % 100)
        } else {
            format!("${n} B")
        }
    })
}

fn arb_cap() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        3 => (1.0e9..5.0e12_f64).prop_map(Some),
        1 => Just(None),
        1 => Just(Some(0.0)),
    ]
}

fn render_row(name: &str, ticker: &str, cap: &str) -> String {
    format!(
        r#"<tr><td><div class="company-name">{name}</div><div class="company-code">({ticker})</div></td><td class="td-right">{cap}</td></tr>"#
    )
}

// ── 1. Extraction order ──────────────────────────────────────────────

proptest! {
    /// Any table with ≥2 well-formed rows yields exactly the first two,
    /// in document order, with parentheses stripped from tickers.
    #[test]
    fn extractor_returns_first_two_rows(
        rows in prop::collection::vec((arb_name(), arb_ticker(), arb_cap_text()), 2..6)
    ) {
        let body: String = rows
            .iter()
            .map(|(n, t, c)| render_row(n, t, c))
            .collect();
        let html = format!("<html><table><tbody>{body}</tbody></table></html>");

        let [first, second] = extract_top_two(&html).unwrap();
        prop_assert_eq!(&first.name, &rows[0].0);
        prop_assert_eq!(&first.ticker, &rows[0].1);
        prop_assert_eq!(&first.displayed_market_cap_text, &rows[0].2);
        prop_assert_eq!(&second.name, &rows[1].0);
        prop_assert_eq!(&second.ticker, &rows[1].1);
        prop_assert!(!first.ticker.contains('('));
        prop_assert!(!first.ticker.contains(')'));
    }
}

// ── 2. Comparator totality ───────────────────────────────────────────

proptest! {
    /// The comparator never panics, and emits an allocation only when both
    /// caps are present and nonzero. When it does classify, the decision
    /// matches the ratio threshold.
    #[test]
    fn comparator_never_panics_and_guards_zero(cap1 in arb_cap(), cap2 in arb_cap()) {
        let leader = CompanyRecord {
            name: "A".into(),
            ticker: "AAA".into(),
            displayed_market_cap_text: "$1 T".into(),
            live_market_cap: cap1,
        };
        let runner_up = CompanyRecord {
            name: "B".into(),
            ticker: "BBB".into(),
            displayed_market_cap_text: "$1 T".into(),
            live_market_cap: cap2,
        };

        let result = compare_top_two(leader, runner_up);

        match (cap1, cap2) {
            (Some(c1), Some(c2)) if c1 != 0.0 && c2 != 0.0 => {
                let expected = if c2 / c1 <= ALLOCATION_RATIO_THRESHOLD {
                    Allocation::FullLeader
                } else {
                    Allocation::SplitEven
                };
                prop_assert_eq!(result.allocation, Some(expected));
                prop_assert_eq!(result.absolute_diff, Some(c1 - c2));
            }
            _ => {
                prop_assert_eq!(result.allocation, None);
            }
        }

        if cap1.is_none() || cap2.is_none() {
            prop_assert_eq!(result.absolute_diff, None);
            prop_assert_eq!(result.diff_percent, None);
        }
    }
}

// ── 3. Derivation ────────────────────────────────────────────────────

proptest! {
    /// With a share count, every derived point equals close × shares; without
    /// one, every point is None.
    #[test]
    fn derived_series_is_exact_or_entirely_absent(
        closes in prop::collection::vec(1.0..1000.0_f64, 1..50),
        shares in prop::option::of(1u64..10_000_000_000)
    ) {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                close,
            })
            .collect();
        let history = PriceHistory { ticker: "AAPL".into(), points };

        let series = derive_market_cap_series(&history, shares);
        prop_assert_eq!(series.points.len(), closes.len());

        match shares {
            Some(s) => {
                for (p, &close) in series.points.iter().zip(closes.iter()) {
                    prop_assert_eq!(p.market_cap, Some(close * s as f64));
                }
            }
            None => {
                prop_assert!(series.points.iter().all(|p| p.market_cap.is_none()));
            }
        }
    }
}
