//! Dashboard report assembly and artifact export.
//!
//! Two export formats:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: index price series and the two-company cap series for external
//!   charting tools
//!
//! Persisted JSON carries a `schema_version` field; versions newer than this
//! build supports are rejected on load.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use capdash_core::data::{MarketDataProvider, RankingScraper};
use capdash_core::domain::{MarketCapSeries, PriceHistory};

use crate::compare::{run_compare, CompareReport};
use crate::config::{DashboardConfig, PageConfig};
use crate::index::{run_index_snapshot, IndexReport};
use crate::PipelineError;

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete output of one dashboard pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub generated_on: NaiveDate,
    pub page: PageConfig,
    pub index: IndexReport,
    pub compare: CompareReport,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run both pipelines and assemble the report.
///
/// Each invocation re-fetches everything; nothing is shared across runs.
pub fn run_dashboard(
    config: &DashboardConfig,
    provider: &dyn MarketDataProvider,
    scraper: &RankingScraper,
    today: NaiveDate,
) -> Result<DashboardReport, PipelineError> {
    let index = run_index_snapshot(
        provider,
        &config.index_symbol,
        &config.volatility_symbol,
        today,
    )?;
    let compare = run_compare(scraper, provider)?;

    Ok(DashboardReport {
        schema_version: SCHEMA_VERSION,
        generated_on: today,
        page: config.page.clone(),
        index,
        compare,
    })
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `DashboardReport` to pretty JSON.
pub fn export_json(report: &DashboardReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize DashboardReport to JSON")
}

/// Deserialize a `DashboardReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<DashboardReport> {
    let report: DashboardReport =
        serde_json::from_str(json).context("failed to deserialize DashboardReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the index price series as CSV (date, close).
pub fn export_index_csv(series: &PriceHistory) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "close"])?;
    for p in &series.points {
        wtr.write_record([p.date.to_string(), format!("{:.6}", p.close)])?;
    }
    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Export both companies' cap series on a common date axis.
///
/// Columns: date, then one column per ticker. Dates missing from a series,
/// and points without a value, render as empty cells.
pub fn export_cap_csv(leader: &MarketCapSeries, runner_up: &MarketCapSeries) -> Result<String> {
    let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
    for p in leader.points.iter().chain(runner_up.points.iter()) {
        dates.insert(p.date);
    }

    let cell = |series: &MarketCapSeries, date: NaiveDate| -> String {
        series
            .points
            .iter()
            .find(|p| p.date == date)
            .and_then(|p| p.market_cap)
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default()
    };

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", leader.ticker.as_str(), runner_up.ticker.as_str()])?;
    for date in dates {
        wtr.write_record([
            date.to_string(),
            cell(leader, date),
            cell(runner_up, date),
        ])?;
    }
    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

// ─── Artifact directory ─────────────────────────────────────────────

/// Write report.json, index_series.csv, and cap_series.csv to a dated run
/// directory under `output_dir`. Returns the run directory path.
pub fn save_artifacts(report: &DashboardReport, output_dir: &Path) -> Result<PathBuf> {
    let run_dir = output_dir.join(format!(
        "capdash-{}",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create {}", run_dir.display()))?;

    std::fs::write(run_dir.join("report.json"), export_json(report)?)?;
    std::fs::write(
        run_dir.join("index_series.csv"),
        export_index_csv(&report.index.series)?,
    )?;
    std::fs::write(
        run_dir.join("cap_series.csv"),
        export_cap_csv(&report.compare.leader.series, &report.compare.runner_up.series)?,
    )?;

    Ok(run_dir)
}
