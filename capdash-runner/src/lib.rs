//! CapDash Runner — pipeline orchestration over `capdash-core`.
//!
//! This crate builds on the core to provide:
//! - Dashboard configuration (defaults + optional TOML file)
//! - The index snapshot pipeline (index + volatility, crash-day scan)
//! - The top-companies comparator pipeline (scrape → resolve → compare)
//! - Dashboard report assembly and JSON/CSV artifact export

pub mod compare;
pub mod config;
pub mod index;
pub mod report;

pub use compare::{run_compare, run_compare_on_html, CompanyPanel, CompareReport};
pub use config::{ConfigError, DashboardConfig, PageConfig};
pub use index::{run_index_snapshot, IndexReport};
pub use report::{
    export_cap_csv, export_index_csv, export_json, import_json, run_dashboard, save_artifacts,
    DashboardReport, SCHEMA_VERSION,
};

use capdash_core::data::{ExtractionError, FetchError};
use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// Everything recoverable (missing share counts, missing live caps) is
/// handled inside the pipelines by substituting fallbacks; what reaches this
/// enum ends the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("ranking extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("insufficient history for '{symbol}': {points} points (need at least 2)")]
    InsufficientHistory { symbol: String, points: usize },
}
