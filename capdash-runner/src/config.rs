//! Dashboard configuration.
//!
//! Defaults cover everything; a TOML file can override the external URLs,
//! symbols, and page metadata. The lookback windows and the policy thresholds
//! (allocation ratio, crash threshold, volatility cutoff) are constants in
//! their owning modules, not configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use capdash_core::data::ranking::{DEFAULT_RANKING_URL, DEFAULT_USER_AGENT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Page metadata handed to the presentation layer at startup.
///
/// The original process-wide page setup modeled as an explicit object: the
/// renderer receives it with the report instead of mutating global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub wide_layout: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Global Market Cap Dashboard".into(),
            wide_layout: true,
        }
    }
}

/// Full dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Ranking page to scrape for the top-companies list.
    pub ranking_url: String,
    /// Agent sent with the ranking request; the site rejects non-browser agents.
    pub user_agent: String,
    /// Market index symbol for the snapshot pipeline.
    pub index_symbol: String,
    /// Volatility index symbol.
    pub volatility_symbol: String,
    pub page: PageConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ranking_url: DEFAULT_RANKING_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            index_symbol: "^IXIC".into(),
            volatility_symbol: "^VIX".into(),
            page: PageConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from a TOML file; absent keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
