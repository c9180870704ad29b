//! Pipeline configuration.

use ratescreen_data::DEFAULT_INDEX_COLUMN;
use serde::{Deserialize, Serialize};

use crate::differencing::DifferenceMethod;

/// Configuration for a [`Screen`](crate::Screen) run.
///
/// Missing fields fall back to [`Default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Name of the date column (default: "date")
    pub index_column: String,
    /// Largest lag, in both directions, for the lag correlations (default: 4)
    pub max_lag: usize,
    /// Significance for the cointegration classification (default: 0.25)
    pub coint_significance: f64,
    /// Significance handed to the stationarity tester (default: 0.05)
    pub stationarity_significance: f64,
    /// Substrings selecting series keys to difference (default: none)
    pub targets: Vec<String>,
    /// Differencing method, "percent" or "abs" (default: "percent")
    pub method: String,
    /// Rebuild the report after differencing (default: false)
    pub rerun_report: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            index_column: DEFAULT_INDEX_COLUMN.to_string(),
            max_lag: 4,
            coint_significance: 0.25,
            stationarity_significance: 0.05,
            targets: Vec::new(),
            method: DifferenceMethod::Percent.as_str().to_string(),
            rerun_report: false,
        }
    }
}

impl ScreenConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
