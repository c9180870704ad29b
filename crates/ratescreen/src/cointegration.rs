//! Engle-Granger screening of `gdp` against `rate`.
//!
//! The test runs on the levels, not on growth. Unlike stationarity, the
//! classification honors the caller's significance.

use ratescreen_data::{SeriesTable, columns};
use ratescreen_stats::{CriticalValues, EngleGranger};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::Result;

/// Outcome of the no-cointegration null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CointClass {
    /// Null rejected, the pair looks cointegrated
    #[serde(rename = "H0 rejected")]
    Rejected,
    /// Null not rejected
    #[serde(rename = "H0 not rejected")]
    NotRejected,
}

impl CointClass {
    /// Classify a p-value at `significance`.
    pub const fn classify(p_value: f64, significance: f64) -> Self {
        if p_value < significance {
            Self::Rejected
        } else {
            Self::NotRejected
        }
    }

    /// Report label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rejected => "H0 rejected",
            Self::NotRejected => "H0 not rejected",
        }
    }
}

impl fmt::Display for CointClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engle-Granger result for one label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CointOutcome {
    /// Residual ADF t-value
    pub statistic: f64,
    /// MacKinnon p-value
    pub p_value: f64,
    /// 1%, 5% and 10% critical values
    pub critical_values: CriticalValues,
    /// Classification at the requested significance
    pub classification: CointClass,
}

/// Test `gdp` and `rate` of a table for cointegration.
///
/// Rows with any missing value are dropped first.
///
/// # Errors
/// Fails when `gdp` or `rate` is absent, or when the test itself fails.
pub fn test_cointegration(table: &SeriesTable, significance: f64) -> Result<CointOutcome> {
    table.require_columns(&[columns::GDP, columns::RATE])?;
    let complete = table.complete_cases()?;

    let gdp: Vec<f64> = complete.float_column(columns::GDP)?.into_iter().flatten().collect();
    let rate: Vec<f64> = complete.float_column(columns::RATE)?.into_iter().flatten().collect();

    let result = EngleGranger::default().test(&gdp, &rate)?;
    let classification = CointClass::classify(result.p_value, significance);

    debug!(
        label = table.label(),
        significance,
        statistic = result.statistic,
        p_value = result.p_value,
        %classification,
        "cointegration"
    );

    Ok(CointOutcome {
        statistic: result.statistic,
        p_value: result.p_value,
        critical_values: result.critical_values,
        classification,
    })
}
