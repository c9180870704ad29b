//! Stationarity screening with the augmented Dickey-Fuller test.
//!
//! The classification compares the p-value with [`STATIONARITY_THRESHOLD`].
//! The `significance` argument is accepted and recorded but does not move
//! the threshold.

use ratescreen_stats::{AdfConfig, AugmentedDickeyFuller, CriticalValues};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::Result;

/// p-value below which the unit-root null is rejected.
pub const STATIONARITY_THRESHOLD: f64 = 0.05;

/// Outcome of the unit-root null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationarityClass {
    /// Unit root rejected, the series looks stationary
    #[serde(rename = "H0 rejected")]
    Rejected,
    /// Unit root not rejected
    #[serde(rename = "h0 not rejected")]
    NotRejected,
}

impl StationarityClass {
    /// Classify a p-value.
    pub const fn from_p_value(p_value: f64) -> Self {
        if p_value < STATIONARITY_THRESHOLD {
            Self::Rejected
        } else {
            Self::NotRejected
        }
    }

    /// Report label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rejected => "H0 rejected",
            Self::NotRejected => "h0 not rejected",
        }
    }

    /// Whether the series looks stationary.
    pub const fn is_stationary(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

impl fmt::Display for StationarityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ADF result for one series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationarityOutcome {
    /// ADF t-value
    pub statistic: f64,
    /// MacKinnon p-value
    pub p_value: f64,
    /// Lagged differences selected by AIC
    pub used_lag: usize,
    /// Observations in the final regression
    pub nobs: usize,
    /// 1%, 5% and 10% critical values
    pub critical_values: CriticalValues,
    /// Best AIC
    pub ic_best: Option<f64>,
    /// Classification at [`STATIONARITY_THRESHOLD`]
    pub classification: StationarityClass,
}

/// Run the ADF test (constant, AIC lag selection) on a complete series.
///
/// # Errors
/// Propagates the test's errors, e.g. a series too short or constant.
pub fn test_stationarity(
    series: &[f64],
    label: &str,
    significance: f64,
) -> Result<StationarityOutcome> {
    let result = AugmentedDickeyFuller::new(AdfConfig::default()).test(series)?;
    let classification = StationarityClass::from_p_value(result.p_value);

    debug!(
        label,
        significance,
        statistic = result.statistic,
        p_value = result.p_value,
        used_lag = result.used_lag,
        nobs = result.nobs,
        %classification,
        "stationarity"
    );

    Ok(StationarityOutcome {
        statistic: result.statistic,
        p_value: result.p_value,
        used_lag: result.used_lag,
        nobs: result.nobs,
        critical_values: result.critical_values,
        ic_best: result.ic_best,
        classification,
    })
}
