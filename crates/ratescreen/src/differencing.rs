//! Differencing of non-stationary target series.
//!
//! A report entry is differenced when its `{label}-{column}` key contains one
//! of the target substrings and its p-value exceeds
//! [`DIFFERENCING_P_THRESHOLD`]. Differences look forward, like growth:
//!
//! - `abs`: `s[t] - s[t+1]`
//! - `percent`: `100 * (s[t+1] / s[t] - 1)`
//!
//! They are taken over the series' non-missing observations and written back
//! at those rows; the last observation and every missing row end up missing.

use ratescreen_data::PanelStore;
use tracing::{info, warn};

use crate::error::Result;
use crate::report::{SeriesKey, StationarityReport};

/// p-value above which a targeted series is differenced.
pub const DIFFERENCING_P_THRESHOLD: f64 = 0.25;

/// Differencing formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceMethod {
    /// `s[t] - s[t+1]`
    Abs,
    /// `100 * (s[t+1] / s[t] - 1)`
    Percent,
}

impl DifferenceMethod {
    /// Parse a method name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "abs" => Some(Self::Abs),
            "percent" => Some(Self::Percent),
            _ => None,
        }
    }

    /// Method name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Percent => "percent",
        }
    }

    /// Forward differences of a complete series; the last entry is `None`.
    pub fn apply(&self, series: &[f64]) -> Vec<Option<f64>> {
        let mut out: Vec<Option<f64>> = series
            .windows(2)
            .map(|w| match self {
                Self::Abs => Some(w[0] - w[1]),
                Self::Percent => Some(100.0 * (w[1] / w[0] - 1.0)),
            })
            .collect();
        if !series.is_empty() {
            out.push(None);
        }
        out
    }
}

/// Difference every targeted non-stationary series in place.
///
/// Targets are visited in order and, for each, the report in key order; a key
/// matched by two targets is differenced twice. Returns the keys overwritten,
/// in order. An unknown `method` changes nothing and returns no keys.
///
/// # Errors
/// Fails when a matched key names an unknown label or column.
pub fn difference_targets(
    store: &mut PanelStore,
    report: &StationarityReport,
    targets: &[String],
    method: &str,
) -> Result<Vec<SeriesKey>> {
    let Some(method) = DifferenceMethod::parse(method) else {
        warn!(method, "unsupported differencing method, tables left unchanged");
        return Ok(Vec::new());
    };

    let mut differenced = Vec::new();
    for target in targets {
        for entry in report.iter() {
            if !entry.key.to_string().contains(target.as_str())
                || entry.p_value <= DIFFERENCING_P_THRESHOLD
            {
                continue;
            }

            let table = store.get_mut(&entry.key.label)?;
            let values = table.float_column(&entry.key.column)?;

            let (rows, observed): (Vec<usize>, Vec<f64>) = values
                .iter()
                .enumerate()
                .filter_map(|(row, value)| value.map(|v| (row, v)))
                .unzip();

            let mut updated = vec![None; values.len()];
            for (row, diff) in rows.into_iter().zip(method.apply(&observed)) {
                updated[row] = diff;
            }
            table.set_float_column(&entry.key.column, updated)?;

            info!(
                series = %entry.key,
                p_value = entry.p_value,
                method = method.as_str(),
                "differenced"
            );
            differenced.push(entry.key.clone());
        }
    }

    Ok(differenced)
}
