//! Report aggregation.
//!
//! A report pass tests every label's `(gdp, rate)` pair for cointegration and
//! every flattened `{label}-dgdp` / `{label}-rate` series for stationarity.
//! Both reports are rendered; only the stationarity report is returned.

use polars::prelude::*;
use ratescreen_data::{PanelStore, columns};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::cointegration::{CointClass, test_cointegration};
use crate::error::Result;
use crate::stationarity::{StationarityClass, test_stationarity};

/// Significance used for the cointegration classification in a report pass.
pub const REPORT_COINT_SIGNIFICANCE: f64 = 0.25;

/// Significance handed to the stationarity tester in a report pass.
pub const REPORT_STATIONARITY_SIGNIFICANCE: f64 = 0.05;

/// One univariate series of the panel, displayed as `{label}-{column}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey {
    /// Owning label
    pub label: String,
    /// Column within the label's table
    pub column: String,
}

impl SeriesKey {
    /// Create a key.
    pub fn new(label: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.label, self.column)
    }
}

/// Stationarity result for one series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationarityEntry {
    /// Series tested
    pub key: SeriesKey,
    /// Classification
    pub classification: StationarityClass,
    /// ADF t-value
    pub statistic: f64,
    /// MacKinnon p-value
    pub p_value: f64,
    /// Lagged differences used
    pub used_lag: usize,
    /// Observations in the final regression
    pub nobs: usize,
}

/// Stationarity results keyed by series, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationarityReport {
    entries: Vec<StationarityEntry>,
}

impl StationarityReport {
    /// Empty report.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an entry, replacing any entry with the same key in place.
    pub fn push(&mut self, entry: StationarityEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Entry for `key`.
    pub fn get(&self, key: &SeriesKey) -> Option<&StationarityEntry> {
        self.entries.iter().find(|e| &e.key == key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &SeriesKey> {
        self.entries.iter().map(|e| &e.key)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StationarityEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every field as a table.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        df!(
            "series" => self.entries.iter().map(|e| e.key.to_string()).collect::<Vec<_>>(),
            "result" => self.entries.iter().map(|e| e.classification.as_str()).collect::<Vec<_>>(),
            "statistic" => self.entries.iter().map(|e| e.statistic).collect::<Vec<_>>(),
            "p_value" => self.entries.iter().map(|e| e.p_value).collect::<Vec<_>>(),
            "used_lag" => self.entries.iter().map(|e| e.used_lag as u64).collect::<Vec<_>>(),
            "nobs" => self.entries.iter().map(|e| e.nobs as u64).collect::<Vec<_>>(),
        )
    }

    /// Display table: series, statistic and p-value.
    pub fn display_frame(&self) -> PolarsResult<DataFrame> {
        self.to_frame()?.select(["series", "statistic", "p_value"])
    }
}

/// Cointegration result for one label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CointEntry {
    /// Label tested
    pub label: String,
    /// Classification
    pub classification: CointClass,
    /// Residual ADF t-value
    pub statistic: f64,
    /// 1% critical value
    pub critical_value_1pct: f64,
    /// MacKinnon p-value
    pub p_value: f64,
}

/// Cointegration results keyed by label, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CointReport {
    entries: Vec<CointEntry>,
}

impl CointReport {
    /// Empty report.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an entry, replacing any entry with the same label in place.
    pub fn push(&mut self, entry: CointEntry) {
        match self.entries.iter_mut().find(|e| e.label == entry.label) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Entry for `label`.
    pub fn get(&self, label: &str) -> Option<&CointEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CointEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every field as a table.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        df!(
            "label" => self.entries.iter().map(|e| e.label.as_str()).collect::<Vec<_>>(),
            "result" => self.entries.iter().map(|e| e.classification.as_str()).collect::<Vec<_>>(),
            "statistic" => self.entries.iter().map(|e| e.statistic).collect::<Vec<_>>(),
            "critical_value_1pct" => self.entries.iter().map(|e| e.critical_value_1pct).collect::<Vec<_>>(),
            "p_value" => self.entries.iter().map(|e| e.p_value).collect::<Vec<_>>(),
        )
    }

    /// Display table: everything but the critical value.
    pub fn display_frame(&self) -> PolarsResult<DataFrame> {
        self.to_frame()?.select(["label", "result", "statistic", "p_value"])
    }
}

/// Sink for report tables.
pub trait ReportRenderer {
    /// Render one titled table.
    fn render(&mut self, title: &str, table: &DataFrame);
}

/// Logs each table at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRenderer;

impl ReportRenderer for TracingRenderer {
    fn render(&mut self, title: &str, table: &DataFrame) {
        info!(title, "\n{table}");
    }
}

/// Discards every table.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl ReportRenderer for NullRenderer {
    fn render(&mut self, _title: &str, _table: &DataFrame) {}
}

/// Complete-case `dgdp` and `rate` series of every label, keyed
/// `{label}-dgdp`, `{label}-rate`.
///
/// # Errors
/// Fails on an unknown label or a table lacking `dgdp` or `rate`.
pub fn flatten_series(
    store: &PanelStore,
    labels: &[String],
) -> Result<Vec<(SeriesKey, Vec<f64>)>> {
    let mut flattened = Vec::with_capacity(2 * labels.len());

    for label in labels {
        let table = store.get(label)?;
        table.require_columns(&[columns::GROWTH, columns::RATE])?;
        let complete = table.complete_cases()?;

        for column in [columns::GROWTH, columns::RATE] {
            let values: Vec<f64> = complete.float_column(column)?.into_iter().flatten().collect();
            flattened.push((SeriesKey::new(label.as_str(), column), values));
        }
    }

    Ok(flattened)
}

/// Build the report with the default significances (0.25 and 0.05).
///
/// # Errors
/// See [`build_report_with`].
pub fn build_report<R>(
    store: &PanelStore,
    labels: &[String],
    renderer: &mut R,
) -> Result<StationarityReport>
where
    R: ReportRenderer + ?Sized,
{
    build_report_with(
        store,
        labels,
        REPORT_COINT_SIGNIFICANCE,
        REPORT_STATIONARITY_SIGNIFICANCE,
        renderer,
    )
}

/// Test every label for cointegration, then every flattened series for
/// stationarity, render both reports and return the stationarity report.
///
/// # Errors
/// The first failing test aborts the whole pass.
pub fn build_report_with<R>(
    store: &PanelStore,
    labels: &[String],
    coint_significance: f64,
    stationarity_significance: f64,
    renderer: &mut R,
) -> Result<StationarityReport>
where
    R: ReportRenderer + ?Sized,
{
    let flattened = flatten_series(store, labels)?;

    let mut coint = CointReport::new();
    for label in labels {
        let outcome = test_cointegration(store.get(label)?, coint_significance)?;
        coint.push(CointEntry {
            label: label.clone(),
            classification: outcome.classification,
            statistic: outcome.statistic,
            critical_value_1pct: outcome.critical_values.one_pct,
            p_value: outcome.p_value,
        });
    }

    let mut report = StationarityReport::new();
    for (key, series) in &flattened {
        let outcome = test_stationarity(series, &key.to_string(), stationarity_significance)?;
        report.push(StationarityEntry {
            key: key.clone(),
            classification: outcome.classification,
            statistic: outcome.statistic,
            p_value: outcome.p_value,
            used_lag: outcome.used_lag,
            nobs: outcome.nobs,
        });
    }

    renderer.render("Cointegration", &coint.display_frame()?);
    renderer.render("Stationarity", &report.display_frame()?);
    info!(labels = labels.len(), series = report.len(), "report built");

    Ok(report)
}
