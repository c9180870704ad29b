//! Terminal and JSON output.

use polars::prelude::DataFrame;
use ratescreen::{LagCorrelations, ReportRenderer, ScreenOutcome};
use serde_json::{Value, json};

/// Prints each table to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StdoutRenderer;

impl ReportRenderer for StdoutRenderer {
    fn render(&mut self, title: &str, table: &DataFrame) {
        println!("\n{title}");
        println!("{table}");
    }
}

/// `{"max_lag": k, "lags": [...], "correlations": {label: [...]}}`
pub(crate) fn correlations_json(correlations: &LagCorrelations) -> Value {
    let lags = correlations.lags();
    let by_label: serde_json::Map<String, Value> = correlations
        .labels()
        .into_iter()
        .map(|label| {
            let values: Vec<Option<f64>> = lags
                .iter()
                .map(|&lag| correlations.correlation(&label, lag).filter(|v| v.is_finite()))
                .collect();
            (label, json!(values))
        })
        .collect();

    json!({
        "max_lag": correlations.max_lag(),
        "lags": lags,
        "correlations": by_label,
    })
}

pub(crate) fn outcome_json(outcome: &ScreenOutcome) -> serde_json::Result<Value> {
    Ok(json!({
        "correlations": correlations_json(&outcome.correlations),
        "stationarity": serde_json::to_value(&outcome.report)?,
        "differenced": outcome.differenced.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "rerun": outcome.rerun.as_ref().map(serde_json::to_value).transpose()?,
    }))
}
