//! End-to-end screening run.

use ratescreen_data::PanelStore;
use tracing::info;

use crate::config::ScreenConfig;
use crate::differencing::difference_targets;
use crate::error::Result;
use crate::lags::{LagCorrelations, correlate_with_lags};
use crate::report::{ReportRenderer, SeriesKey, StationarityReport, build_report_with};
use crate::transform::{YOY_GROWTH, append_growth};

/// Artifacts of one screening run.
#[derive(Debug, Clone)]
pub struct ScreenOutcome {
    /// Growth/rate correlations by lag
    pub correlations: LagCorrelations,
    /// Stationarity report before differencing
    pub report: StationarityReport,
    /// Series overwritten by differencing, in order
    pub differenced: Vec<SeriesKey>,
    /// Stationarity report after differencing, when requested
    pub rerun: Option<StationarityReport>,
}

/// Screening pipeline
#[derive(Debug, Default)]
pub struct Screen {
    config: ScreenConfig,
}

impl Screen {
    /// Create a pipeline with the given configuration
    pub const fn new(config: ScreenConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub const fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Run growth, lag correlations, report, differencing and the optional
    /// report re-run over `labels`, mutating `store` in place.
    ///
    /// # Errors
    /// The first failing stage aborts the run.
    pub fn run<R>(
        &self,
        store: &mut PanelStore,
        labels: &[String],
        renderer: &mut R,
    ) -> Result<ScreenOutcome>
    where
        R: ReportRenderer + ?Sized,
    {
        let config = &self.config;

        append_growth(store, labels, YOY_GROWTH)?;
        info!(labels = labels.len(), "growth appended");

        let correlations = correlate_with_lags(store, labels, config.max_lag)?;
        renderer.render("Lag correlations", &correlations.table);

        let report = build_report_with(
            store,
            labels,
            config.coint_significance,
            config.stationarity_significance,
            renderer,
        )?;

        let differenced = difference_targets(store, &report, &config.targets, &config.method)?;
        info!(series = differenced.len(), "differencing done");

        let rerun = if config.rerun_report {
            Some(build_report_with(
                store,
                labels,
                config.coint_significance,
                config.stationarity_significance,
                renderer,
            )?)
        } else {
            None
        };

        Ok(ScreenOutcome {
            correlations,
            report,
            differenced,
            rerun,
        })
    }
}
