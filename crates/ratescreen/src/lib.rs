#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ratescreen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cointegration;
pub mod config;
pub mod differencing;
pub mod error;
pub mod lags;
pub mod pipeline;
pub mod report;
pub mod stationarity;
pub mod transform;

// Re-export main types from sub-crates
pub use ratescreen_data as data;
pub use ratescreen_stats as stats;

pub use cointegration::{CointClass, CointOutcome, test_cointegration};
pub use config::ScreenConfig;
pub use differencing::{DIFFERENCING_P_THRESHOLD, DifferenceMethod, difference_targets};
pub use error::{AnalysisError, Result};
pub use lags::{LagCorrelations, correlate_with_lags, lag_column, lagged_frame};
pub use pipeline::{Screen, ScreenOutcome};
pub use report::{
    CointEntry, CointReport, NullRenderer, ReportRenderer, SeriesKey, StationarityEntry,
    StationarityReport, TracingRenderer, build_report, build_report_with, flatten_series,
};
pub use stationarity::{
    STATIONARITY_THRESHOLD, StationarityClass, StationarityOutcome, test_stationarity,
};
pub use transform::{Transformation, YOY_GROWTH, append_growth};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
