#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ratescreen/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod panel;
pub mod table;

pub use error::{DataError, Result};
pub use loader::{CsvLoaderConfig, CsvPanelLoader, PanelLoader};
pub use panel::PanelStore;
pub use table::{DEFAULT_INDEX_COLUMN, SeriesTable, columns};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
