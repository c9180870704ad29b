//! GDP growth transform.
//!
//! Growth is a forward ratio: `dgdp[t] = gdp[t+1] / gdp[t] - 1`. The last row
//! has no next period and is left missing, as is any row whose own or next
//! `gdp` is missing.

use polars::prelude::*;
use ratescreen_data::{PanelStore, columns};
use tracing::{debug, warn};

use crate::error::Result;

/// Name of the year-over-year growth transformation.
pub const YOY_GROWTH: &str = "yoyg";

/// Supported transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transformation {
    /// Forward GDP growth written to `dgdp`
    YearOverYearGrowth,
}

impl Transformation {
    /// Parse a transformation name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            YOY_GROWTH => Some(Self::YearOverYearGrowth),
            _ => None,
        }
    }
}

/// Append forward GDP growth to every labeled table.
///
/// An unknown `transformation` leaves every table untouched and returns
/// `Ok(())`.
///
/// # Errors
/// Fails on an unknown label or a table without a `gdp` column.
pub fn append_growth(
    store: &mut PanelStore,
    labels: &[String],
    transformation: &str,
) -> Result<()> {
    let Some(Transformation::YearOverYearGrowth) = Transformation::parse(transformation) else {
        warn!(transformation, "unsupported transformation, tables left unchanged");
        return Ok(());
    };

    for label in labels {
        let table = store.get_mut(label)?;
        table.require_columns(&[columns::GDP])?;

        let gdp = col(columns::GDP).cast(DataType::Float64);
        let growth = (gdp.clone().shift(lit(-1)) / gdp - lit(1.0))
            .fill_nan(lit(NULL))
            .alias(columns::GROWTH);

        let frame = table.frame().clone().lazy().with_column(growth).collect()?;
        table.set_frame(frame);
        debug!(label = label.as_str(), rows = table.height(), "appended growth");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ratescreen_data::{DataError, SeriesTable};

    use crate::error::AnalysisError;

    fn store() -> PanelStore {
        let frame = df!(
            "date" => &["2020-01", "2020-02", "2020-03", "2020-04"],
            "gdp" => &[100.0, 110.0, 99.0, 99.0],
            "rate" => &[1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        [SeriesTable::new("us", frame)].into_iter().collect()
    }

    #[test]
    fn test_forward_growth() {
        let mut store = store();
        append_growth(&mut store, &["us".to_string()], YOY_GROWTH).unwrap();

        let dgdp = store.get("us").unwrap().float_column("dgdp").unwrap();
        assert_relative_eq!(dgdp[0].unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(dgdp[1].unwrap(), -0.1, epsilon = 1e-12);
        assert_relative_eq!(dgdp[2].unwrap(), 0.0, epsilon = 1e-12);
        assert!(dgdp[3].is_none());
    }

    #[test]
    fn test_missing_gdp_propagates() {
        let frame = df!(
            "date" => &["a", "b", "c", "d"],
            "gdp" => &[Some(1.0), None, Some(2.0), Some(4.0)],
            "rate" => &[1.0, 1.0, 1.0, 1.0],
        )
        .unwrap();
        let mut store: PanelStore = [SeriesTable::new("x", frame)].into_iter().collect();
        append_growth(&mut store, &["x".to_string()], YOY_GROWTH).unwrap();

        let dgdp = store.get("x").unwrap().float_column("dgdp").unwrap();
        assert_eq!(dgdp, vec![None, None, Some(1.0), None]);
    }

    #[test]
    fn test_zero_over_zero_is_missing() {
        let frame = df!("date" => &["a", "b", "c"], "gdp" => &[0.0, 0.0, 1.0]).unwrap();
        let mut store: PanelStore = [SeriesTable::new("x", frame)].into_iter().collect();
        append_growth(&mut store, &["x".to_string()], YOY_GROWTH).unwrap();

        let table = store.get("x").unwrap();
        assert_eq!(table.frame().column("dgdp").unwrap().null_count(), 2);
    }

    #[test]
    fn test_unknown_transformation_is_noop() {
        let mut store = store();
        let before = store.get("us").unwrap().frame().clone();

        append_growth(&mut store, &["us".to_string()], "cpi").unwrap();

        let after = store.get("us").unwrap().frame();
        assert!(after.equals_missing(&before));
        assert!(!store.get("us").unwrap().has_column("dgdp"));
    }

    #[test]
    fn test_missing_gdp_column() {
        let frame = df!("date" => &["a", "b"], "rate" => &[1.0, 2.0]).unwrap();
        let mut store: PanelStore = [SeriesTable::new("x", frame)].into_iter().collect();

        let err = append_growth(&mut store, &["x".to_string()], YOY_GROWTH).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Data(DataError::MissingColumn { ref column, .. }) if column == "gdp"
        ));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            Transformation::parse("yoyg"),
            Some(Transformation::YearOverYearGrowth)
        );
        assert_eq!(Transformation::parse("YOYG"), None);
    }
}
