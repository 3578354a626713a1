use probstat_common::{ProbStatError, Result};
use serde::{Deserialize, Serialize};

use crate::figure::{Figure, FigureBar, FigureKind, REDUCED_ALPHA};
use crate::profile::{build_histogram, ColumnSummary, HistogramBin};
use crate::table::DataTable;

const HISTOGRAM_COLOR: &str = "skyblue";
const HISTOGRAM_EDGE: &str = "black";
const LABEL_ROTATION_DEG: f32 = 45.0;
const LABEL_FONT_SIZE: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramView {
    pub column: String,
    pub bins: Vec<HistogramBin>,
    pub summary: ColumnSummary,
    pub figure: Figure,
}

/// Histogram of `column` split into `bins` equal-width bins.
///
/// Fails with [`ProbStatError::ColumnNotFound`] before touching any data when
/// the column is absent, and with [`ProbStatError::NonNumericColumn`] when a
/// present cell is not a number.
pub fn visualize_column(table: &DataTable, column: &str, bins: usize) -> Result<HistogramView> {
    if !table.has_column(column) {
        tracing::warn!(column, "histogram requested for unknown column");
        return Err(ProbStatError::ColumnNotFound(column.to_owned()));
    }
    let numeric = table.numeric_values(column)?;
    let hist = build_histogram(&numeric.values, bins);
    let summary = ColumnSummary::from_column(&numeric);
    tracing::debug!(column, bins = hist.len(), values = numeric.values.len(), missing = numeric.missing, "built histogram");
    Ok(HistogramView {
        column: column.to_owned(),
        figure: histogram_figure(column, &hist),
        bins: hist,
        summary,
    })
}

pub fn histogram_figure(column: &str, bins: &[HistogramBin]) -> Figure {
    let mut fig = Figure::new(
        FigureKind::Histogram,
        format!("Histogram of {column}"),
        column,
        "Frequency",
    )
    .with_size(14.0, 8.0);
    fig.bars = bins
        .iter()
        .map(|b| FigureBar {
            label: format!("{:.2}-{:.2}", b.range_start, b.range_end),
            x: b.range_start,
            width: b.width(),
            height: b.count,
            color: HISTOGRAM_COLOR.into(),
            edge_color: Some(HISTOGRAM_EDGE.into()),
            alpha: REDUCED_ALPHA,
        })
        .collect();
    // empty bins stay unlabelled
    fig.annotate_bars(LABEL_ROTATION_DEG, Some(LABEL_FONT_SIZE), |b| b.height > 0);
    fig
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> DataTable {
        DataTable::from_csv_bytes(csv.as_bytes()).unwrap()
    }

    #[test]
    fn unknown_column_reports_name() {
        let t = table("A,B\n1,2\n");
        let err = visualize_column(&t, "C", 30).unwrap_err();
        assert_eq!(err.to_string(), "The column name 'C' does not exist in the data.");
    }

    #[test]
    fn figure_labels_and_title() {
        let t = table("a,b\n1,10\n2,20\n3,30\n");
        let v = visualize_column(&t, "b", 30).unwrap();
        assert_eq!(v.figure.title, "Histogram of b");
        assert_eq!(v.figure.x_label, "b");
        assert_eq!(v.figure.y_label, "Frequency");
        assert_eq!(v.figure.kind, FigureKind::Histogram);
        assert_eq!(v.bins.len(), 30);
        assert_eq!(v.figure.total(), 3);
    }

    #[test]
    fn only_nonzero_bins_are_annotated_and_rotated() {
        let t = table("v\n1\n2\n2\n3\n3\n3\n");
        let v = visualize_column(&t, "v", 30).unwrap();
        assert_eq!(v.figure.annotations.len(), 3);
        assert!(v.figure.annotations.iter().all(|a| a.rotation_deg == 45.0));
        let texts: Vec<&str> = v.figure.annotations.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn all_missing_column_draws_no_bars() {
        let t = table("x,y\n,1\nNA,2\n");
        let v = visualize_column(&t, "x", 30).unwrap();
        assert!(v.bins.is_empty());
        assert!(v.figure.bars.is_empty());
        assert_eq!(v.summary.missing, 2);
    }

    #[test]
    fn custom_bin_count_is_respected() {
        let t = table("x\n0\n5\n10\n");
        let v = visualize_column(&t, "x", 5).unwrap();
        assert_eq!(v.bins.len(), 5);
        assert_eq!(v.figure.bars.len(), 5);
    }
}
