use serde::{Deserialize, Serialize};

use crate::table::NumericColumn;

/// Descriptive figures shown next to a column's histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub count: u64,
    pub missing: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl ColumnSummary {
    pub fn from_column(col: &NumericColumn) -> Self {
        let n = col.values.len();
        if n == 0 {
            return Self { count: 0, missing: col.missing as u64, min: None, max: None, mean: None };
        }
        let min = col.values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = col.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = col.values.iter().sum::<f64>() / n as f64;
        Self {
            count: n as u64,
            missing: col.missing as u64,
            min: Some(min),
            max: Some(max),
            mean: Some(mean),
        }
    }
}
