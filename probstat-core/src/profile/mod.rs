pub mod frequency;
pub mod histogram;
pub mod summary;

pub use frequency::{FrequencyCounter, FrequencyEntry};
pub use histogram::{build_histogram, HistogramBin};
pub use summary::ColumnSummary;
