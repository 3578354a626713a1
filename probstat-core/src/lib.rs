pub mod export;
pub mod figure;
pub mod page;
pub mod profile;
pub mod simulation;
pub mod table;
pub mod visualize;

pub use export::{page_to_json, write_figure, write_page, write_table};
pub use figure::{Annotation, Figure, FigureBar, FigureKind, GridLines};
pub use page::{
    render_histogram, render_page, render_simulation, DatasetSection, HistogramPanel, Page,
    SimulationSection, Upload, WidgetState,
};
pub use probstat_common::{ProbStatError, Result};
pub use profile::{build_histogram, ColumnSummary, FrequencyEntry, HistogramBin};
pub use simulation::{simulate, simulation_figure, SimulationOutcome, TrialCount, OUTCOMES};
pub use table::{Column, DataTable, NumericColumn};
pub use visualize::{histogram_figure, visualize_column, HistogramView};
