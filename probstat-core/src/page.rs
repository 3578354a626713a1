//! One render cycle of the page.
//!
//! The host calls [`render_page`] after every interaction with the current
//! [`WidgetState`]; nothing is carried between calls except that state.

use probstat_common::{Config, ProbStatError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::figure::Figure;
use crate::simulation::{simulate, simulation_figure, SimulationOutcome, TrialCount};
use crate::table::DataTable;
use crate::visualize::{visualize_column, HistogramView};

pub const PAGE_TITLE: &str = "Probability and Statistics Web App";
pub const PAGE_DESCRIPTION: &str =
    "Use this app to analyze data, perform simulations, and visualize results.";
pub const UPLOAD_PROMPT: &str = "Choose a CSV file";
pub const SELECT_PROMPT: &str = "Select the column to visualize";
pub const TRIALS_PROMPT: &str = "Number of Trials";

/// A file handed to the upload control.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Accepts only names with a `.csv` extension.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let is_csv = Path::new(&name)
            .extension()
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if !is_csv {
            return Err(ProbStatError::UnsupportedUpload(name));
        }
        Ok(Self { name, bytes })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::new(path.to_string_lossy().into_owned(), bytes)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub upload: Option<Upload>,
    pub selected_column: Option<String>,
    pub trials: TrialCount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HistogramPanel {
    Chart(HistogramView),
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSection {
    pub file_name: String,
    pub table: DataTable,
    pub column_options: Vec<String>,
    pub selected_column: String,
    pub histogram: HistogramPanel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSection {
    pub trials: TrialCount,
    pub outcome: SimulationOutcome,
    pub figure: Figure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    pub description: String,
    pub dataset: Option<DatasetSection>,
    pub simulation: SimulationSection,
}

/// Renders the whole page from scratch.
///
/// A CSV that fails to parse aborts the cycle with `Err`. An unknown or
/// non-numeric column only replaces the histogram with an error message.
pub fn render_page<R: Rng + ?Sized>(state: &WidgetState, config: &Config, rng: &mut R) -> Result<Page> {
    let dataset = match &state.upload {
        Some(upload) => Some(render_dataset(upload, state.selected_column.as_deref(), config)?),
        None => None,
    };
    let simulation = render_simulation(state.trials, rng);
    Ok(Page {
        title: PAGE_TITLE.into(),
        description: PAGE_DESCRIPTION.into(),
        dataset,
        simulation,
    })
}

fn render_dataset(upload: &Upload, selected: Option<&str>, config: &Config) -> Result<DatasetSection> {
    let table = DataTable::from_csv_bytes(&upload.bytes).inspect_err(|e| {
        tracing::error!(file = %upload.name, error = %e, "failed to parse upload");
    })?;
    let column_options = table.column_names().to_vec();
    // selector defaults to the first column
    let selected_column = selected
        .map(str::to_owned)
        .or_else(|| column_options.first().cloned())
        .unwrap_or_default();
    let histogram = render_histogram(&table, &selected_column, config.histogram.bins);
    tracing::info!(file = %upload.name, rows = table.row_count(), column = %selected_column, "rendered dataset");
    Ok(DatasetSection {
        file_name: upload.name.clone(),
        table,
        column_options,
        selected_column,
        histogram,
    })
}

pub fn render_histogram(table: &DataTable, column: &str, bins: usize) -> HistogramPanel {
    match visualize_column(table, column, bins) {
        Ok(view) => HistogramPanel::Chart(view),
        Err(e) => HistogramPanel::Error { message: e.to_string() },
    }
}

pub fn render_simulation<R: Rng + ?Sized>(trials: TrialCount, rng: &mut R) -> SimulationSection {
    let outcome = simulate(trials, rng);
    SimulationSection {
        trials,
        figure: simulation_figure(&outcome),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn upload(csv: &str) -> Upload {
        Upload::new("data.csv", csv.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn no_upload_still_simulates() {
        let page = render_page(&WidgetState::default(), &Config::default(), &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(page.title, PAGE_TITLE);
        assert!(page.dataset.is_none());
        assert_eq!(page.simulation.figure.total(), 1000);
    }

    #[test]
    fn selection_defaults_to_first_column() {
        let state = WidgetState { upload: Some(upload("a,b\n1,10\n")), ..Default::default() };
        let page = render_page(&state, &Config::default(), &mut StdRng::seed_from_u64(1)).unwrap();
        let ds = page.dataset.unwrap();
        assert_eq!(ds.selected_column, "a");
        assert_eq!(ds.column_options, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn unknown_column_is_local_error() {
        let state = WidgetState {
            upload: Some(upload("A,B\n1,2\n")),
            selected_column: Some("C".into()),
            trials: TrialCount::new(10).unwrap(),
        };
        let page = render_page(&state, &Config::default(), &mut StdRng::seed_from_u64(1)).unwrap();
        match page.dataset.unwrap().histogram {
            HistogramPanel::Error { message } => {
                assert_eq!(message, "The column name 'C' does not exist in the data.")
            }
            other => panic!("expected error, got {other:?}"),
        }
        assert_eq!(page.simulation.outcome.trials, 10);
    }

    #[test]
    fn malformed_upload_aborts_render() {
        let state = WidgetState { upload: Some(upload("a,b\n1,2\n3,4,5\n")), ..Default::default() };
        assert!(render_page(&state, &Config::default(), &mut StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn non_csv_upload_rejected() {
        assert!(matches!(
            Upload::new("data.xlsx", Vec::new()),
            Err(ProbStatError::UnsupportedUpload(_))
        ));
        assert!(Upload::new("DATA.CSV", Vec::new()).is_ok());
    }

    #[test]
    fn configured_bins_flow_into_histogram() {
        let mut config = Config::default();
        config.histogram.bins = 10;
        let state = WidgetState { upload: Some(upload("x\n1\n2\n3\n")), ..Default::default() };
        let page = render_page(&state, &config, &mut StdRng::seed_from_u64(1)).unwrap();
        match page.dataset.unwrap().histogram {
            HistogramPanel::Chart(view) => assert_eq!(view.bins.len(), 10),
            other => panic!("expected chart, got {other:?}"),
        }
    }
}
