use csv::ReaderBuilder;
use probstat_common::{ProbStatError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Cell spellings treated as missing values.
const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "none"];

/// Rows-by-named-columns table parsed from comma-separated input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Borrowed view of a single column.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    index: usize,
    table: &'a DataTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<f64>,
    pub missing: usize,
}

impl DataTable {
    /// Short rows are padded with empty (missing) cells; a row wider than
    /// the header is an error.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<String>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ProbStatError::EmptyDataset);
        }
        let width = columns.len();
        for (i, row) in rows.iter_mut().enumerate() {
            if row.len() > width {
                return Err(ProbStatError::TooManyFields {
                    row: i + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            row.resize(width, String::new());
        }
        Ok(Self {
            columns: dedupe_headers(name_blank_headers(columns)),
            rows,
        })
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_owned()).collect();
        if headers.is_empty() {
            return Err(ProbStatError::EmptyDataset);
        }
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_owned).collect());
        }
        tracing::debug!(columns = headers.len(), rows = rows.len(), "parsed csv");
        Self::new(headers, rows)
    }

    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_csv_reader(bytes)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column(&self, name: &str) -> Result<Column<'_>> {
        let index = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| ProbStatError::ColumnNotFound(name.to_owned()))?;
        Ok(Column {
            name: &self.columns[index],
            index,
            table: self,
        })
    }

    pub fn numeric_values(&self, name: &str) -> Result<NumericColumn> {
        self.column(name)?.to_numeric()
    }
}

impl<'a> Column<'a> {
    pub fn cells(&self) -> impl Iterator<Item = &'a str> + 'a {
        let index = self.index;
        let table: &'a DataTable = self.table;
        table.rows.iter().map(move |r| r[index].as_str())
    }

    /// Parses every present cell as `f64`; missing cells are counted, not parsed.
    pub fn to_numeric(&self) -> Result<NumericColumn> {
        let mut values = Vec::with_capacity(self.table.row_count());
        let mut missing = 0usize;
        for (row, cell) in self.cells().enumerate() {
            if is_missing(cell) {
                missing += 1;
                continue;
            }
            match cell.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => values.push(v),
                _ => {
                    return Err(ProbStatError::NonNumericColumn {
                        column: self.name.to_owned(),
                        row: row + 1,
                        value: cell.to_owned(),
                    })
                }
            }
        }
        Ok(NumericColumn {
            name: self.name.to_owned(),
            values,
            missing,
        })
    }
}

pub fn is_missing(cell: &str) -> bool {
    let t = cell.trim();
    MISSING_MARKERS.iter().any(|m| t.eq_ignore_ascii_case(m))
}

fn name_blank_headers(headers: Vec<String>) -> Vec<String> {
    headers
        .into_iter()
        .enumerate()
        .map(|(i, h)| if h.is_empty() { format!("Unnamed: {i}") } else { h })
        .collect()
}

// repeated names become "name.1", "name.2", ...
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(headers.len());
    for h in headers {
        let mut candidate = h.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{h}.{n}");
            n += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
