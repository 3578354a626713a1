use probstat_common::Result;
use std::io::Write;

use crate::figure::Figure;
use crate::page::{HistogramPanel, Page, SELECT_PROMPT, TRIALS_PROMPT, UPLOAD_PROMPT};
use crate::table::DataTable;

const BAR_WIDTH: usize = 40;

/// Plain-text rendering of a page, top to bottom.
pub fn write_page<W: Write>(out: &mut W, page: &Page) -> Result<()> {
    writeln!(out, "{}", page.title)?;
    writeln!(out, "{}", "=".repeat(page.title.chars().count()))?;
    writeln!(out, "{}", page.description)?;
    writeln!(out)?;
    match &page.dataset {
        Some(ds) => {
            writeln!(out, "{UPLOAD_PROMPT}: {}", ds.file_name)?;
            writeln!(out)?;
            write_table(out, &ds.table)?;
            writeln!(out)?;
            writeln!(out, "{SELECT_PROMPT}: {} [{}]", ds.selected_column, ds.column_options.join(", "))?;
            writeln!(out)?;
            match &ds.histogram {
                HistogramPanel::Chart(view) => {
                    write_figure(out, &view.figure)?;
                    let s = &view.summary;
                    writeln!(out, "{:<10} {}", "count:", s.count)?;
                    writeln!(out, "{:<10} {}", "missing:", s.missing)?;
                    if let (Some(min), Some(max), Some(mean)) = (s.min, s.max, s.mean) {
                        writeln!(out, "{:<10} {min}  max: {max}  mean: {mean:.3}", "min:")?;
                    }
                }
                HistogramPanel::Error { message } => writeln!(out, "error: {message}")?,
            }
        }
        None => writeln!(out, "{UPLOAD_PROMPT}: (no file)")?,
    }
    writeln!(out)?;
    writeln!(out, "{TRIALS_PROMPT}: {}", page.simulation.trials)?;
    writeln!(out)?;
    write_figure(out, &page.simulation.figure)?;
    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, table: &DataTable) -> Result<()> {
    let widths: Vec<usize> = table
        .column_names()
        .iter()
        .enumerate()
        .map(|(i, h)| {
            table
                .rows()
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let index_width = table.row_count().saturating_sub(1).to_string().len();
    let header: Vec<String> = table
        .column_names()
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{h:>w$}"))
        .collect();
    writeln!(out, "{:>iw$}  {}", "", header.join("  "), iw = index_width)?;
    for (i, row) in table.rows().iter().enumerate() {
        let cells: Vec<String> = row.iter().zip(&widths).map(|(c, w)| format!("{c:>w$}")).collect();
        writeln!(out, "{i:>iw$}  {}", cells.join("  "), iw = index_width)?;
    }
    writeln!(out, "[{} rows x {} columns]", table.row_count(), table.column_count())?;
    Ok(())
}

/// Horizontal `█` bars scaled to the tallest bar, count at the end.
pub fn write_figure<W: Write>(out: &mut W, fig: &Figure) -> Result<()> {
    writeln!(out, "{}", fig.title)?;
    writeln!(out, "{} vs {}", fig.y_label, fig.x_label)?;
    if fig.bars.is_empty() {
        writeln!(out, "  (no data)")?;
        return Ok(());
    }
    let max = fig.max_height().max(1);
    let label_width = fig.bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    for bar in &fig.bars {
        let len = (bar.height as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
        let annotated = fig.annotations.iter().any(|a| a.x == bar.center());
        let count = if annotated { bar.height.to_string() } else { String::new() };
        writeln!(out, "  {:>lw$} |{:<bw$}| {count}", bar.label, "█".repeat(len), lw = label_width, bw = BAR_WIDTH)?;
    }
    Ok(())
}

pub fn page_to_json(page: &Page) -> Result<String> {
    Ok(serde_json::to_string_pretty(page)?)
}
