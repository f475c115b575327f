//! Filtered row output formatting.

use std::collections::BTreeMap;

use grid_filter_rs::{FilterMap, Grid, RowId};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{pad, single_line, truncate_str};

/// The rows to print and the columns to show.
pub struct RowsView<'a> {
    pub grid: &'a Grid,
    /// Row ids in output order.
    pub rows: &'a [RowId],
    /// Column ids in display order.
    pub columns: Vec<&'a str>,
    /// Filters applied, used for highlighting.
    pub filters: &'a FilterMap,
    /// Rows that passed every filter (before any limit).
    pub matched: usize,
    /// Rows in the input.
    pub total: usize,
}

impl RowsView<'_> {
    fn value(&self, row: RowId, column: &str) -> &str {
        self.grid
            .row(row)
            .and_then(|r| r.get(column))
            .unwrap_or("")
    }

    fn is_filtered(&self, column: &str) -> bool {
        self.filters
            .get(column)
            .is_some_and(|keyword| !keyword.trim().is_empty())
    }
}

/// JSON output structure for the filter command.
#[derive(Serialize)]
pub struct RowsOutput<'a> {
    pub rows: Vec<RowOutput<'a>>,
    pub matched: usize,
    pub total: usize,
}

/// JSON output structure for a single row.
#[derive(Serialize)]
pub struct RowOutput<'a> {
    pub id: RowId,
    pub values: BTreeMap<&'a str, &'a str>,
}

/// Formats filtered rows as JSON.
pub fn format_rows_json(view: &RowsView<'_>) -> Result<String, serde_json::Error> {
    let rows = view
        .rows
        .iter()
        .map(|&id| RowOutput {
            id,
            values: view
                .columns
                .iter()
                .map(|&column| (column, view.value(id, column)))
                .collect(),
        })
        .collect();

    let output = RowsOutput {
        rows,
        matched: view.matched,
        total: view.total,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats filtered rows as a table.
///
/// Filtered columns are highlighted when colors are enabled.
pub fn format_rows_table(view: &RowsView<'_>, max_width: usize, use_colors: bool) -> String {
    let mut output = String::new();

    if view.rows.is_empty() {
        output.push_str("No matching rows.\n");
    } else {
        let cells: Vec<Vec<String>> = view
            .rows
            .iter()
            .map(|&id| {
                view.columns
                    .iter()
                    .map(|&column| truncate_str(&single_line(view.value(id, column)), max_width))
                    .collect()
            })
            .collect();

        let id_width = view
            .rows
            .iter()
            .map(|id| id.to_string().len())
            .max()
            .unwrap_or(1)
            .max(1);

        let widths: Vec<usize> = view
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(column.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        // Header
        let mut header = vec![pad("#", id_width)];
        header.extend(
            view.columns
                .iter()
                .zip(&widths)
                .map(|(column, &width)| {
                    let text = pad(column, width);
                    if use_colors && view.is_filtered(column) {
                        text.cyan().bold().to_string()
                    } else {
                        text
                    }
                }),
        );
        let header = header.join("  ");
        if use_colors {
            output.push_str(&format!("{}\n", header.dimmed()));
        } else {
            output.push_str(header.trim_end());
            output.push('\n');
        }

        // Rows
        for (&id, row) in view.rows.iter().zip(&cells) {
            let mut line = vec![pad(&id.to_string(), id_width)];
            line.extend(
                view.columns
                    .iter()
                    .zip(row.iter().zip(&widths))
                    .map(|(column, (value, &width))| {
                        let text = pad(value, width);
                        if use_colors && view.is_filtered(column) {
                            text.cyan().to_string()
                        } else {
                            text
                        }
                    }),
            );
            let line = line.join("  ");
            output.push_str(line.trim_end());
            output.push('\n');
        }
    }

    let summary = if view.rows.len() < view.matched {
        format!(
            "\n{} of {} rows matched (showing {})\n",
            view.matched,
            view.total,
            view.rows.len()
        )
    } else {
        format!("\n{} of {} rows matched\n", view.matched, view.total)
    };
    if use_colors {
        output.push_str(&summary.dimmed().to_string());
    } else {
        output.push_str(&summary);
    }

    output
}
