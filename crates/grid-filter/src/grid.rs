//! Host-facing data access: grid sources, datasets and an in-memory grid.

use std::collections::HashMap;

use crate::cell::{Cell, Column, Row, RowId};
use crate::error::{FilterError, FilterResult};

/// Row and cell data provider supplied by the host grid.
pub trait GridSource {
    /// Returns every row identifier, in display order.
    fn row_ids(&self) -> Vec<RowId>;

    /// Resolves the cell at (`row`, `column`).
    fn cell(&self, row: RowId, column: &str) -> FilterResult<Cell<'_>>;

    /// The source's own view of a row, used as formatter context when no
    /// [`Dataset`] is supplied.
    fn row_view(&self, _row: RowId) -> Option<&Row> {
        None
    }
}

/// Authoritative raw row records, indexed by row identifier.
pub trait Dataset {
    /// Returns the raw record for `row`.
    fn record(&self, row: RowId) -> Option<&Row>;
}

/// An in-memory grid of rows and column definitions.
///
/// Missing values read as empty content.
#[derive(Debug, Default)]
pub struct Grid {
    columns: Vec<Column>,
    rows: Vec<Row>,
    index: HashMap<RowId, usize>,
}

impl Grid {
    /// Creates a grid from explicit column definitions and rows.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .map(|(position, row)| (row.id, position))
            .collect();
        Self {
            columns,
            rows,
            index,
        }
    }

    /// Creates a grid with a plain column for every value key in `rows`.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<Column> = Vec::new();
        for row in &rows {
            for key in row.values.keys() {
                if !columns.iter().any(|c| c.id() == key) {
                    columns.push(Column::new(key.clone()));
                }
            }
        }
        Self::new(columns, rows)
    }

    /// Adds a column, replacing any existing definition with the same id.
    pub fn set_column(&mut self, column: Column) {
        match self.columns.iter_mut().find(|c| c.id() == column.id()) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    /// Returns the column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Finds a column by identifier.
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id() == id)
    }

    /// Finds a row by identifier.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.index.get(&id).map(|&position| &self.rows[position])
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl GridSource for Grid {
    fn row_ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    fn cell(&self, row: RowId, column: &str) -> FilterResult<Cell<'_>> {
        let definition = self
            .column(column)
            .ok_or_else(|| FilterError::unknown_column(column))?;
        let record = self.row(row).ok_or(FilterError::UnknownRow { row })?;

        let cell = Cell::new(row, record.get(column).unwrap_or(""), definition);
        Ok(match record.rendered.get(column) {
            Some(rendered) => cell.with_rendered(rendered),
            None => cell,
        })
    }

    fn row_view(&self, row: RowId) -> Option<&Row> {
        self.row(row)
    }
}

impl Dataset for Grid {
    fn record(&self, row: RowId) -> Option<&Row> {
        self.row(row)
    }
}
