//! Rows, cells and column definitions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FilterResult;
use crate::expression::FilterExpression;
use crate::predicate::ComparablePair;

/// Identifier of a grid row.
pub type RowId = usize;

/// A raw row record: textual values keyed by column identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Row identifier.
    pub id: RowId,

    /// Raw cell contents keyed by column identifier.
    #[serde(default)]
    pub values: BTreeMap<String, String>,

    /// Pre-rendered display forms keyed by column identifier.
    ///
    /// Hosts that memoize their own rendering put it here; it takes
    /// precedence over the column formatter during text comparison.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rendered: BTreeMap<String, String>,
}

impl Row {
    /// Creates an empty row with the given identifier.
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Adds a raw value for `column`.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Adds a pre-rendered display form for `column`.
    pub fn with_rendered(mut self, column: impl Into<String>, rendered: impl Into<String>) -> Self {
        self.rendered.insert(column.into(), rendered.into());
        self
    }

    /// Returns the raw value for `column`, if set.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

/// A single (row, column) data point as seen by the predicates.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    /// The owning row.
    pub row: RowId,
    /// Raw textual content.
    pub content: &'a str,
    /// The column this cell belongs to.
    pub column: &'a Column,
    /// Optional pre-rendered display form (may contain markup).
    pub rendered: Option<&'a str>,
}

impl<'a> Cell<'a> {
    /// Creates a cell without a pre-rendered form.
    pub fn new(row: RowId, content: &'a str, column: &'a Column) -> Self {
        Self {
            row,
            content,
            column,
            rendered: None,
        }
    }

    /// Attaches a pre-rendered display form.
    pub fn with_rendered(mut self, rendered: &'a str) -> Self {
        self.rendered = Some(rendered);
        self
    }
}

/// Everything a column formatter may look at when rendering a cell.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    /// Raw cell content.
    pub content: &'a str,
    /// The row being rendered.
    pub row: RowId,
    /// The column being rendered.
    pub column: &'a Column,
    /// The full row record, when the host can supply one.
    pub row_data: Option<&'a Row>,
    /// The filter currently being evaluated.
    pub filter: &'a FilterExpression,
}

/// Column-specific capabilities consulted during filtering.
///
/// Both methods default to "not provided", which selects the built-in
/// semantics. Errors are propagated to the caller of the filter pass.
pub trait ColumnBehavior {
    /// Produces the comparison pair for ordering predicates.
    ///
    /// `keyword` is the raw operand of the filter. Returning `Ok(None)` falls
    /// back to numeric-or-text comparison.
    fn compare_value(&self, _cell: &Cell<'_>, _keyword: &str) -> FilterResult<Option<ComparablePair>> {
        Ok(None)
    }

    /// Renders a display form of the cell, possibly containing markup.
    ///
    /// Returning `Ok(None)` means the column has no formatter.
    fn format(&self, _ctx: &FormatContext<'_>) -> FilterResult<Option<String>> {
        Ok(None)
    }
}

/// Column behavior that provides no capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainColumn;

impl ColumnBehavior for PlainColumn {}

/// A column definition: an identifier plus its injected behavior.
pub struct Column {
    id: String,
    behavior: Box<dyn ColumnBehavior>,
}

impl Column {
    /// Creates a column with no custom behavior.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_behavior(id, PlainColumn)
    }

    /// Creates a column with the given behavior.
    pub fn with_behavior(id: impl Into<String>, behavior: impl ColumnBehavior + 'static) -> Self {
        Self {
            id: id.into(),
            behavior: Box::new(behavior),
        }
    }

    /// Returns the column identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the column's behavior.
    pub fn behavior(&self) -> &dyn ColumnBehavior {
        self.behavior.as_ref()
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("id", &self.id).finish_non_exhaustive()
    }
}
