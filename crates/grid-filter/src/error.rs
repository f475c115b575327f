//! Error types for filter evaluation.

use thiserror::Error;

use crate::RowId;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while evaluating filters against a grid.
///
/// Keyword classification never fails; these errors come from the host side
/// (grid sources and column behaviors) or from compiling a whole-word term.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A filter named a column the grid source does not know.
    #[error("unknown column: {column}")]
    UnknownColumn {
        /// The column identifier that was requested.
        column: String,
    },

    /// A row identifier could not be resolved by the grid source.
    #[error("unknown row: {row}")]
    UnknownRow {
        /// The row identifier that was requested.
        row: RowId,
    },

    /// A host-supplied column capability failed.
    #[error("column '{column}' capability failed: {message}")]
    Capability {
        /// The column whose behavior failed.
        column: String,
        /// Description of the failure.
        message: String,
    },

    /// A whole-word term could not be compiled into a pattern.
    #[error("cannot match term '{term}': {message}")]
    Pattern {
        /// The filter term.
        term: String,
        /// Description of the failure.
        message: String,
    },
}

impl FilterError {
    /// Creates an unknown column error.
    pub fn unknown_column(column: impl Into<String>) -> Self {
        FilterError::UnknownColumn {
            column: column.into(),
        }
    }

    /// Creates a capability error.
    pub fn capability(column: impl Into<String>, message: impl Into<String>) -> Self {
        FilterError::Capability {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a pattern error.
    pub fn pattern(term: impl Into<String>, message: impl Into<String>) -> Self {
        FilterError::Pattern {
            term: term.into(),
            message: message.into(),
        }
    }
}
