//! Per-column keyword filtering for tabular data grids.
//!
//! Every filtered column carries a raw keyword such as `>10`, `20:30`,
//! `=5` or `red fox`. The crate classifies each keyword into a typed
//! [`FilterExpression`](expression::FilterExpression) and narrows the grid's
//! rows column by column; a row survives when it passes every column's
//! filter.
//!
//! # Architecture
//!
//! ```text
//!  FilterMap (column -> keyword)
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ Classifier │  keyword → FilterExpression
//!   └────────────┘
//!        │
//!        ▼
//!   ┌────────────────────┐
//!   │ PredicateEvaluator │  cells of surviving rows → passing rows
//!   └────────────────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ FilterEngine │  repeat per column, AND semantics
//!   └──────────────┘
//! ```
//!
//! The host grid supplies cells through [`GridSource`] and may customise
//! comparison and rendering per column with a [`ColumnBehavior`].
//!
//! # Example
//!
//! ```
//! use grid_filter_rs::{filter_rows, FilterMap, FilterOptions, Grid, Row};
//!
//! let grid = Grid::from_rows(vec![
//!     Row::new(0).with("age", "25").with("name", "Tom"),
//!     Row::new(1).with("age", "9").with("name", "Foobar"),
//!     Row::new(2).with("age", "40").with("name", "foo"),
//! ]);
//!
//! let mut filters = FilterMap::new();
//! filters.insert("age", "20:30");
//!
//! let rows = filter_rows(&grid, &filters, &FilterOptions::default()).unwrap();
//! assert_eq!(rows, vec![0]);
//! ```

mod cell;
pub mod columns;
mod engine;
mod error;
pub mod expression;
mod grid;
pub mod numeric;
pub mod predicate;
pub mod text;

pub use cell::{Cell, Column, ColumnBehavior, FormatContext, PlainColumn, Row, RowId};
pub use engine::{filter_rows, FilterEngine, FilterMap, FilterOptions};
pub use error::{FilterError, FilterResult};
pub use expression::{Classifier, FilterExpression, FilterKind, MatchStrategy};
pub use grid::{Dataset, Grid, GridSource};
