//! Output formatting utilities for the gf CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`rows`] - Filtered row output (filter)
//! - [`expressions`] - Keyword classification output (classify)
//! - [`helpers`] - Common formatting utilities (truncation, padding)

mod expressions;
pub mod helpers;
mod rows;

pub use expressions::{format_classification_json, format_classification_table};
pub use rows::{format_rows_json, format_rows_table, RowsView};
