//! Predicate evaluation against resolved cells.
//!
//! Each [`FilterExpression`] variant maps to one predicate. The
//! [`PredicateEvaluator`] applies it to the cells of a single column and
//! returns the rows that pass.
//!
//! # Example
//!
//! ```
//! use grid_filter_rs::expression::FilterExpression;
//! use grid_filter_rs::predicate::{PredicateContext, PredicateEvaluator};
//! use grid_filter_rs::{Grid, GridSource, Row};
//!
//! let grid = Grid::from_rows(vec![
//!     Row::new(0).with("age", "25"),
//!     Row::new(1).with("age", "9"),
//! ]);
//! let cells = vec![grid.cell(0, "age").unwrap(), grid.cell(1, "age").unwrap()];
//!
//! let expression = FilterExpression::GreaterThan("10".into());
//! let context = PredicateContext::new(&grid);
//! let evaluator = PredicateEvaluator::new(&expression, &context);
//! assert_eq!(evaluator.apply(&cells).unwrap(), vec![0]);
//! ```

use std::collections::HashSet;

use super::comparable::{ComparablePair, ComparableValue};
use crate::cell::{Cell, FormatContext, Row, RowId};
use crate::error::FilterResult;
use crate::expression::FilterExpression;
use crate::grid::{Dataset, GridSource};
use crate::numeric::parse_number;
use crate::text::{strip_markup, terms, MarkupStripper, WordPattern};

/// Context for predicate evaluation.
///
/// Supplies the row records handed to column formatters and the markup
/// stripper used to derive comparable text from rendered cells.
#[derive(Clone, Copy)]
pub struct PredicateContext<'a> {
    source: &'a dyn GridSource,
    dataset: Option<&'a dyn Dataset>,
    strip_markup: MarkupStripper,
}

impl<'a> PredicateContext<'a> {
    /// Creates a context over `source` with the default markup stripper.
    pub fn new(source: &'a dyn GridSource) -> Self {
        Self {
            source,
            dataset: None,
            strip_markup,
        }
    }

    /// Uses `dataset` as the authoritative source of row records.
    pub fn with_dataset(mut self, dataset: Option<&'a dyn Dataset>) -> Self {
        self.dataset = dataset;
        self
    }

    /// Replaces the markup stripper.
    pub fn with_markup_stripper(mut self, strip_markup: MarkupStripper) -> Self {
        self.strip_markup = strip_markup;
        self
    }

    /// Returns the row record passed to formatters for `row`.
    ///
    /// When a dataset is present it is authoritative; otherwise the grid
    /// source's own row view is used.
    pub fn row_data(&self, row: RowId) -> Option<&'a Row> {
        match self.dataset {
            Some(dataset) => dataset.record(row),
            None => self.source.row_view(row),
        }
    }
}

/// Evaluates one classified expression against cells.
pub struct PredicateEvaluator<'a> {
    expression: &'a FilterExpression,
    context: &'a PredicateContext<'a>,
}

impl<'a> PredicateEvaluator<'a> {
    /// Creates a new evaluator.
    pub fn new(expression: &'a FilterExpression, context: &'a PredicateContext<'a>) -> Self {
        Self {
            expression,
            context,
        }
    }

    /// Returns the rows of `cells` that pass, in encounter order and without
    /// duplicates.
    ///
    /// # Errors
    ///
    /// Propagates any error raised by a column's `format` or `compare_value`
    /// capability, or by compiling a whole-word term.
    pub fn apply(&self, cells: &[Cell<'_>]) -> FilterResult<Vec<RowId>> {
        let words = self.word_patterns()?;
        let mut seen = HashSet::with_capacity(cells.len());
        let mut rows = Vec::new();

        for cell in cells {
            if self.matches_with(cell, &words)? && seen.insert(cell.row) {
                rows.push(cell.row);
            }
        }

        Ok(rows)
    }

    /// Returns true if the cell passes the expression.
    pub fn matches(&self, cell: &Cell<'_>) -> FilterResult<bool> {
        let words = self.word_patterns()?;
        self.matches_with(cell, &words)
    }

    /// Whole-word patterns for a `Tokens` expression; empty otherwise.
    fn word_patterns(&self) -> FilterResult<Vec<WordPattern>> {
        match self.expression {
            FilterExpression::Tokens(operand) => terms(operand).map(WordPattern::new).collect(),
            _ => Ok(Vec::new()),
        }
    }

    fn matches_with(&self, cell: &Cell<'_>, words: &[WordPattern]) -> FilterResult<bool> {
        match self.expression {
            FilterExpression::None => Ok(true),
            FilterExpression::Contains(needle) => self.contains(cell, needle),
            FilterExpression::Fuzzy(operand) => self.all_terms(cell, operand, |text, term| {
                text.contains(term)
            }),
            FilterExpression::Tokens(_) => self.all_words(cell, words),
            FilterExpression::GreaterThan(operand) => {
                let pair = self.comparable_pair(cell, operand)?;
                Ok(pair.left > pair.right)
            }
            FilterExpression::LessThan(operand) => {
                let pair = self.comparable_pair(cell, operand)?;
                Ok(pair.left < pair.right)
            }
            FilterExpression::Equals(value) => Ok(parse_number(cell.content) == Some(*value)),
            FilterExpression::NotEquals(value) => Ok(parse_number(cell.content) != Some(*value)),
            FilterExpression::Range(lo, hi) => self.in_range(cell, lo, hi),
            FilterExpression::ContainsNumber(operand) => self.contains_number(cell, operand),
        }
    }

    /// Substring match on the raw content first, then on the comparable text.
    fn contains(&self, cell: &Cell<'_>, needle: &str) -> FilterResult<bool> {
        if needle.is_empty() || cell.content.to_lowercase().contains(needle) {
            return Ok(true);
        }
        Ok(self.comparable_text(cell)?.contains(needle))
    }

    /// Checks every whitespace-separated term of `operand` with `matcher`.
    fn all_terms(
        &self,
        cell: &Cell<'_>,
        operand: &str,
        matcher: impl Fn(&str, &str) -> bool,
    ) -> FilterResult<bool> {
        if terms(operand).next().is_none() {
            return Ok(true);
        }
        let text = self.comparable_text(cell)?;
        Ok(terms(operand).all(|term| matcher(&text, term)))
    }

    /// Requires every pattern to match the comparable text.
    fn all_words(&self, cell: &Cell<'_>, words: &[WordPattern]) -> FilterResult<bool> {
        if words.is_empty() {
            return Ok(true);
        }
        let text = self.comparable_text(cell)?;
        Ok(words.iter().all(|word| word.is_match(&text)))
    }

    /// Inclusive range check; the first bound's pair supplies the cell value.
    fn in_range(&self, cell: &Cell<'_>, lo: &str, hi: &str) -> FilterResult<bool> {
        let low = self.comparable_pair(cell, lo)?;
        let high = self.comparable_pair(cell, hi)?;
        Ok(low.right <= low.left && low.left <= high.right)
    }

    /// Numeric equality, or the operand's text inside the comparable text.
    fn contains_number(&self, cell: &Cell<'_>, operand: &str) -> FilterResult<bool> {
        let numeric_match = parse_number(cell.content)
            .zip(parse_number(operand))
            .is_some_and(|(value, wanted)| value == wanted);
        if numeric_match {
            return Ok(true);
        }
        Ok(self.comparable_text(cell)?.contains(&operand.to_lowercase()))
    }

    /// Lowercased plain text used by the text predicates.
    ///
    /// A pre-rendered form wins over the column formatter; the formatter is
    /// only consulted for non-empty content.
    fn comparable_text(&self, cell: &Cell<'_>) -> FilterResult<String> {
        let text = match cell.rendered {
            Some(rendered) => (self.context.strip_markup)(rendered),
            None if cell.content.is_empty() => String::new(),
            None => {
                let ctx = FormatContext {
                    content: cell.content,
                    row: cell.row,
                    column: cell.column,
                    row_data: self.context.row_data(cell.row),
                    filter: self.expression,
                };
                match cell.column.behavior().format(&ctx)? {
                    Some(rendered) => (self.context.strip_markup)(&rendered),
                    None => cell.content.to_string(),
                }
            }
        };
        Ok(text.to_lowercase())
    }

    /// Pair of (cell value, operand) for ordering predicates.
    fn comparable_pair(&self, cell: &Cell<'_>, operand: &str) -> FilterResult<ComparablePair> {
        if let Some(pair) = cell.column.behavior().compare_value(cell, operand)? {
            return Ok(pair);
        }

        let left = match parse_number(cell.content) {
            Some(value) => ComparableValue::Numeric(value),
            None => ComparableValue::Text(self.comparable_text(cell)?),
        };
        Ok(ComparablePair::new(left, ComparableValue::from_operand(operand)))
    }
}
