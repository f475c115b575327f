//! Multi-column narrowing of the candidate row set.

use std::fmt;

use log::debug;

use crate::cell::RowId;
use crate::error::FilterResult;
use crate::expression::{Classifier, MatchStrategy};
use crate::grid::{Dataset, GridSource};
use crate::predicate::{PredicateContext, PredicateEvaluator};
use crate::text::{strip_markup, MarkupStripper};

/// Insertion-ordered mapping from column identifier to raw keyword.
///
/// Columns are evaluated in insertion order. Re-inserting a column replaces
/// its keyword and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMap {
    entries: Vec<(String, String)>,
}

impl FilterMap {
    /// Creates an empty filter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keyword for `column`, returning the previous keyword.
    pub fn insert(&mut self, column: impl Into<String>, keyword: impl Into<String>) -> Option<String> {
        let column = column.into();
        let keyword = keyword.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some((_, existing)) => Some(std::mem::replace(existing, keyword)),
            None => {
                self.entries.push((column, keyword));
                None
            }
        }
    }

    /// Removes the filter for `column`, returning its keyword.
    pub fn remove(&mut self, column: &str) -> Option<String> {
        let position = self.entries.iter().position(|(c, _)| c == column)?;
        Some(self.entries.remove(position).1)
    }

    /// Returns the keyword for `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, k)| k.as_str())
    }

    /// Number of active filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over (column, keyword) pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, k)| (c.as_str(), k.as_str()))
    }
}

impl<C: Into<String>, K: Into<String>> FromIterator<(C, K)> for FilterMap {
    fn from_iter<I: IntoIterator<Item = (C, K)>>(iter: I) -> Self {
        let mut map = FilterMap::new();
        for (column, keyword) in iter {
            map.insert(column, keyword);
        }
        map
    }
}

/// Per-pass options supplied by the host.
#[derive(Clone, Copy, Default)]
pub struct FilterOptions<'a> {
    /// How multi-word keywords are matched.
    pub match_strategy: MatchStrategy,
    /// Authoritative row records for formatter context.
    pub dataset: Option<&'a dyn Dataset>,
}

impl<'a> FilterOptions<'a> {
    /// Options with the given match strategy and no dataset.
    pub fn with_strategy(match_strategy: MatchStrategy) -> Self {
        Self {
            match_strategy,
            dataset: None,
        }
    }

    /// Sets the authoritative dataset.
    pub fn dataset(mut self, dataset: &'a dyn Dataset) -> Self {
        self.dataset = Some(dataset);
        self
    }
}

/// Applies a [`FilterMap`] to a grid, one column at a time.
///
/// # Example
///
/// ```
/// use grid_filter_rs::{FilterEngine, FilterMap, FilterOptions, Grid, Row};
///
/// let grid = Grid::from_rows(vec![
///     Row::new(0).with("age", "25").with("name", "Tom"),
///     Row::new(1).with("age", "9").with("name", "Foobar"),
///     Row::new(2).with("age", "40").with("name", "foo"),
/// ]);
/// let filters: FilterMap = [("age", ">10"), ("name", "foo")].into_iter().collect();
///
/// let rows = FilterEngine::new()
///     .filter_rows(&grid, &filters, &FilterOptions::default())
///     .unwrap();
/// assert_eq!(rows, vec![2]);
/// ```
#[derive(Clone, Copy)]
pub struct FilterEngine {
    strip_markup: MarkupStripper,
}

impl fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEngine").finish_non_exhaustive()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    /// Creates an engine with the default markup stripper.
    pub fn new() -> Self {
        Self { strip_markup }
    }

    /// Replaces the function used to turn rendered cells into plain text.
    pub fn with_markup_stripper(mut self, strip_markup: MarkupStripper) -> Self {
        self.strip_markup = strip_markup;
        self
    }

    /// Returns the rows of `source` that pass every filter in `filters`.
    ///
    /// With no filters, every row id is returned in source order. Otherwise
    /// each column narrows the survivors of the previous one, and the result
    /// follows the order produced by the last applied predicate. Columns
    /// whose keyword classifies as no filter are skipped, and once no rows
    /// survive the remaining columns are not evaluated.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot resolve a filtered column or
    /// row, or if a column capability fails.
    pub fn filter_rows(
        &self,
        source: &dyn GridSource,
        filters: &FilterMap,
        options: &FilterOptions<'_>,
    ) -> FilterResult<Vec<RowId>> {
        let mut candidates = source.row_ids();
        if filters.is_empty() {
            return Ok(candidates);
        }

        let context = PredicateContext::new(source)
            .with_dataset(options.dataset)
            .with_markup_stripper(self.strip_markup);

        for (column, keyword) in filters.iter() {
            if candidates.is_empty() {
                debug!("no candidates left, skipping column '{column}' and later filters");
                break;
            }

            let expression = Classifier::classify(keyword, options.match_strategy);
            if expression.is_none() {
                debug!("column '{column}': empty keyword, all {} rows pass", candidates.len());
                continue;
            }

            let cells = candidates
                .iter()
                .map(|&row| source.cell(row, column))
                .collect::<FilterResult<Vec<_>>>()?;

            let survivors = PredicateEvaluator::new(&expression, &context).apply(&cells)?;
            debug!(
                "column '{column}': {} {:?} narrowed {} -> {} rows",
                expression.kind(),
                expression.to_string(),
                candidates.len(),
                survivors.len()
            );
            candidates = survivors;
        }

        Ok(candidates)
    }
}

/// Filters `source` with a default [`FilterEngine`].
///
/// See [`FilterEngine::filter_rows`].
pub fn filter_rows(
    source: &dyn GridSource,
    filters: &FilterMap,
    options: &FilterOptions<'_>,
) -> FilterResult<Vec<RowId>> {
    FilterEngine::new().filter_rows(source, filters, options)
}
