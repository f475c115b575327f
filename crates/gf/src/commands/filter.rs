//! Filter command implementation.
//!
//! Loads rows from a file, applies per-column keyword filters in the order
//! given and prints the surviving rows.

use std::path::PathBuf;

use grid_filter_rs::{filter_rows, FilterMap, Grid, MatchStrategy};
use log::{debug, warn};

use super::config::{load_config, Config};
use super::{CommandContext, CommandError, Result};
use crate::loader::load_rows;
use crate::output::helpers::DEFAULT_MAX_WIDTH;
use crate::output::{format_rows_json, format_rows_table, RowsView};

/// Maximum Levenshtein distance for column name suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Options for the filter command.
pub struct FilterCommandOptions {
    /// Data file to read.
    pub file: PathBuf,
    /// `(column, keyword)` pairs in the order given.
    pub filters: Vec<(String, String)>,
    /// Strategy override; the config value is used when absent.
    pub strategy: Option<MatchStrategy>,
    /// Columns to display; all when empty.
    pub columns: Vec<String>,
    /// Maximum number of rows to print.
    pub limit: Option<usize>,
}

/// Executes the filter command.
pub fn execute(ctx: &CommandContext, opts: &FilterCommandOptions) -> Result<()> {
    let config = load_config()?;
    let rows = load_rows(&opts.file)?;
    let total = rows.len();

    let grid = build_grid(rows, &config);
    let filters = build_filter_map(&opts.filters);

    for (column, _) in filters.iter() {
        ensure_column(&grid, column)?;
    }
    let columns = display_columns(&grid, &opts.columns)?;

    let strategy = opts.strategy.unwrap_or(config.match_strategy);
    debug!(
        "filtering {} rows with {} filters ({} strategy)",
        total,
        filters.len(),
        strategy
    );

    let matched = filter_rows(
        &grid,
        &filters,
        &grid_filter_rs::FilterOptions::with_strategy(strategy),
    )?;

    let shown = match opts.limit {
        Some(limit) => &matched[..matched.len().min(limit)],
        None => &matched[..],
    };

    let view = RowsView {
        grid: &grid,
        rows: shown,
        columns,
        filters: &filters,
        matched: matched.len(),
        total,
    };

    if ctx.json_output {
        println!("{}", format_rows_json(&view)?);
    } else if !ctx.quiet {
        let max_width = config.output.max_width.unwrap_or(DEFAULT_MAX_WIDTH);
        let use_colors = ctx.use_colors && config.output.color.unwrap_or(true);
        print!("{}", format_rows_table(&view, max_width, use_colors));
    }

    Ok(())
}

/// Builds the grid, applying configured column behaviors.
fn build_grid(rows: Vec<grid_filter_rs::Row>, config: &Config) -> Grid {
    let mut grid = Grid::from_rows(rows);
    for (name, column) in &config.columns {
        if grid.column(name).is_some() {
            grid.set_column(column.to_column(name));
        } else {
            debug!("configured column '{name}' not present in input");
        }
    }
    grid
}

/// Collects filter arguments; a repeated column keeps its first position
/// and its last keyword.
fn build_filter_map(filters: &[(String, String)]) -> FilterMap {
    let mut map = FilterMap::new();
    for (column, keyword) in filters {
        if let Some(previous) = map.insert(column.as_str(), keyword.as_str()) {
            warn!("column '{column}' filtered more than once, replacing '{previous}' with '{keyword}'");
        }
    }
    map
}

/// Resolves the columns to print, in display order.
fn display_columns<'a>(grid: &'a Grid, requested: &'a [String]) -> Result<Vec<&'a str>> {
    if requested.is_empty() {
        return Ok(grid.columns().iter().map(|c| c.id()).collect());
    }

    requested
        .iter()
        .map(|name| {
            ensure_column(grid, name)?;
            Ok(name.as_str())
        })
        .collect()
}

/// Fails with a suggestion when `column` is not in the grid.
fn ensure_column(grid: &Grid, column: &str) -> Result<()> {
    if grid.column(column).is_some() {
        return Ok(());
    }

    Err(CommandError::UnknownColumn {
        column: column.to_string(),
        suggestion: find_similar_column(grid, column),
    })
}

/// Finds the closest column name, case-insensitively.
fn find_similar_column(grid: &Grid, column: &str) -> Option<String> {
    let needle = column.to_lowercase();
    grid.columns()
        .iter()
        .map(|c| (strsim::levenshtein(&needle, &c.id().to_lowercase()), c.id()))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, id)| id.to_string())
}
