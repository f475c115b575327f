//! Tests for predicate evaluation.

use super::*;
use crate::cell::{Cell, Column, ColumnBehavior, FormatContext, Row, RowId};
use crate::columns::{DateColumn, TemplateColumn};
use crate::error::{FilterError, FilterResult};
use crate::expression::FilterExpression;
use crate::grid::{Dataset, Grid, GridSource};

// ==================== Test Helpers ====================

/// Builds a single-column grid with rows 0..n holding `values`.
fn column_grid(values: &[&str]) -> Grid {
    let rows = values
        .iter()
        .enumerate()
        .map(|(id, value)| Row::new(id).with("col", *value))
        .collect();
    Grid::new(vec![Column::new("col")], rows)
}

fn grid_with(column: Column, values: &[&str]) -> Grid {
    let mut grid = column_grid(values);
    grid.set_column(column);
    grid
}

fn cells(grid: &Grid) -> Vec<Cell<'_>> {
    grid.row_ids()
        .into_iter()
        .map(|row| grid.cell(row, "col").unwrap())
        .collect()
}

fn apply(grid: &Grid, expression: &FilterExpression) -> Vec<RowId> {
    try_apply(grid, expression).unwrap()
}

fn try_apply(grid: &Grid, expression: &FilterExpression) -> FilterResult<Vec<RowId>> {
    let context = PredicateContext::new(grid);
    PredicateEvaluator::new(expression, &context).apply(&cells(grid))
}

fn contains(s: &str) -> FilterExpression {
    FilterExpression::Contains(s.to_string())
}

fn gt(s: &str) -> FilterExpression {
    FilterExpression::GreaterThan(s.to_string())
}

fn lt(s: &str) -> FilterExpression {
    FilterExpression::LessThan(s.to_string())
}

fn range(lo: &str, hi: &str) -> FilterExpression {
    FilterExpression::Range(lo.to_string(), hi.to_string())
}

// ==================== None ====================

#[test]
fn test_none_passes_every_row() {
    let grid = column_grid(&["a", "", "3"]);
    assert_eq!(apply(&grid, &FilterExpression::None), vec![0, 1, 2]);
}

// ==================== Contains ====================

#[test]
fn test_contains_case_insensitive() {
    let grid = column_grid(&["Tom", "Foobar", "foo"]);
    assert_eq!(apply(&grid, &contains("foo")), vec![1, 2]);
}

#[test]
fn test_contains_empty_needle_passes_all() {
    let grid = column_grid(&["Tom", ""]);
    assert_eq!(apply(&grid, &contains("")), vec![0, 1]);
}

#[test]
fn test_contains_matches_rendered_text() {
    let column = Column::with_behavior("col", TemplateColumn::new("<b>{value}</b> kg"));
    let grid = grid_with(column, &["12", "7"]);
    // "kg" only appears in the rendering, never in raw content.
    assert_eq!(apply(&grid, &contains("kg")), vec![0, 1]);
    // Markup is stripped before matching.
    assert!(apply(&grid, &contains("<b>")).is_empty());
}

#[test]
fn test_contains_uses_pre_rendered_form() {
    let grid = Grid::new(
        vec![Column::new("col")],
        vec![
            Row::new(0).with("col", "1").with_rendered("col", "<span>Active</span>"),
            Row::new(1).with("col", "0").with_rendered("col", "<span>Inactive</span>"),
        ],
    );
    assert_eq!(apply(&grid, &contains("inactive")), vec![1]);
    assert_eq!(apply(&grid, &contains("active")), vec![0, 1]);
}

// ==================== Fuzzy ====================

#[test]
fn test_fuzzy_ignores_word_boundaries() {
    let grid = column_grid(&["category", "dog"]);
    assert_eq!(apply(&grid, &FilterExpression::Fuzzy("cat".into())), vec![0]);
}

#[test]
fn test_fuzzy_requires_every_term_in_any_order() {
    let grid = column_grid(&["Quick brown fox", "brown bear", "fox quickly"]);
    let expr = FilterExpression::Fuzzy("fox quick".into());
    assert_eq!(apply(&grid, &expr), vec![0, 2]);
}

#[test]
fn test_fuzzy_zero_terms_passes_all() {
    let grid = column_grid(&["a", "b"]);
    assert_eq!(apply(&grid, &FilterExpression::Fuzzy("   ".into())), vec![0, 1]);
}

// ==================== Tokens ====================

#[test]
fn test_tokens_respects_word_boundaries() {
    let grid = column_grid(&["category", "cat show", "Cat"]);
    assert_eq!(apply(&grid, &FilterExpression::Tokens("cat".into())), vec![1, 2]);
}

#[test]
fn test_tokens_requires_every_term() {
    let grid = column_grid(&["red fox", "red foxes", "fox, red!"]);
    let expr = FilterExpression::Tokens("fox red".into());
    assert_eq!(apply(&grid, &expr), vec![0, 2]);
}

#[test]
fn test_tokens_terms_are_literal() {
    let grid = column_grid(&["release 1.2 notes", "release 102 notes", "1x2 release"]);
    let expr = FilterExpression::Tokens("1.2 release".into());
    assert_eq!(apply(&grid, &expr), vec![0]);
}

#[test]
fn test_tokens_zero_terms_passes_all() {
    let grid = column_grid(&["a", "b"]);
    assert_eq!(apply(&grid, &FilterExpression::Tokens(String::new())), vec![0, 1]);
}

// ==================== GreaterThan / LessThan ====================

#[test]
fn test_greater_than_numeric() {
    let grid = column_grid(&["25", "9", "40", "10"]);
    assert_eq!(apply(&grid, &gt("10")), vec![0, 2]);
}

#[test]
fn test_less_than_numeric() {
    let grid = column_grid(&["25", "9", "40", "10"]);
    assert_eq!(apply(&grid, &lt("10")), vec![1]);
}

#[test]
fn test_greater_than_text() {
    let grid = column_grid(&["Tom", "Anna", "mary"]);
    assert_eq!(apply(&grid, &gt("m")), vec![0, 2]);
}

#[test]
fn test_ordering_excludes_mismatched_kinds() {
    // Non-numeric cells never compare against a numeric operand, and
    // numeric cells never compare against a text operand.
    let grid = column_grid(&["abc", "", "20"]);
    assert_eq!(apply(&grid, &gt("10")), vec![2]);
    assert!(apply(&grid, &lt("10")).is_empty());
    assert_eq!(apply(&grid, &gt("a")), vec![0]);
}

#[test]
fn test_greater_than_uses_compare_value() {
    let column = Column::with_behavior("col", DateColumn::new("%d/%m/%Y"));
    let grid = grid_with(column, &["02/03/2024", "15/12/2023", "01/01/2025"]);
    assert_eq!(apply(&grid, &gt("01/02/2024")), vec![0, 2]);
    assert_eq!(apply(&grid, &lt("01/02/2024")), vec![1]);
}

// ==================== Equals / NotEquals ====================

#[test]
fn test_equals_numeric() {
    let grid = column_grid(&["5", "5.0", "05", "6", "five"]);
    assert_eq!(apply(&grid, &FilterExpression::Equals(5.0)), vec![0, 1, 2]);
}

#[test]
fn test_not_equals_numeric_and_unparseable() {
    let grid = column_grid(&["5", "6", "five", ""]);
    assert_eq!(apply(&grid, &FilterExpression::NotEquals(5.0)), vec![1, 2, 3]);
}

#[test]
fn test_equals_and_not_equals_are_complementary() {
    let values = ["1", "2.5", "-3", "0", "100", "2.50"];
    let grid = column_grid(&values);
    for operand in [0.0, 1.0, 2.5, -3.0, 7.0] {
        let mut equal = apply(&grid, &FilterExpression::Equals(operand));
        let not_equal = apply(&grid, &FilterExpression::NotEquals(operand));
        for row in &not_equal {
            assert!(!equal.contains(row), "row {row} in both for {operand}");
        }
        equal.extend(not_equal);
        equal.sort();
        assert_eq!(equal, (0..values.len()).collect::<Vec<_>>());
    }
}

#[test]
fn test_equals_ignores_compare_value() {
    let column = Column::with_behavior("col", DateColumn::default());
    let grid = grid_with(column, &["2024-01-01", "3"]);
    assert_eq!(apply(&grid, &FilterExpression::Equals(3.0)), vec![1]);
}

// ==================== Range ====================

#[test]
fn test_range_inclusive_bounds() {
    let grid = column_grid(&["20", "25", "30", "31", "19.99"]);
    assert_eq!(apply(&grid, &range("20", "30")), vec![0, 1, 2]);
}

#[test]
fn test_range_reversed_bounds_match_nothing() {
    let grid = column_grid(&["20", "25", "30"]);
    assert!(apply(&grid, &range("30", "20")).is_empty());
}

#[test]
fn test_range_skips_non_numeric_cells() {
    let grid = column_grid(&["abc", "", "25"]);
    assert_eq!(apply(&grid, &range("1", "100")), vec![2]);
}

#[test]
fn test_range_uses_compare_value() {
    let column = Column::with_behavior("col", DateColumn::new("%d/%m/%Y"));
    let grid = grid_with(column, &["15/01/2024", "01/03/2024", "31/12/2023"]);
    assert_eq!(apply(&grid, &range("01/01/2024", "01/02/2024")), vec![0]);
}

// ==================== ContainsNumber ====================

#[test]
fn test_contains_number_numeric_or_text() {
    let grid = column_grid(&["5", "5.0", "15", "abc", "Room 5B"]);
    let expr = FilterExpression::ContainsNumber("5".into());
    assert_eq!(apply(&grid, &expr), vec![0, 1, 2, 4]);
}

#[test]
fn test_contains_number_decimal_text() {
    let grid = column_grid(&["2.50", "12.5", "3"]);
    let expr = FilterExpression::ContainsNumber("2.5".into());
    assert_eq!(apply(&grid, &expr), vec![0, 1]);
}

// ==================== Formatter Context ====================

struct RowEcho;

impl ColumnBehavior for RowEcho {
    fn format(&self, ctx: &FormatContext<'_>) -> FilterResult<Option<String>> {
        let source = ctx.row_data.and_then(|row| row.get("source")).unwrap_or("none");
        Ok(Some(format!("{}:{source}", ctx.content)))
    }
}

struct OtherRecords(Vec<Row>);

impl Dataset for OtherRecords {
    fn record(&self, row: RowId) -> Option<&Row> {
        self.0.iter().find(|r| r.id == row)
    }
}

#[test]
fn test_formatter_receives_source_row_view() {
    let grid = Grid::new(
        vec![Column::with_behavior("col", RowEcho)],
        vec![Row::new(0).with("col", "x").with("source", "grid")],
    );
    assert_eq!(apply(&grid, &contains(":grid")), vec![0]);
}

#[test]
fn test_formatter_prefers_dataset_record() {
    let grid = Grid::new(
        vec![Column::with_behavior("col", RowEcho)],
        vec![Row::new(0).with("col", "x").with("source", "grid")],
    );
    let dataset = OtherRecords(vec![Row::new(0).with("source", "dataset")]);

    let context = PredicateContext::new(&grid).with_dataset(Some(&dataset));
    let expr = contains(":dataset");
    let rows = PredicateEvaluator::new(&expr, &context)
        .apply(&cells(&grid))
        .unwrap();
    assert_eq!(rows, vec![0]);
}

#[test]
fn test_formatter_skipped_for_empty_content() {
    let grid = grid_with(Column::with_behavior("col", RowEcho), &["", "y"]);
    // "none" would appear in every rendering, but empty cells are not rendered.
    assert_eq!(apply(&grid, &contains("none")), vec![1]);
}

#[test]
fn test_custom_markup_stripper() {
    fn shout(s: &str) -> String {
        s.replace("<b>", "").replace("</b>", "!")
    }
    let column = Column::with_behavior("col", TemplateColumn::new("<b>{value}</b>"));
    let grid = grid_with(column, &["hey"]);

    let context = PredicateContext::new(&grid).with_markup_stripper(shout);
    let expr = contains("hey!");
    let rows = PredicateEvaluator::new(&expr, &context)
        .apply(&cells(&grid))
        .unwrap();
    assert_eq!(rows, vec![0]);
}

// ==================== Errors ====================

struct Failing;

impl ColumnBehavior for Failing {
    fn compare_value(&self, cell: &Cell<'_>, _keyword: &str) -> FilterResult<Option<ComparablePair>> {
        Err(FilterError::capability(cell.column.id(), "boom"))
    }

    fn format(&self, ctx: &FormatContext<'_>) -> FilterResult<Option<String>> {
        Err(FilterError::capability(ctx.column.id(), "render failed"))
    }
}

#[test]
fn test_capability_errors_propagate() {
    let grid = grid_with(Column::with_behavior("col", Failing), &["1"]);

    let err = try_apply(&grid, &gt("0")).unwrap_err();
    assert_eq!(err, FilterError::capability("col", "boom"));

    let err = try_apply(&grid, &contains("zzz")).unwrap_err();
    assert_eq!(err, FilterError::capability("col", "render failed"));
}

#[test]
fn test_raw_content_hit_skips_formatter() {
    let grid = grid_with(Column::with_behavior("col", Failing), &["abc"]);
    assert_eq!(apply(&grid, &contains("b")), vec![0]);
}

// ==================== Result Shape ====================

#[test]
fn test_apply_preserves_encounter_order_without_duplicates() {
    let grid = column_grid(&["1", "2", "3"]);
    let mut resolved = cells(&grid);
    resolved.reverse();
    resolved.push(grid.cell(1, "col").unwrap());

    let context = PredicateContext::new(&grid);
    let expr = FilterExpression::None;
    let rows = PredicateEvaluator::new(&expr, &context)
        .apply(&resolved)
        .unwrap();
    assert_eq!(rows, vec![2, 1, 0]);
}

#[test]
fn test_reapplying_filter_removes_nothing() {
    let grid = column_grid(&["25", "9", "40", "foo", "10"]);
    for expr in [gt("10"), contains("o"), range("9", "25"), FilterExpression::NotEquals(9.0)] {
        let first = apply(&grid, &expr);
        let context = PredicateContext::new(&grid);
        let survivors: Vec<Cell<'_>> = first
            .iter()
            .map(|&row| grid.cell(row, "col").unwrap())
            .collect();
        let second = PredicateEvaluator::new(&expr, &context)
            .apply(&survivors)
            .unwrap();
        assert_eq!(first, second, "expression {expr:?}");
    }
}
