//! Ready-made column behaviors.
//!
//! - [`DateColumn`] - chronological ordering for `>` / `<` / ranges
//! - [`TemplateColumn`] - markup formatter with `{value}` and `{row.<field>}` placeholders
//! - [`MemoizedFormat`] - caches another behavior's rendering per (row, column, content, filter)

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::cell::{Cell, ColumnBehavior, FormatContext, RowId};
use crate::error::{FilterError, FilterResult};
use crate::expression::FilterKind;
use crate::predicate::ComparablePair;

/// Default date format for [`DateColumn`].
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Compares cells and operands as calendar dates.
///
/// When both the cell content and the operand parse with the configured
/// format, they are compared as day numbers. Otherwise the default
/// numeric-or-text comparison applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumn {
    format: String,
}

impl DateColumn {
    /// Creates a date column using a `chrono` format string.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// Returns the configured format string.
    pub fn format_str(&self) -> &str {
        &self.format
    }

    fn parse(&self, s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), &self.format).ok()
    }
}

impl Default for DateColumn {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl ColumnBehavior for DateColumn {
    fn compare_value(&self, cell: &Cell<'_>, keyword: &str) -> FilterResult<Option<ComparablePair>> {
        let (Some(value), Some(bound)) = (self.parse(cell.content), self.parse(keyword)) else {
            return Ok(None);
        };
        Ok(Some(ComparablePair::numeric(
            day_number(value),
            day_number(bound),
        )))
    }
}

fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Renders cells through a markup template.
///
/// `{value}` is replaced by the cell content and `{row.<field>}` by another
/// value of the same row (empty when the row record is unavailable).
/// Any other placeholder, or an unclosed `{`, is a capability error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateColumn {
    template: String,
}

impl TemplateColumn {
    /// Creates a template column.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Returns the template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Expands the template for one cell.
    pub fn render(&self, ctx: &FormatContext<'_>) -> FilterResult<String> {
        let mut out = String::with_capacity(self.template.len() + ctx.content.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                FilterError::capability(
                    ctx.column.id(),
                    format!("unterminated placeholder in template {:?}", self.template),
                )
            })?;

            let name = after[..close].trim();
            if name == "value" {
                out.push_str(ctx.content);
            } else if let Some(field) = name.strip_prefix("row.") {
                out.push_str(ctx.row_data.and_then(|row| row.get(field)).unwrap_or(""));
            } else {
                return Err(FilterError::capability(
                    ctx.column.id(),
                    format!("unknown placeholder {{{name}}}"),
                ));
            }

            rest = &after[close + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

impl ColumnBehavior for TemplateColumn {
    fn format(&self, ctx: &FormatContext<'_>) -> FilterResult<Option<String>> {
        self.render(ctx).map(Some)
    }
}

type FormatKey = (RowId, String, String, FilterKind, String);

/// Memoizes the `format` output of another behavior.
///
/// Entries are keyed by (row, column, content, filter expression); errors
/// are not cached. Other fields of the row record are not part of the key, so
/// a formatter that reads them needs [`clear`](Self::clear) after they change.
#[derive(Debug, Default)]
pub struct MemoizedFormat<B> {
    inner: B,
    cache: RefCell<HashMap<FormatKey, Option<String>>>,
}

impl<B> MemoizedFormat<B> {
    /// Wraps `inner`.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of cached renderings.
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Drops every cached rendering.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}

impl<B: ColumnBehavior> ColumnBehavior for MemoizedFormat<B> {
    fn compare_value(&self, cell: &Cell<'_>, keyword: &str) -> FilterResult<Option<ComparablePair>> {
        self.inner.compare_value(cell, keyword)
    }

    fn format(&self, ctx: &FormatContext<'_>) -> FilterResult<Option<String>> {
        let key = (
            ctx.row,
            ctx.column.id().to_string(),
            ctx.content.to_string(),
            ctx.filter.kind(),
            ctx.filter.to_string(),
        );

        let cached = self.cache.borrow().get(&key).cloned();
        if let Some(hit) = cached {
            return Ok(hit);
        }

        let rendered = self.inner.format(ctx)?;
        self.cache.borrow_mut().insert(key, rendered.clone());
        Ok(rendered)
    }
}
