//! Keyword classification for per-column grid filters.
//!
//! A filter keyword is the raw text a user typed into a column's filter box.
//! The [`Classifier`] turns it into a typed [`FilterExpression`] that the
//! predicate engine can evaluate.
//!
//! # Supported Syntax
//!
//! ## Comparisons
//! - `>value` - Greater than (numeric when both sides are numbers, else text)
//! - `<value` - Less than
//! - `=number` - Numerically equal
//! - `!=number` - Numerically different
//!
//! ## Ranges
//! - `lo:hi` - Between `lo` and `hi`, inclusive (e.g. `20:30`)
//!
//! ## Numbers
//! - `number` - Cell equals the number or contains it as text
//!
//! ## Text
//! - `text` - Case-insensitive substring
//! - `two words` - Substring, or per-term matching under
//!   [`MatchStrategy::Fuzzy`] / [`MatchStrategy::Tokens`]

mod ast;
mod classifier;

pub use ast::{FilterExpression, FilterKind, MatchStrategy, UnknownStrategy};
pub use classifier::Classifier;
