//! Comparable values for ordering predicates.

use std::cmp::Ordering;

use crate::numeric::parse_number;

/// A value in a comparable representation.
///
/// Ordering is only defined between values of the same tag: numbers compare
/// numerically, text compares lexicographically by code point. A number and a
/// text value are unordered, so every ordering predicate fails for them.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparableValue {
    /// A finite number.
    Numeric(f64),
    /// Plain text.
    Text(String),
}

impl ComparableValue {
    /// Interprets a filter operand: numeric if it parses, text otherwise.
    pub fn from_operand(operand: &str) -> Self {
        match parse_number(operand) {
            Some(value) => ComparableValue::Numeric(value),
            None => ComparableValue::Text(operand.to_string()),
        }
    }
}

impl PartialOrd for ComparableValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (ComparableValue::Numeric(a), ComparableValue::Numeric(b)) => a.partial_cmp(b),
            (ComparableValue::Text(a), ComparableValue::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// A (cell value, filter operand) pair fed to ordering predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparablePair {
    /// The cell's comparable value.
    pub left: ComparableValue,
    /// The filter operand's comparable value.
    pub right: ComparableValue,
}

impl ComparablePair {
    /// Creates a new pair.
    pub fn new(left: ComparableValue, right: ComparableValue) -> Self {
        Self { left, right }
    }

    /// Creates a numeric pair.
    pub fn numeric(left: f64, right: f64) -> Self {
        Self::new(ComparableValue::Numeric(left), ComparableValue::Numeric(right))
    }
}
