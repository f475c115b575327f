//! Typed filter expressions produced by the classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A classified per-column filter keyword.
///
/// Each variant carries its operand in the shape its predicate needs. Text
/// operands of `Contains`, `Fuzzy` and `Tokens` are already lowercased.
/// Ordering operands (`GreaterThan`, `LessThan`, `Range`) keep the raw text;
/// numeric coercion happens at predicate time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "operand", rename_all = "camelCase")]
pub enum FilterExpression {
    /// No filter: every row passes.
    None,

    /// Case-insensitive substring match.
    Contains(String),

    /// Every whitespace-separated term must occur as a substring.
    Fuzzy(String),

    /// Every whitespace-separated term must occur as a whole word.
    Tokens(String),

    /// Cell value strictly greater than the operand.
    GreaterThan(String),

    /// Cell value strictly less than the operand.
    LessThan(String),

    /// Numeric cell content equal to the operand.
    Equals(f64),

    /// Numeric cell content different from the operand.
    NotEquals(f64),

    /// Inclusive range, bounds in the order they were written.
    Range(String, String),

    /// Numeric equality or textual containment of the operand.
    ContainsNumber(String),
}

impl FilterExpression {
    /// Returns the kind tag of this expression.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterExpression::None => FilterKind::None,
            FilterExpression::Contains(_) => FilterKind::Contains,
            FilterExpression::Fuzzy(_) => FilterKind::Fuzzy,
            FilterExpression::Tokens(_) => FilterKind::Tokens,
            FilterExpression::GreaterThan(_) => FilterKind::GreaterThan,
            FilterExpression::LessThan(_) => FilterKind::LessThan,
            FilterExpression::Equals(_) => FilterKind::Equals,
            FilterExpression::NotEquals(_) => FilterKind::NotEquals,
            FilterExpression::Range(_, _) => FilterKind::Range,
            FilterExpression::ContainsNumber(_) => FilterKind::ContainsNumber,
        }
    }

    /// Returns true if this expression excludes nothing by construction.
    pub fn is_none(&self) -> bool {
        matches!(self, FilterExpression::None)
    }
}

/// Renders the expression back into keyword syntax.
///
/// Re-classifying the rendered keyword with the same strategy yields an
/// equal expression, except that text operands stay lowercased.
impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::None => Ok(()),
            FilterExpression::Contains(s)
            | FilterExpression::Fuzzy(s)
            | FilterExpression::Tokens(s)
            | FilterExpression::ContainsNumber(s) => write!(f, "{s}"),
            FilterExpression::GreaterThan(s) => write!(f, ">{s}"),
            FilterExpression::LessThan(s) => write!(f, "<{s}"),
            FilterExpression::Equals(v) => write!(f, "={v}"),
            FilterExpression::NotEquals(v) => write!(f, "!={v}"),
            FilterExpression::Range(lo, hi) => write!(f, "{lo}:{hi}"),
        }
    }
}

/// Kind tag of a [`FilterExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    None,
    Contains,
    Fuzzy,
    Tokens,
    GreaterThan,
    LessThan,
    Equals,
    NotEquals,
    Range,
    ContainsNumber,
}

impl FilterKind {
    /// Returns the kind name as used in logs and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Contains => "contains",
            FilterKind::Fuzzy => "fuzzy",
            FilterKind::Tokens => "tokens",
            FilterKind::GreaterThan => "greaterThan",
            FilterKind::LessThan => "lessThan",
            FilterKind::Equals => "equals",
            FilterKind::NotEquals => "notEquals",
            FilterKind::Range => "range",
            FilterKind::ContainsNumber => "containsNumber",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host-configured handling of multi-word keywords.
///
/// Only keywords containing whitespace that match no more specific rule are
/// affected; everything else classifies the same under every strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Plain substring match of the whole keyword.
    #[default]
    Default,
    /// Substring match per term.
    Fuzzy,
    /// Whole-word match per term.
    Tokens,
}

impl MatchStrategy {
    /// Returns the strategy name as written in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::Default => "default",
            MatchStrategy::Fuzzy => "fuzzy",
            MatchStrategy::Tokens => "tokens",
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`MatchStrategy`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown match strategy: {0} (expected default, fuzzy or tokens)")]
pub struct UnknownStrategy(pub String);

impl FromStr for MatchStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" | "contains" => Ok(MatchStrategy::Default),
            "fuzzy" => Ok(MatchStrategy::Fuzzy),
            "tokens" => Ok(MatchStrategy::Tokens),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}
