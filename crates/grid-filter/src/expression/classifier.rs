//! Fixed-priority classifier for per-column filter keywords.

use log::trace;

use super::ast::{FilterExpression, MatchStrategy};
use crate::numeric::{is_numeric, parse_number};

/// Classifier for grid filter keywords.
///
/// Keywords are matched against an ordered list of rules; the first rule that
/// applies decides the expression. Classification never fails: anything that
/// looks like no operator becomes a substring match.
///
/// # Grammar (in priority order)
///
/// ```text
/// ""                   -> None
/// ">" rest             -> GreaterThan(rest)        rest non-empty
/// "<" rest             -> LessThan(rest)           rest non-empty
/// "=" number           -> Equals(number)
/// [><=!]? number       -> ContainsNumber(number)
/// "!=" number          -> NotEquals(number)
/// number ":" number    -> Range(lo, hi)            exactly one ':'
/// word (ws word)+      -> Fuzzy | Tokens           per MatchStrategy
/// anything else        -> Contains(lowercased)
/// ```
///
/// # Example
///
/// ```
/// use grid_filter_rs::expression::{Classifier, FilterExpression, MatchStrategy};
///
/// let expr = Classifier::classify("=5", MatchStrategy::Default);
/// assert_eq!(expr, FilterExpression::Equals(5.0));
///
/// let expr = Classifier::classify("1:10", MatchStrategy::Default);
/// assert_eq!(expr, FilterExpression::Range("1".into(), "10".into()));
/// ```
pub struct Classifier;

impl Classifier {
    /// Classifies a raw keyword into a [`FilterExpression`].
    ///
    /// The keyword is trimmed before any rule is applied.
    pub fn classify(keyword: &str, strategy: MatchStrategy) -> FilterExpression {
        let expression = Self::classify_trimmed(keyword.trim(), strategy);
        trace!("classified {keyword:?} as {:?}", expression);
        expression
    }

    fn classify_trimmed(keyword: &str, strategy: MatchStrategy) -> FilterExpression {
        if keyword.is_empty() {
            return FilterExpression::None;
        }

        if let Some(rest) = non_empty_remainder(keyword, '>') {
            return FilterExpression::GreaterThan(rest.to_string());
        }

        if let Some(rest) = non_empty_remainder(keyword, '<') {
            return FilterExpression::LessThan(rest.to_string());
        }

        if let Some(value) = keyword.strip_prefix('=').and_then(parse_number) {
            return FilterExpression::Equals(value);
        }

        let bare = keyword
            .strip_prefix(['>', '<', '=', '!'].as_slice())
            .unwrap_or(keyword);
        if is_numeric(bare) {
            return FilterExpression::ContainsNumber(bare.trim().to_string());
        }

        if let Some(value) = keyword.strip_prefix("!=").and_then(parse_number) {
            return FilterExpression::NotEquals(value);
        }

        if let Some((lo, hi)) = numeric_range(keyword) {
            return FilterExpression::Range(lo.to_string(), hi.to_string());
        }

        let lowered = keyword.to_lowercase();
        let multi_word = keyword.contains(char::is_whitespace);

        match strategy {
            MatchStrategy::Fuzzy if multi_word => FilterExpression::Fuzzy(lowered),
            MatchStrategy::Tokens if multi_word => FilterExpression::Tokens(lowered),
            _ => FilterExpression::Contains(lowered),
        }
    }
}

/// Strips `prefix` and returns the trimmed remainder if it is non-empty.
fn non_empty_remainder(keyword: &str, prefix: char) -> Option<&str> {
    keyword
        .strip_prefix(prefix)
        .map(str::trim)
        .filter(|rest| !rest.is_empty())
}

/// Splits `lo:hi` where both trimmed bounds are numeric.
fn numeric_range(keyword: &str) -> Option<(&str, &str)> {
    let (lo, hi) = keyword.split_once(':')?;
    if hi.contains(':') {
        return None;
    }

    let (lo, hi) = (lo.trim(), hi.trim());
    (is_numeric(lo) && is_numeric(hi)).then_some((lo, hi))
}
