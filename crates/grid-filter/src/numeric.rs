//! Numeric-string test used by both the classifier and the predicates.

/// Parses `s` as a finite decimal number.
///
/// The string is trimmed first and must parse in its entirety; partial
/// prefixes such as `"12abc"` are rejected, as are `inf` and `NaN`.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns true if `s` is a finite decimal number after trimming.
pub fn is_numeric(s: &str) -> bool {
    parse_number(s).is_some()
}
