//! Plain-text helpers: markup stripping and word-boundary search.

use regex::Regex;

use crate::error::{FilterError, FilterResult};

/// Signature of a markup-stripping function.
///
/// Implementations must be deterministic and free of side effects.
pub type MarkupStripper = fn(&str) -> String;

/// Longest entity name (between `&` and `;`) that is considered for decoding.
const MAX_ENTITY_LEN: usize = 10;

/// Converts a rendered display string into plain comparable text.
///
/// Tags (`<b>`, `</span>`, `<!-- -->`, ...) are removed and named or numeric
/// character entities are decoded. A `<` that does not open a tag, or a tag
/// that is never closed, is kept verbatim.
///
/// ```
/// use grid_filter_rs::text::strip_markup;
///
/// assert_eq!(strip_markup("<b>Tom</b> &amp; Jerry"), "Tom & Jerry");
/// assert_eq!(strip_markup("1 < 2"), "1 < 2");
/// ```
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        if c == '<' && opens_tag(&rest[1..]) {
            if let Some(end) = rest.find('>') {
                rest = &rest[end + 1..];
                continue;
            }
        } else if c == '&' {
            if let Some((decoded, consumed)) = decode_entity(rest) {
                out.push(decoded);
                rest = &rest[consumed..];
                continue;
            }
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Checks whether the text after a `<` looks like the start of a tag.
fn opens_tag(after: &str) -> bool {
    after
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

/// Decodes an entity at the start of `s` (which begins with `&`).
///
/// Returns the decoded character and the number of bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    // Only the first MAX_ENTITY_LEN bytes after `&` can hold the `;`.
    let window = s.as_bytes().get(1..).unwrap_or_default();
    let window = &window[..window.len().min(MAX_ENTITY_LEN + 1)];
    let semi = window.iter().position(|&b| b == b';')? + 1;
    let name = &s[1..semi];
    if name.is_empty() {
        return None;
    }

    let decoded = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(|c| c == 'x' || c == 'X') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        }
    };

    Some((decoded, semi + 1))
}

/// A term that must occur as a whole word.
///
/// Boundaries are regex `\b` boundaries: a word character (Unicode
/// alphanumeric or `_`) on one side and a non-word character or either end of
/// the text on the other. `"cat"` is found in `"cat show"` and `"the cat."`
/// but not in `"category"`.
#[derive(Debug, Clone)]
pub struct WordPattern {
    regex: Regex,
}

impl WordPattern {
    /// Compiles `word` into a whole-word pattern; the word is matched literally.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Pattern`] if the pattern exceeds the regex
    /// engine's size limits.
    pub fn new(word: &str) -> FilterResult<Self> {
        Regex::new(&format!(r"\b{}\b", regex::escape(word)))
            .map(|regex| Self { regex })
            .map_err(|e| FilterError::pattern(word, e.to_string()))
    }

    /// Returns true if the word occurs in `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

/// Splits a filter operand into its whitespace-separated terms.
pub fn terms(operand: &str) -> impl Iterator<Item = &str> {
    operand.split_whitespace()
}
