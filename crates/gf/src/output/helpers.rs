//! Common helper functions for output formatting.

/// Default maximum displayed cell width.
pub const DEFAULT_MAX_WIDTH: usize = 40;

/// Truncates a string to at most `max_len` characters, ending in `...` when cut.
///
/// Counts characters, not bytes, so multi-byte text never splits mid-character.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Pads `s` with spaces to `width` characters.
pub fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

/// Collapses line breaks and tabs so a value stays on one table line.
pub fn single_line(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect()
}
