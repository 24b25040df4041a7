//! Shared utility functions

use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

/// Cut `text` to at most `max_chars` characters, appending "..." when cut.
///
/// Counts characters rather than bytes so multi-byte text is never split
/// mid-character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("hello world", 5), "hello...");
/// assert_eq!(truncate_chars("short", 10), "short");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}

/// Whether `text` is longer than `max_chars` characters
pub fn exceeds_chars(text: &str, max_chars: usize) -> bool {
    text.chars().nth(max_chars).is_some()
}

/// Terminal display width of `text` (emoji and CJK count double)
pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert!(matches!(truncate_chars("hello", 10), Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_exact_length_is_untouched() {
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert!(!exceeds_chars("hello", 5));
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_chars("hello world", 5), "hello...");
        assert!(exceeds_chars("hello world", 5));
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語...");
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
    }
}
