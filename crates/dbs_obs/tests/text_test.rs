//! Tests for verse text line breaking.

use dbs_obs::{DEFAULT_MAX_CHARS_PER_LINE, wrap_text};

#[test]
fn test_wraps_long_text_at_word_boundaries() {
    let text = "This is a very long line of text that should definitely be wrapped into multiple lines by the formatting function.";

    let wrapped = wrap_text(text, DEFAULT_MAX_CHARS_PER_LINE);

    assert_eq!(
        wrapped,
        "This is a very long line of text that should\ndefinitely be wrapped into multiple lines by the\nformatting function."
    );
    assert!(wrapped.lines().all(|line| line.chars().count() <= 50));
}

#[test]
fn test_short_text_is_unchanged() {
    assert_eq!(wrap_text("[16] For God so loved the world", 50), "[16] For God so loved the world");
}

#[test]
fn test_line_may_fill_width_exactly() {
    // 10 + 1 + 4 = 15 characters
    assert_eq!(wrap_text("abcdefghij klmn opq", 15), "abcdefghij klmn\nopq");
}

#[test]
fn test_overlong_word_gets_own_line() {
    assert_eq!(
        wrap_text("to Mahershalalhashbaz son", 10),
        "to\nMahershalalhashbaz\nson"
    );
}

#[test]
fn test_width_counts_characters_not_bytes() {
    assert_eq!(wrap_text("éééé éééé", 9), "éééé éééé");
}

#[test]
fn test_whitespace_collapses_and_zero_width_disables() {
    assert_eq!(wrap_text("  a\n b\tc  ", 0), "a b c");
    assert_eq!(wrap_text("   ", 50), "");
}
