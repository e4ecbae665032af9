//! Line breaking for OBS text sources.

/// Default line width for verse text.
pub const DEFAULT_MAX_CHARS_PER_LINE: usize = 50;

/// Break `text` into lines of at most `max_chars` characters, joined with `\n`.
///
/// Words are never split, so a single word longer than `max_chars` gets a line
/// of its own. Runs of whitespace collapse to one space. A width of zero
/// leaves the text on one line.
///
/// # Examples
///
/// ```
/// use dbs_obs::wrap_text;
///
/// assert_eq!(wrap_text("In the beginning God created", 16), "In the beginning\nGod created");
/// ```
pub fn wrap_text(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return text.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + word_len + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
