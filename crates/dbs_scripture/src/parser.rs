//! Free-text reference parsing.

use crate::books::canonical_book;
use dbs_core::Reference;
use dbs_error::{ParseError, ParseErrorKind};
use regex::Regex;
use std::sync::LazyLock;

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d?\s?[a-z.]+(?:\s+of\s+[a-z]+)?)\s+(\d+):(\d+)(?:-(\d+))?$")
        .expect("Valid reference regex")
});

/// Parse `<book> <chapter>:<verse>[-<verse>]` into a [`Reference`].
///
/// Leading and trailing whitespace is ignored and matching is
/// case-insensitive. The book token is resolved through the abbreviation
/// table first, then against canonical names.
///
/// # Examples
///
/// ```
/// use dbs_scripture::parse_reference;
///
/// let reference = parse_reference("1 cor 13:4-7").unwrap();
/// assert_eq!(reference.book(), "1 Corinthians");
/// assert_eq!(reference.to_string(), "1 Corinthians 13:4-7");
/// ```
#[tracing::instrument(level = "debug")]
pub fn parse_reference(input: &str) -> Result<Reference, ParseError> {
    let trimmed = input.trim();
    let captures = REFERENCE_PATTERN
        .captures(trimmed)
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidFormat(trimmed.to_string())))?;

    let token = &captures[1];
    let book = canonical_book(token)
        .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownBook(token.trim().to_string())))?;

    let chapter = parse_number("chapter", &captures[2])?;
    let start_verse = parse_number("start verse", &captures[3])?;
    let end_verse = match captures.get(4) {
        Some(end) => parse_number("end verse", end.as_str())?,
        None => start_verse,
    };

    Reference::new(book, chapter, start_verse, end_verse)
}

fn parse_number(field: &'static str, value: &str) -> Result<u32, ParseError> {
    value.parse().map_err(|_| {
        ParseError::new(ParseErrorKind::InvalidNumber {
            field,
            value: value.to_string(),
        })
    })
}
