//! Structured scripture references.

use dbs_error::{ParseError, ParseErrorKind};
use serde::Serialize;

/// A parsed scripture passage location: book, chapter and inclusive verse range.
///
/// Fields are private so a `Reference` cannot be edited after construction and
/// `end_verse >= start_verse` always holds.
///
/// # Examples
///
/// ```
/// use dbs_core::Reference;
///
/// let reference = Reference::new("John", 3, 16, 17).unwrap();
/// assert_eq!(reference.to_string(), "John 3:16-17");
/// assert_eq!(*reference.end_verse(), 17);
///
/// assert!(Reference::new("John", 3, 17, 16).is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_getters::Getters,
)]
pub struct Reference {
    /// Canonical book name, e.g. "1 Corinthians"
    book: String,
    /// Chapter number (1-based)
    chapter: u32,
    /// First verse in the range (1-based)
    start_verse: u32,
    /// Last verse in the range, inclusive
    end_verse: u32,
}

impl Reference {
    /// Build a reference, validating that numbers are positive and the range is ordered.
    #[track_caller]
    pub fn new(
        book: impl Into<String>,
        chapter: u32,
        start_verse: u32,
        end_verse: u32,
    ) -> Result<Self, ParseError> {
        if chapter == 0 {
            return Err(ParseError::new(ParseErrorKind::InvalidNumber {
                field: "chapter",
                value: chapter.to_string(),
            }));
        }
        if start_verse == 0 {
            return Err(ParseError::new(ParseErrorKind::InvalidNumber {
                field: "start verse",
                value: start_verse.to_string(),
            }));
        }
        if end_verse < start_verse {
            return Err(ParseError::new(ParseErrorKind::InvalidRange {
                start: start_verse,
                end: end_verse,
            }));
        }

        Ok(Self {
            book: book.into(),
            chapter,
            start_verse,
            end_verse,
        })
    }

    /// True when the reference covers exactly one verse.
    pub fn is_single_verse(&self) -> bool {
        self.start_verse == self.end_verse
    }

    /// True when `verse` falls inside the inclusive range.
    pub fn contains(&self, verse: u32) -> bool {
        (self.start_verse..=self.end_verse).contains(&verse)
    }

    /// Label for one verse of this passage, e.g. `John 3:16`.
    pub fn verse_label(&self, verse: u32) -> String {
        format!("{} {}:{}", self.book, self.chapter, verse)
    }

    /// Directory name for generated media, e.g. `1_Samuel_23_1-5`.
    ///
    /// Always includes the range so separate passages of a chapter never overwrite each other.
    pub fn output_dir_name(&self) -> String {
        format!(
            "{}_{}_{}-{}",
            self.book.replace(' ', "_"),
            self.chapter,
            self.start_verse,
            self.end_verse
        )
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_single_verse() {
            write!(f, "{} {}:{}", self.book, self.chapter, self.start_verse)
        } else {
            write!(
                f,
                "{} {}:{}-{}",
                self.book, self.chapter, self.start_verse, self.end_verse
            )
        }
    }
}
