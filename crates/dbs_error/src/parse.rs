//! Scripture reference parsing errors.

/// Reasons a free-text reference could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ParseErrorKind {
    /// Input does not look like `<book> <chapter>:<verse>[-<verse>]`
    #[display("invalid format: '{}'", _0)]
    InvalidFormat(String),
    /// Book token matched neither an abbreviation nor a canonical name
    #[display("book '{}' not found or not supported", _0)]
    UnknownBook(String),
    /// Chapter or verse field is not a usable positive number
    #[display("could not parse {} '{}'", field, value)]
    InvalidNumber {
        /// Which field failed (chapter, start verse, end verse)
        field: &'static str,
        /// The raw text of the field
        value: String,
    },
    /// End verse precedes start verse
    #[display("end verse {} is before start verse {}", end, start)]
    InvalidRange {
        /// Parsed start verse
        start: u32,
        /// Parsed end verse
        end: u32,
    },
}

/// Reference parsing error with location tracking.
///
/// # Examples
///
/// ```
/// use dbs_error::{ParseError, ParseErrorKind};
///
/// let err = ParseError::new(ParseErrorKind::UnknownBook("Judea".to_string()));
/// assert!(format!("{}", err).contains("Judea"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", kind, line, file)]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ParseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
