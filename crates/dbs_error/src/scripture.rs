//! Scripture API errors.

/// Scripture retrieval error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ScriptureErrorKind {
    /// Canonical book has no external API identifier
    #[display("book '{}' does not have a corresponding API ID", _0)]
    UnsupportedBook(String),
    /// Transport failure talking to the scripture API
    #[display("failed to make API request: {}", _0)]
    Network(String),
    /// Scripture API answered with a non-success status
    #[display("API returned non-success status {} for {}", status_code, url)]
    Upstream {
        /// HTTP status code
        status_code: u16,
        /// Requested URL
        url: String,
    },
    /// Response body did not match the expected chapter shape
    #[display("failed to decode API response: {}", _0)]
    MalformedResponse(String),
    /// Requested verse range has no overlap with the chapter
    #[display("no verses found for reference {}", _0)]
    NoVersesFound(String),
}

/// Scripture error with location tracking.
///
/// # Examples
///
/// ```
/// use dbs_error::{ScriptureError, ScriptureErrorKind};
///
/// let err = ScriptureError::new(ScriptureErrorKind::NoVersesFound("John 3:40".to_string()));
/// assert!(format!("{}", err).contains("no verses found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scripture Error: {} at line {} in {}", kind, line, file)]
pub struct ScriptureError {
    /// The kind of error that occurred
    pub kind: ScriptureErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ScriptureError {
    /// Create a new ScriptureError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScriptureErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
