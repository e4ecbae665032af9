//! Study plan store errors.

/// Study plan error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PlanErrorKind {
    /// Reference is already queued
    #[display("reference '{}' already exists in plan", _0)]
    DuplicateReference(String),
    /// Reference is not in the plan
    #[display("reference '{}' not found in plan", _0)]
    NotFound(String),
    /// Home directory could not be determined
    #[display("could not find home directory")]
    HomeDirectory,
    /// Plan file exists but could not be read
    #[display("failed to read plan file: {}", _0)]
    Read(String),
    /// Plan file could not be written
    #[display("failed to write plan file: {}", _0)]
    Write(String),
    /// Plan file is not valid plan JSON
    #[display("failed to parse plan file: {}", _0)]
    Parse(String),
}

/// Study plan error with location tracking.
///
/// # Examples
///
/// ```
/// use dbs_error::{PlanError, PlanErrorKind};
///
/// let err = PlanError::new(PlanErrorKind::NotFound("John 3:16".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Plan Error: {} at line {} in {}", kind, line, file)]
pub struct PlanError {
    /// The kind of error that occurred
    pub kind: PlanErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlanError {
    /// Create a new PlanError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlanErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
