//! Top-level error wrapper types.

use crate::{
    ConfigError, GeminiError, ObsError, ParseError, PlanError, ScriptureError, StorageError,
};

/// Every error a dbs operation can surface.
///
/// # Examples
///
/// ```
/// use dbs_error::{DbsError, DbsErrorKind, PlanError, PlanErrorKind};
///
/// let err: DbsError = PlanError::new(PlanErrorKind::HomeDirectory).into();
/// assert!(matches!(err.kind(), DbsErrorKind::Plan(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum DbsErrorKind {
    /// Reference parsing error
    #[from(ParseError)]
    Parse(ParseError),
    /// Scripture API error
    #[from(ScriptureError)]
    Scripture(ScriptureError),
    /// Gemini error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// obs-websocket error
    #[from(ObsError)]
    Obs(ObsError),
    /// Study plan error
    #[from(PlanError)]
    Plan(PlanError),
    /// Generated media storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// dbs error with kind discrimination.
///
/// # Examples
///
/// ```
/// use dbs_error::{ConfigError, DbsResult};
///
/// fn might_fail() -> DbsResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("dbs Error: {}", _0)]
pub struct DbsError(Box<DbsErrorKind>);

impl DbsError {
    /// Create a new error from a kind.
    pub fn new(kind: DbsErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DbsErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to DbsErrorKind
impl<T> From<T> for DbsError
where
    T: Into<DbsErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for dbs operations.
pub type DbsResult<T> = std::result::Result<T, DbsError>;
