//! obs-websocket error types.

/// obs-websocket error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ObsErrorKind {
    /// WebSocket connection failed
    #[display("WebSocket connection failed: {}", _0)]
    Connection(String),
    /// Hello/Identify handshake failed
    #[display("obs-websocket handshake failed: {}", _0)]
    Handshake(String),
    /// Server rejected the password (or none was configured)
    #[display("obs-websocket authentication failed: {}", _0)]
    Authentication(String),
    /// Request was answered with a non-success status
    #[display("{} failed with status {}: {}", request_type, code, comment)]
    Request {
        /// Request type, e.g. `CreateScene`
        request_type: String,
        /// obs-websocket status code
        code: u16,
        /// Comment from the server, possibly empty
        comment: String,
    },
    /// Server sent a frame that could not be decoded
    #[display("Invalid server message: {}", _0)]
    InvalidMessage(String),
    /// Connection closed while waiting for a response
    #[display("Connection closed: {}", _0)]
    Closed(String),
}

impl ObsErrorKind {
    /// obs-websocket status code for "resource already exists".
    pub const RESOURCE_ALREADY_EXISTS: u16 = 601;

    /// True when the server reported that the target already exists.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            ObsErrorKind::Request { code, .. } if *code == Self::RESOURCE_ALREADY_EXISTS
        )
    }
}

/// obs-websocket error with source location tracking.
///
/// # Examples
///
/// ```
/// use dbs_error::{ObsError, ObsErrorKind};
///
/// let err = ObsError::new(ObsErrorKind::Request {
///     request_type: "CreateScene".to_string(),
///     code: 601,
///     comment: "exists".to_string(),
/// });
/// assert!(err.kind.is_already_exists());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("OBS Error: {} at line {} in {}", kind, line, file)]
pub struct ObsError {
    /// The kind of error that occurred
    pub kind: ObsErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ObsError {
    /// Create a new ObsError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ObsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
