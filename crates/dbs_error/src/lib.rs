//! Error types for the dbs workspace.
//!
//! This crate provides the error types used by every other dbs crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use dbs_error::{DbsResult, ParseError, ParseErrorKind};
//!
//! fn parse() -> DbsResult<()> {
//!     Err(ParseError::new(ParseErrorKind::InvalidFormat("John 3 16".to_string())))?
//! }
//!
//! match parse() {
//!     Ok(_) => println!("parsed"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gemini;
mod obs;
mod parse;
mod plan;
mod scripture;
mod storage;

pub use config::ConfigError;
pub use error::{DbsError, DbsErrorKind, DbsResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use obs::{ObsError, ObsErrorKind};
pub use parse::{ParseError, ParseErrorKind};
pub use plan::{PlanError, PlanErrorKind};
pub use scripture::{ScriptureError, ScriptureErrorKind};
pub use storage::{StorageError, StorageErrorKind};
