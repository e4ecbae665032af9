//! Trait definitions for dbs.
//!
//! The orchestrator only talks to its collaborators through these traits, so
//! every external service (scripture API, Gemini, OBS) can be replaced by a
//! mock in tests.

mod traits;
mod types;

pub use traits::{ImageGenerator, PromptGenerator, SceneConnector, SceneControl, ScriptureSource};
pub use types::{InputSettings, SceneItem};
