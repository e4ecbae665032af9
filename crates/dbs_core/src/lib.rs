//! Core data types for dbs.
//!
//! This crate provides the data model shared by the scripture, model, obs and
//! planner crates.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod passage;
mod prompt;
mod reference;
mod study;

pub use passage::{Passage, Verse};
pub use prompt::ScenePrompt;
pub use reference::Reference;
pub use study::{GeneratedImage, StudyItem, StudyStatus};
