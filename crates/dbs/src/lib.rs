//! dbs - scripture passages to OBS scenes.
//!
//! Given a reference such as `John 3:16-18`, dbs fetches the verses, builds
//! one OBS scene per verse from a template, asks Gemini for a few
//! illustration ideas, renders them, and builds one OBS scene per image.
//! A JSON study plan queues references to work through.
//!
//! # Architecture
//!
//! dbs is organized as a workspace with focused crates:
//!
//! - `dbs_error` - Error types
//! - `dbs_core` - Data model (Reference, Passage, StudyItem, ...)
//! - `dbs_interface` - Capability traits for the services a run talks to
//! - `dbs_scripture` - Reference parsing and the Bible API client
//! - `dbs_models` - Gemini prompt and image generation
//! - `dbs_obs` - obs-websocket client and template scene replication
//! - `dbs_storage` - Output directories for generated images
//! - `dbs_planner` - Study plan file
//!
//! This crate adds configuration and the orchestrator, and re-exports the
//! rest for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod orchestrator;

pub use config::{DbsConfig, ObsSettings, OutputSettings, PlanSettings, ScriptureSettings};
pub use orchestrator::{DbsOrchestrator, Orchestrator, RunReport, RunSettings};

pub use dbs_core::*;
pub use dbs_error::*;
pub use dbs_interface::*;
pub use dbs_models::{GeminiClient, GeminiConfig};
pub use dbs_obs::{ObsClient, ObsConnector, SceneBuilder, SceneTemplate};
pub use dbs_planner::{StudyPlan, default_plan_path};
pub use dbs_scripture::{ScriptureClient, parse_reference};
pub use dbs_storage::OutputDirectory;
