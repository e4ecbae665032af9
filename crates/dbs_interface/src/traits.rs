//! Capability traits for the collaborators of a run.

use async_trait::async_trait;
use dbs_core::{Passage, Reference, ScenePrompt};
use dbs_error::{DbsResult, ObsError};

use crate::{InputSettings, SceneItem};

/// Source of verse text for a parsed reference.
#[async_trait]
pub trait ScriptureSource: Send + Sync {
    /// Fetch the verses of `reference`, their combined text and section title.
    async fn fetch_passage(&self, reference: &Reference) -> DbsResult<Passage>;
}

/// Text model that suggests illustrations for a passage.
#[async_trait]
pub trait PromptGenerator: Send + Sync {
    /// Ask for 1-3 illustration suggestions for the given verse text.
    async fn generate_scene_prompts(&self, passage_text: &str) -> DbsResult<Vec<ScenePrompt>>;
}

/// Image model that renders one prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image and return its raw bytes.
    async fn generate_image(&self, prompt: &str) -> DbsResult<Vec<u8>>;
}

/// Control session with the production tool.
///
/// Mirrors the handful of obs-websocket requests scene replication needs. The
/// session is stateful and single-client, so every call takes `&mut self`.
#[async_trait]
pub trait SceneControl: Send {
    /// Create an empty scene.
    async fn create_scene(&mut self, scene_name: &str) -> Result<(), ObsError>;

    /// List the sources attached to a scene, bottom to top.
    async fn get_scene_item_list(&mut self, scene_name: &str) -> Result<Vec<SceneItem>, ObsError>;

    /// Read the kind and settings of an input.
    async fn get_input_settings(&mut self, input_name: &str) -> Result<InputSettings, ObsError>;

    /// Apply settings to an input. With `overlay` the object is merged into the existing settings.
    async fn set_input_settings(
        &mut self,
        input_name: &str,
        settings: serde_json::Value,
        overlay: bool,
    ) -> Result<(), ObsError>;

    /// Create a new input and attach it to `scene_name`. Returns the new scene item id.
    async fn create_input(
        &mut self,
        scene_name: &str,
        input_name: &str,
        input_kind: &str,
        settings: serde_json::Value,
        enabled: bool,
    ) -> Result<i64, ObsError>;

    /// Attach an existing source to `scene_name`. Returns the new scene item id.
    async fn create_scene_item(
        &mut self,
        scene_name: &str,
        source_name: &str,
    ) -> Result<i64, ObsError>;

    /// Switch the program output to `scene_name`.
    async fn set_current_program_scene(&mut self, scene_name: &str) -> Result<(), ObsError>;

    /// Close the session.
    async fn close(&mut self) -> Result<(), ObsError>;
}

/// Opens control sessions. One session is opened per run.
#[async_trait]
pub trait SceneConnector: Send + Sync {
    /// Session type produced by this connector.
    type Control: SceneControl;

    /// Connect and authenticate.
    async fn connect(&self) -> Result<Self::Control, ObsError>;
}
