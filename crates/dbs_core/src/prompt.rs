//! Illustration suggestions returned by the text model.

use serde::{Deserialize, Serialize};

/// One suggested illustration for a passage.
///
/// Field names are part of the JSON contract with the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePrompt {
    /// Verse or verses it applies to, e.g. "16" or "17-18"
    pub verse_range: String,
    /// Short 3-5 word description, used as the scene name
    pub description: String,
    /// Detailed prompt for the image model
    pub image_prompt: String,
}
