//! Request and response shapes shared by scene-control implementations.

use serde::{Deserialize, Serialize};

/// One source attached to a scene, as reported by `GetSceneItemList`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItem {
    /// Numeric id of the item within its scene
    pub scene_item_id: i64,
    /// Name of the source the item refers to
    pub source_name: String,
    /// Stacking position (0 = bottom)
    #[serde(default)]
    pub scene_item_index: i64,
}

/// Kind and settings of an input, as reported by `GetInputSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSettings {
    /// Input kind, e.g. `text_ft2_source_v2` or `image_source`
    pub input_kind: String,
    /// Settings object of the input
    pub input_settings: serde_json::Value,
}
