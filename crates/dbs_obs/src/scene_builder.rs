//! Template scene replication.

use dbs_error::ObsError;
use dbs_interface::SceneControl;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

/// A scene whose layout is copied and one of whose sources is replaced.
///
/// # Examples
///
/// ```
/// use dbs_obs::SceneTemplate;
///
/// let template = SceneTemplate::text();
/// assert_eq!(template.scene_name(), "Scripture-Template");
/// assert_eq!(template.source_name_for("John 3:16"), "text-John 3:16");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SceneTemplate {
    /// Scene to copy
    scene_name: String,
    /// Source in the template that gets a per-scene replacement
    source_name: String,
    /// Prefix for the replacement source's name
    source_prefix: String,
}

impl SceneTemplate {
    /// Create a template description.
    pub fn new(
        scene_name: impl Into<String>,
        source_name: impl Into<String>,
        source_prefix: impl Into<String>,
    ) -> Self {
        Self {
            scene_name: scene_name.into(),
            source_name: source_name.into(),
            source_prefix: source_prefix.into(),
        }
    }

    /// Scrolling verse text layout.
    pub fn text() -> Self {
        Self::new("Scripture-Template", "sTextScrolling", "text-")
    }

    /// Illustration layout.
    pub fn image() -> Self {
        Self::new("ImageAndDiscussion", "ScriptureIllustration", "img-")
    }

    /// Name of the replacement source in `scene_name`.
    pub fn source_name_for(&self, scene_name: &str) -> String {
        format!("{}{}", self.source_prefix, scene_name)
    }
}

/// Builds verse and illustration scenes over a control session.
#[derive(Debug)]
pub struct SceneBuilder<C> {
    control: C,
    text_template: SceneTemplate,
    image_template: SceneTemplate,
}

impl<C: SceneControl> SceneBuilder<C> {
    /// Use the default text and image templates.
    pub fn new(control: C) -> Self {
        Self::with_templates(control, SceneTemplate::text(), SceneTemplate::image())
    }

    /// Use custom templates.
    pub fn with_templates(
        control: C,
        text_template: SceneTemplate,
        image_template: SceneTemplate,
    ) -> Self {
        Self {
            control,
            text_template,
            image_template,
        }
    }

    /// Underlying session.
    pub fn control(&self) -> &C {
        &self.control
    }

    /// Give back the session.
    pub fn into_inner(self) -> C {
        self.control
    }

    /// Create `scene_name` as a copy of `template` whose replaced source
    /// carries `final_settings`.
    ///
    /// Only reading the template scene or source aborts; creating the scene,
    /// the new input or any copied item is best-effort. The final settings
    /// update is the result.
    #[instrument(skip(self, template, final_settings), fields(template = %template.scene_name))]
    pub async fn create_scene_from_template(
        &mut self,
        template: &SceneTemplate,
        scene_name: &str,
        final_settings: Value,
    ) -> Result<(), ObsError> {
        if let Err(e) = self.control.create_scene(scene_name).await {
            if e.kind.is_already_exists() {
                debug!(scene = scene_name, "Scene already exists");
            } else {
                warn!(scene = scene_name, error = %e, "Could not create scene");
            }
        }

        let items = self
            .control
            .get_scene_item_list(&template.scene_name)
            .await?;
        let base = self
            .control
            .get_input_settings(&template.source_name)
            .await?;

        let new_source = template.source_name_for(scene_name);
        if let Err(e) = self
            .control
            .create_input(
                scene_name,
                &new_source,
                &base.input_kind,
                base.input_settings,
                true,
            )
            .await
        {
            warn!(source = %new_source, error = %e, "Could not create source");
        }

        for item in items
            .iter()
            .filter(|item| item.source_name != template.source_name)
        {
            if let Err(e) = self
                .control
                .create_scene_item(scene_name, &item.source_name)
                .await
            {
                warn!(
                    source = %item.source_name,
                    scene = scene_name,
                    error = %e,
                    "Could not copy source to scene"
                );
            }
        }

        self.control
            .set_input_settings(&new_source, final_settings, true)
            .await?;
        info!(scene = scene_name, "Created scene");
        Ok(())
    }

    /// Verse scene showing `text` in the scrolling text source.
    pub async fn create_text_scene(&mut self, scene_name: &str, text: &str) -> Result<(), ObsError> {
        let template = self.text_template.clone();
        self.create_scene_from_template(&template, scene_name, json!({ "text": text }))
            .await
    }

    /// Illustration scene showing the image at `image_path`.
    pub async fn create_image_scene(
        &mut self,
        scene_name: &str,
        image_path: &str,
    ) -> Result<(), ObsError> {
        let template = self.image_template.clone();
        self.create_scene_from_template(&template, scene_name, json!({ "file": image_path }))
            .await
    }

    /// Switch program output to `scene_name`. Empty names are ignored and failures only logged.
    pub async fn set_current_scene(&mut self, scene_name: &str) {
        if scene_name.is_empty() {
            return;
        }
        info!(scene = scene_name, "Setting active scene");
        if let Err(e) = self.control.set_current_program_scene(scene_name).await {
            warn!(scene = scene_name, error = %e, "Could not set current scene");
        }
    }

    /// Replace the text of an existing text source.
    pub async fn update_text_input(&mut self, input_name: &str, text: &str) -> Result<(), ObsError> {
        self.control
            .set_input_settings(input_name, json!({ "text": text }), true)
            .await
    }

    /// Close the session.
    pub async fn close(&mut self) -> Result<(), ObsError> {
        self.control.close().await
    }
}
