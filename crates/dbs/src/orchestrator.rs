//! End-to-end processing of one reference.

use crate::DbsConfig;
use dbs_core::{GeneratedImage, Passage, Reference};
use dbs_error::DbsResult;
use dbs_interface::{ImageGenerator, PromptGenerator, SceneConnector, SceneControl, ScriptureSource};
use dbs_models::GeminiClient;
use dbs_obs::{
    DEFAULT_MAX_CHARS_PER_LINE, ObsConnector, SceneBuilder, SceneTemplate, wrap_text,
};
use dbs_scripture::{ScriptureClient, parse_reference};
use dbs_storage::OutputDirectory;
use derive_getters::Getters;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// What a successful run produced, for recording in the study plan.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RunReport {
    /// Parsed reference
    reference: Reference,
    /// Section heading of the passage, possibly empty
    title: String,
    /// Images saved and placed in scenes
    images: Vec<GeneratedImage>,
}

/// Scene names and output location for a run.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RunSettings {
    /// Root for per-reference image directories
    output_root: PathBuf,
    /// Base-layer title source
    title_source: String,
    /// Base-layer reference source
    reference_source: String,
    /// Verse text line width; 0 disables wrapping
    max_chars_per_line: usize,
    /// Verse scene layout
    text_template: SceneTemplate,
    /// Illustration scene layout
    image_template: SceneTemplate,
}

impl RunSettings {
    /// Settings with the stock template and source names.
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            title_source: "Title".to_string(),
            reference_source: "ScriptureReference".to_string(),
            max_chars_per_line: DEFAULT_MAX_CHARS_PER_LINE,
            text_template: SceneTemplate::text(),
            image_template: SceneTemplate::image(),
        }
    }

    /// Override the verse text line width.
    pub fn with_max_chars_per_line(mut self, max_chars_per_line: usize) -> Self {
        self.max_chars_per_line = max_chars_per_line;
        self
    }

    /// Settings taken from configuration.
    pub fn from_config(config: &DbsConfig) -> Self {
        Self {
            output_root: config.output().root().clone(),
            title_source: config.obs().title_source().clone(),
            reference_source: config.obs().reference_source().clone(),
            max_chars_per_line: *config.obs().max_chars_per_line(),
            text_template: config.obs().text_template().clone(),
            image_template: config.obs().image_template().clone(),
        }
    }
}

/// Orchestrator wired to the live services.
pub type DbsOrchestrator = Orchestrator<ScriptureClient, GeminiClient, GeminiClient, ObsConnector>;

/// Runs the reference → scenes → illustrations pipeline.
///
/// Collaborators are injected so each can be replaced in tests.
#[derive(Debug)]
pub struct Orchestrator<S, P, I, C> {
    scripture: S,
    prompts: P,
    images: I,
    connector: C,
    settings: RunSettings,
}

impl DbsOrchestrator {
    /// Build the live pipeline from configuration.
    pub fn from_config(config: &DbsConfig) -> Self {
        let gemini = GeminiClient::new(config.gemini().clone());
        Orchestrator::new(
            ScriptureClient::new(config.scripture().base_url()),
            gemini.clone(),
            gemini,
            ObsConnector::new(
                config.obs().host(),
                *config.obs().port(),
                config.obs().password().clone(),
            ),
            RunSettings::from_config(config),
        )
    }
}

impl<S, P, I, C> Orchestrator<S, P, I, C>
where
    S: ScriptureSource,
    P: PromptGenerator,
    I: ImageGenerator,
    C: SceneConnector,
{
    /// Assemble an orchestrator.
    pub fn new(scripture: S, prompts: P, images: I, connector: C, settings: RunSettings) -> Self {
        Self {
            scripture,
            prompts,
            images,
            connector,
            settings,
        }
    }

    /// Process one free-text reference.
    ///
    /// Parsing, fetching, connecting, prompt generation and output directory
    /// creation abort the run. Base-layer updates, individual verse scenes and
    /// individual images are logged and skipped on failure. The OBS session is
    /// closed whenever it was opened.
    #[instrument(skip(self))]
    pub async fn process(&self, input: &str) -> DbsResult<RunReport> {
        let reference = parse_reference(input)?;
        info!(reference = %reference, "Parsed reference");

        let passage = self.scripture.fetch_passage(&reference).await?;
        info!(
            verses = passage.verses().len(),
            title = %passage.title(),
            "Fetched passage"
        );

        let control = self.connector.connect().await?;
        let mut scenes = SceneBuilder::with_templates(
            control,
            self.settings.text_template.clone(),
            self.settings.image_template.clone(),
        );

        let outcome = self.build_scenes(&reference, &passage, &mut scenes).await;

        if let Err(e) = scenes.close().await {
            warn!(error = %e, "Failed to disconnect from OBS");
        }

        let images = outcome?;
        info!(images = images.len(), "Generated all scenes and images");
        Ok(RunReport {
            reference,
            title: passage.title().clone(),
            images,
        })
    }

    async fn build_scenes<T: SceneControl>(
        &self,
        reference: &Reference,
        passage: &Passage,
        scenes: &mut SceneBuilder<T>,
    ) -> DbsResult<Vec<GeneratedImage>> {
        if !passage.title().is_empty() {
            if let Err(e) = scenes
                .update_text_input(&self.settings.title_source, passage.title())
                .await
            {
                warn!(source = %self.settings.title_source, error = %e, "Could not update title source");
            }
        }
        if let Err(e) = scenes
            .update_text_input(&self.settings.reference_source, &reference.to_string())
            .await
        {
            warn!(source = %self.settings.reference_source, error = %e, "Could not update reference source");
        }

        // Newest scenes list first in OBS, so create the last verse first.
        for verse in passage.verses().iter().rev() {
            let text = wrap_text(&verse.text, self.settings.max_chars_per_line);
            if let Err(e) = scenes.create_text_scene(&verse.reference, &text).await {
                warn!(scene = %verse.reference, error = %e, "Could not create verse scene");
            }
        }
        if let Some(first) = passage.verses().first() {
            scenes.set_current_scene(&first.reference).await;
        }

        let prompts = self.prompts.generate_scene_prompts(passage.text()).await?;
        let output = OutputDirectory::create(&self.settings.output_root, reference).await?;

        let mut images = Vec::new();
        for (index, prompt) in prompts.iter().enumerate() {
            info!(
                image = index + 1,
                of = prompts.len(),
                verses = %prompt.verse_range,
                description = %prompt.description,
                "Generating image"
            );

            let data = match self.images.generate_image(&prompt.image_prompt).await {
                Ok(data) => data,
                Err(e) => {
                    warn!(description = %prompt.description, error = %e, "Could not generate image");
                    continue;
                }
            };
            let path = match output.write_image(index, &data).await {
                Ok(path) => path,
                Err(e) => {
                    warn!(description = %prompt.description, error = %e, "Could not save image");
                    continue;
                }
            };

            let filename = path.to_string_lossy().into_owned();
            if let Err(e) = scenes
                .create_image_scene(&prompt.description, &filename)
                .await
            {
                warn!(scene = %prompt.description, error = %e, "Could not create image scene");
            }
            images.push(GeneratedImage {
                filename,
                verse_range: prompt.verse_range.clone(),
                description: prompt.description.clone(),
            });
        }

        Ok(images)
    }
}
