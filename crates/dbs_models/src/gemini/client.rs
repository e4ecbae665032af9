//! Gemini REST client.

use super::dto::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use super::image::extract_image;
use super::prompt::{parse_scene_prompts, render_scene_prompt, scene_prompt_schema};
use async_trait::async_trait;
use dbs_core::ScenePrompt;
use dbs_error::{DbsResult, GeminiError, GeminiErrorKind};
use dbs_interface::{ImageGenerator, PromptGenerator};
use derive_getters::Getters;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Public Gemini endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used for scene prompt suggestions.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
/// Model used for illustrations.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

const SCENE_PROMPT_TEMPERATURE: f32 = 0.2;

/// Connection settings for [`GeminiClient`].
///
/// # Examples
///
/// ```
/// use dbs_models::{GeminiConfig, DEFAULT_TEXT_MODEL};
///
/// let config = GeminiConfig::builder()
///     .api_key(Some("test-key".to_string()))
///     .build()
///     .unwrap();
/// assert_eq!(config.text_model(), DEFAULT_TEXT_MODEL);
/// ```
#[derive(
    Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key; requests fail with `MissingApiKey` when absent
    api_key: Option<String>,
    /// REST base URL
    base_url: String,
    /// Text model for scene prompts
    text_model: String,
    /// Image model for illustrations
    image_model: String,
}

impl GeminiConfig {
    /// Creates a new builder for `GeminiConfig`.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

/// Gemini client for scene prompts and illustrations.
///
/// # Example
///
/// ```no_run
/// use dbs_models::{GeminiClient, GeminiConfig};
/// use dbs_interface::PromptGenerator;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClient::new(GeminiConfig::default());
/// let prompts = client
///     .generate_scene_prompts("[16] For God so loved the world")
///     .await?;
/// for prompt in prompts {
///     println!("{}: {}", prompt.verse_range, prompt.description);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client from settings.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str, GeminiError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))
    }

    /// Send one `generateContent` call to `model`.
    #[instrument(skip(self, request))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        );
        debug!(url = %url, "Sending Gemini API request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                GeminiError::new(GeminiErrorKind::ApiRequest(format!(
                    "Request failed: {}",
                    e
                )))
            })?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message,
            }));
        }

        response.json().await.map_err(|e| {
            GeminiError::new(GeminiErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }
}

fn build_error(e: impl std::fmt::Display) -> GeminiError {
    GeminiError::new(GeminiErrorKind::Builder(e.to_string()))
}

#[async_trait]
impl PromptGenerator for GeminiClient {
    #[instrument(skip(self, passage_text), fields(model = %self.config.text_model))]
    async fn generate_scene_prompts(&self, passage_text: &str) -> DbsResult<Vec<ScenePrompt>> {
        let generation_config = GenerationConfig::builder()
            .temperature(SCENE_PROMPT_TEMPERATURE)
            .response_mime_type("application/json")
            .response_schema(scene_prompt_schema())
            .build()
            .map_err(build_error)?;
        let request = GenerateContentRequest::builder()
            .contents(vec![Content::user_text(render_scene_prompt(passage_text))])
            .generation_config(generation_config)
            .build()
            .map_err(build_error)?;

        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;
        let text = response.first_text().ok_or_else(|| {
            GeminiError::new(GeminiErrorKind::MalformedResponse(
                "response has no text part".to_string(),
            ))
        })?;

        let prompts = parse_scene_prompts(text)?;
        debug!(count = prompts.len(), "Received scene prompts");
        Ok(prompts)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.image_model))]
    async fn generate_image(&self, prompt: &str) -> DbsResult<Vec<u8>> {
        let generation_config = GenerationConfig::builder()
            .response_modalities(vec!["TEXT".to_string(), "IMAGE".to_string()])
            .build()
            .map_err(build_error)?;
        let request = GenerateContentRequest::builder()
            .contents(vec![Content::user_text(prompt)])
            .generation_config(generation_config)
            .build()
            .map_err(build_error)?;

        let response = self
            .generate_content(&self.config.image_model, &request)
            .await?;
        let bytes = extract_image(&response)?;
        debug!(bytes = bytes.len(), "Received image");
        Ok(bytes)
    }
}
