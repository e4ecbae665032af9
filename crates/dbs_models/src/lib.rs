//! Generative model clients for dbs.
//!
//! Currently a single provider: Google Gemini over its REST
//! `generateContent` endpoint. [`GeminiClient`] implements both
//! [`PromptGenerator`](dbs_interface::PromptGenerator) and
//! [`ImageGenerator`](dbs_interface::ImageGenerator).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{
    Candidate, Content, DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL,
    GeminiClient, GeminiConfig, GeminiConfigBuilder, GenerateContentRequest,
    GenerateContentRequestBuilder, GenerateContentResponse, GenerationConfig,
    GenerationConfigBuilder, InlineData, MAX_SCENE_PROMPTS, Part, PromptFeedback,
    SCENE_PROMPT_TEMPLATE, SCENE_PROMPT_TEMPLATE_VERSION, extract_image, parse_scene_prompts,
    render_scene_prompt, scene_prompt_schema,
};
