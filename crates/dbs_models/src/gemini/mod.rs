//! Google Gemini REST implementation.

mod client;
mod dto;
mod image;
mod prompt;

pub use client::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient, GeminiConfig,
    GeminiConfigBuilder,
};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentRequestBuilder,
    GenerateContentResponse, GenerationConfig, GenerationConfigBuilder, InlineData, Part,
    PromptFeedback,
};
pub use image::extract_image;
pub use prompt::{
    MAX_SCENE_PROMPTS, SCENE_PROMPT_TEMPLATE, SCENE_PROMPT_TEMPLATE_VERSION, parse_scene_prompts,
    render_scene_prompt, scene_prompt_schema,
};
