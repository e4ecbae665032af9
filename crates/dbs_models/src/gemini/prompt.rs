//! Scene prompt template, response schema and output validation.

use dbs_core::ScenePrompt;
use dbs_error::{GeminiError, GeminiErrorKind};
use serde_json::{Value, json};

/// Bumped whenever [`SCENE_PROMPT_TEMPLATE`] or [`scene_prompt_schema`] changes.
pub const SCENE_PROMPT_TEMPLATE_VERSION: u32 = 2;

/// Most illustrations requested for one passage.
pub const MAX_SCENE_PROMPTS: usize = 3;

/// Instructions sent to the text model. `{passage}` is replaced with the verse text.
pub const SCENE_PROMPT_TEMPLATE: &str = r#"Read the Bible passage below and pick 1 to 3 key moments or themes that would work well as an illustration.
Return a JSON array. Each element is an object with exactly these string fields:
- "verse_range": the verse or verses the moment covers, for example "16" or "17-18".
- "description": a 3-5 word title usable as a scene name, for example "God's Love for the World".
- "image_prompt": a detailed prompt for an image model describing the subject, setting, mood, artistic style (for example "cinematic, dramatic lighting") and composition.

Bible Text:
---
{passage}
---
"#;

/// Fill the template with the passage text.
pub fn render_scene_prompt(passage_text: &str) -> String {
    SCENE_PROMPT_TEMPLATE.replace("{passage}", passage_text)
}

/// `responseSchema` pinning the output to an array of [`ScenePrompt`] objects.
pub fn scene_prompt_schema() -> Value {
    json!({
        "type": "ARRAY",
        "minItems": 1,
        "maxItems": MAX_SCENE_PROMPTS,
        "items": {
            "type": "OBJECT",
            "properties": {
                "verse_range": { "type": "STRING" },
                "description": { "type": "STRING" },
                "image_prompt": { "type": "STRING" }
            },
            "required": ["verse_range", "description", "image_prompt"],
            "propertyOrdering": ["verse_range", "description", "image_prompt"]
        }
    })
}

/// Decode and validate the model's JSON output.
///
/// Accepts a bare array or one wrapped in a ```` ```json ```` fence. Rejects an
/// empty array, more than [`MAX_SCENE_PROMPTS`] elements and any element with
/// a blank field. Field values are trimmed.
pub fn parse_scene_prompts(raw: &str) -> Result<Vec<ScenePrompt>, GeminiError> {
    let body = strip_code_fence(raw);
    let prompts: Vec<ScenePrompt> = serde_json::from_str(body).map_err(|e| {
        GeminiError::new(GeminiErrorKind::MalformedResponse(format!(
            "expected an array of scene prompts: {}",
            e
        )))
    })?;

    if prompts.is_empty() {
        return Err(GeminiError::new(GeminiErrorKind::MalformedResponse(
            "model returned no scene prompts".to_string(),
        )));
    }
    if prompts.len() > MAX_SCENE_PROMPTS {
        return Err(GeminiError::new(GeminiErrorKind::MalformedResponse(format!(
            "model returned {} scene prompts, at most {} allowed",
            prompts.len(),
            MAX_SCENE_PROMPTS
        ))));
    }

    prompts
        .into_iter()
        .enumerate()
        .map(|(index, prompt)| {
            Ok(ScenePrompt {
                verse_range: required_field(index, "verse_range", &prompt.verse_range)?,
                description: required_field(index, "description", &prompt.description)?,
                image_prompt: required_field(index, "image_prompt", &prompt.image_prompt)?,
            })
        })
        .collect()
}

fn required_field(index: usize, name: &str, value: &str) -> Result<String, GeminiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GeminiError::new(GeminiErrorKind::MalformedResponse(
            format!("scene prompt {} has an empty {}", index, name),
        )));
    }
    Ok(trimmed.to_string())
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`) on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_pinned() {
        assert_eq!(SCENE_PROMPT_TEMPLATE_VERSION, 2);
        let rendered = render_scene_prompt("[16] For God so loved the world");
        assert!(rendered.contains("---\n[16] For God so loved the world\n---"));
        assert!(rendered.contains("\"verse_range\""));
        assert!(rendered.contains("\"description\""));
        assert!(rendered.contains("\"image_prompt\""));
        assert!(!rendered.contains("{passage}"));
    }

    #[test]
    fn schema_requires_all_fields() {
        let schema = scene_prompt_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(
            schema["items"]["required"],
            json!(["verse_range", "description", "image_prompt"])
        );
        assert_eq!(schema["minItems"], 1);
        assert_eq!(schema["maxItems"], 3);
    }

    #[test]
    fn parses_plain_array() {
        let prompts = parse_scene_prompts(
            r#"[{"verse_range":"16","description":" God's Love ","image_prompt":"A globe in light"}]"#,
        )
        .expect("valid prompts");
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].description, "God's Love");
    }

    #[test]
    fn parses_fenced_array() {
        let raw = "```json\n[{\"verse_range\":\"1\",\"description\":\"Shepherd\",\"image_prompt\":\"Green pastures\"}]\n```";
        let prompts = parse_scene_prompts(raw).expect("valid prompts");
        assert_eq!(prompts[0].verse_range, "1");
    }

    #[test]
    fn rejects_empty_array() {
        let err = parse_scene_prompts("[]").unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::MalformedResponse(_)));
    }

    #[test]
    fn rejects_too_many_prompts() {
        let item = r#"{"verse_range":"16","description":"Light","image_prompt":"A lamp"}"#;
        let three = format!("[{}]", vec![item; 3].join(","));
        assert_eq!(parse_scene_prompts(&three).expect("valid prompts").len(), 3);

        let seven = format!("[{}]", vec![item; 7].join(","));
        let err = parse_scene_prompts(&seven).unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::MalformedResponse(_)));
    }

    #[test]
    fn rejects_wrong_shape() {
        let err = parse_scene_prompts(r#"{"verse_range":"16"}"#).unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::MalformedResponse(_)));

        let err = parse_scene_prompts(r#"[{"verse_range":"16","description":"x"}]"#).unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::MalformedResponse(_)));
    }

    #[test]
    fn rejects_blank_field() {
        let err = parse_scene_prompts(
            r#"[{"verse_range":"16","description":"  ","image_prompt":"x"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::MalformedResponse(_)));
    }
}
