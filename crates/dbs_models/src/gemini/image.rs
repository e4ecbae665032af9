//! Image payload extraction.

use super::dto::GenerateContentResponse;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dbs_error::{GeminiError, GeminiErrorKind};

/// Finish reasons that mean the output was withheld by content filtering.
const SAFETY_FINISH_REASONS: [&str; 5] = [
    "SAFETY",
    "IMAGE_SAFETY",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
];

/// Pull the first inline image out of a response and decode it.
///
/// Checks prompt feedback and the first candidate's finish reason for a
/// safety block before looking for `inlineData` in any candidate part.
pub fn extract_image(response: &GenerateContentResponse) -> Result<Vec<u8>, GeminiError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return Err(GeminiError::new(GeminiErrorKind::SafetyBlocked(format!(
            "prompt blocked: {}",
            reason
        ))));
    }

    let finish_reason = response
        .candidates
        .first()
        .and_then(|candidate| candidate.finish_reason.as_deref())
        .unwrap_or("UNSPECIFIED");

    if SAFETY_FINISH_REASONS.contains(&finish_reason) {
        return Err(GeminiError::new(GeminiErrorKind::SafetyBlocked(
            finish_reason.to_string(),
        )));
    }

    let inline = response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .find_map(|part| part.inline_data.as_ref())
        .ok_or_else(|| GeminiError::new(GeminiErrorKind::NoImageData(finish_reason.to_string())))?;

    STANDARD
        .decode(inline.data.trim())
        .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).expect("valid response")
    }

    #[test]
    fn decodes_inline_data_after_text_part() {
        let resp = response(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "Here is your image"},
                    {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(b"\x89PNG")}}
                ]},
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(extract_image(&resp).expect("image"), b"\x89PNG");
    }

    #[test]
    fn prompt_block_is_safety_error() {
        let resp = response(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        let err = extract_image(&resp).unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::SafetyBlocked(_)));
    }

    #[test]
    fn safety_finish_reason_is_safety_error() {
        let resp = response(json!({"candidates": [{"finishReason": "IMAGE_SAFETY"}]}));
        let err = extract_image(&resp).unwrap_err();
        assert_eq!(
            err.kind,
            GeminiErrorKind::SafetyBlocked("IMAGE_SAFETY".to_string())
        );
    }

    #[test]
    fn text_only_is_no_image_data() {
        let resp = response(json!({
            "candidates": [{"content": {"parts": [{"text": "I can't draw"}]}, "finishReason": "STOP"}]
        }));
        let err = extract_image(&resp).unwrap_err();
        assert_eq!(err.kind, GeminiErrorKind::NoImageData("STOP".to_string()));
    }

    #[test]
    fn bad_base64_is_decode_error() {
        let resp = response(json!({
            "candidates": [{"content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": "***"}}]}}]
        }));
        let err = extract_image(&resp).unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::Base64Decode(_)));
    }
}
