//! HTTP client for the Bible API.

use crate::api::{ChapterResponse, ContentItem};
use crate::books::book_id;
use async_trait::async_trait;
use dbs_core::{Passage, Reference, Verse};
use dbs_error::{DbsResult, ScriptureError, ScriptureErrorKind};
use dbs_interface::ScriptureSource;
use reqwest::Client;
use tracing::{debug, instrument, trace};

/// Berean Standard Bible endpoint on bible.helloao.org.
pub const DEFAULT_API_BASE_URL: &str = "https://bible.helloao.org/api/BSB";

/// Fetches chapters from the Bible API and extracts verse ranges.
#[derive(Debug, Clone)]
pub struct ScriptureClient {
    client: Client,
    base_url: String,
}

impl ScriptureClient {
    /// Create a client against `base_url` (no trailing slash required).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chapter URL for a reference, e.g. `{base}/JHN/3.json`.
    pub fn chapter_url(&self, reference: &Reference) -> Result<String, ScriptureError> {
        let id = book_id(reference.book()).ok_or_else(|| {
            ScriptureError::new(ScriptureErrorKind::UnsupportedBook(
                reference.book().to_string(),
            ))
        })?;
        Ok(format!("{}/{}/{}.json", self.base_url, id, reference.chapter()))
    }

    async fn fetch_chapter(&self, url: &str) -> Result<ChapterResponse, ScriptureError> {
        debug!(url = %url, "Fetching chapter");

        let response = self.client.get(url).send().await.map_err(|e| {
            ScriptureError::new(ScriptureErrorKind::Network(format!(
                "Request failed: {}",
                e
            )))
        })?;

        if !response.status().is_success() {
            return Err(ScriptureError::new(ScriptureErrorKind::Upstream {
                status_code: response.status().as_u16(),
                url: url.to_string(),
            }));
        }

        response.json().await.map_err(|e| {
            ScriptureError::new(ScriptureErrorKind::MalformedResponse(e.to_string()))
        })
    }
}

#[async_trait]
impl ScriptureSource for ScriptureClient {
    #[instrument(skip(self), fields(reference = %reference))]
    async fn fetch_passage(&self, reference: &Reference) -> DbsResult<Passage> {
        let url = self.chapter_url(reference)?;
        let chapter = self.fetch_chapter(&url).await?;
        if let Some(book) = &chapter.book {
            trace!(book_id = %book.id, "Chapter received");
        }

        let passage = select_verses(reference, &chapter.chapter.content)?;
        debug!(
            verses = passage.verses().len(),
            title = %passage.title(),
            "Extracted passage"
        );
        Ok(passage)
    }
}

/// Walk chapter content in order, keeping the verses inside the reference.
///
/// The most recent heading seen when the first in-range verse is reached
/// becomes the passage title; headings after that point never do. Verses whose first content element is not a
/// string are skipped.
fn select_verses(
    reference: &Reference,
    content: &[ContentItem],
) -> Result<Passage, ScriptureError> {
    let mut passage = Passage::new();
    let mut heading = "";
    let mut title_decided = false;

    for item in content {
        match item.kind.as_str() {
            "heading" => {
                if let Some(text) = item.leading_text() {
                    heading = text;
                }
            }
            "verse" => {
                let Some(number) = item.verse_number() else {
                    continue;
                };
                if !reference.contains(number) {
                    continue;
                }
                if !title_decided {
                    passage.set_title_once(heading);
                    title_decided = true;
                }

                let Some(text) = item.leading_text() else {
                    trace!(verse = number, "Skipping verse without plain text");
                    continue;
                };
                passage.push(Verse {
                    reference: reference.verse_label(number),
                    text: format!("[{}] {}", number, text),
                });
            }
            _ => {}
        }
    }

    if passage.is_empty() {
        return Err(ScriptureError::new(ScriptureErrorKind::NoVersesFound(
            reference.to_string(),
        )));
    }
    Ok(passage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: serde_json::Value) -> Vec<ContentItem> {
        serde_json::from_value(value).expect("valid content")
    }

    #[test]
    fn title_is_first_heading_before_first_match() {
        let reference = Reference::new("John", 3, 16, 17).expect("reference");
        let items = content(json!([
            {"type": "heading", "content": ["Jesus and Nicodemus"]},
            {"type": "verse", "number": 1, "content": ["Now there was a man"]},
            {"type": "heading", "content": ["For God So Loved the World"]},
            {"type": "verse", "number": 16, "content": ["For God so loved"]},
            {"type": "heading", "content": ["Later Heading"]},
            {"type": "verse", "number": "17", "content": ["For God did not send"]},
        ]));

        let passage = select_verses(&reference, &items).expect("passage");
        assert_eq!(passage.title(), "For God So Loved the World");
        assert_eq!(
            passage.text(),
            "[16] For God so loved [17] For God did not send"
        );
        assert_eq!(passage.verses()[1].reference, "John 3:17");
    }

    #[test]
    fn heading_after_first_match_is_not_title() {
        let reference = Reference::new("John", 3, 16, 17).expect("reference");
        let items = content(json!([
            {"type": "verse", "number": 16, "content": ["For God so loved"]},
            {"type": "heading", "content": ["Later Heading"]},
            {"type": "verse", "number": 17, "content": ["For God did not send"]},
        ]));

        let passage = select_verses(&reference, &items).expect("passage");
        assert_eq!(passage.title(), "");
        assert_eq!(passage.verses().len(), 2);
    }

    #[test]
    fn non_text_verse_is_skipped() {
        let reference = Reference::new("Psalms", 23, 1, 2).expect("reference");
        let items = content(json!([
            {"type": "verse", "number": 1, "content": [{"noteId": 3}]},
            {"type": "verse", "number": 2, "content": ["He makes me lie down"]},
        ]));

        let passage = select_verses(&reference, &items).expect("passage");
        assert_eq!(passage.verses().len(), 1);
        assert_eq!(passage.text(), "[2] He makes me lie down");
        assert_eq!(passage.title(), "");
    }

    #[test]
    fn out_of_range_is_no_verses_found() {
        let reference = Reference::new("John", 3, 40, 41).expect("reference");
        let items = content(json!([
            {"type": "verse", "number": 36, "content": ["Whoever believes"]},
        ]));

        let err = select_verses(&reference, &items).unwrap_err();
        assert!(matches!(err.kind, ScriptureErrorKind::NoVersesFound(_)));
    }
}
