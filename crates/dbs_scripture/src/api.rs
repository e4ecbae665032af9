//! Wire types for the chapter endpoint of the Bible API.

use serde::Deserialize;
use serde_json::Value;

/// Body of `GET {base}/{BOOK_ID}/{chapter}.json`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChapterResponse {
    #[serde(default)]
    pub book: Option<ApiBook>,
    pub chapter: ApiChapter,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiBook {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiChapter {
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

/// A chapter entry: a `heading`, a `verse`, or something we ignore
/// (line breaks, notes, Hebrew subtitles).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub number: Option<Value>,
    #[serde(default)]
    pub content: Vec<Value>,
}

impl ContentItem {
    /// Verse number, accepting both `16` and `"16"`.
    pub fn verse_number(&self) -> Option<u32> {
        match self.number.as_ref()? {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// First content element when it is plain text.
    pub fn leading_text(&self) -> Option<&str> {
        self.content.first().and_then(Value::as_str)
    }
}
