//! Verse records produced by the scripture fetcher.

use serde::{Deserialize, Serialize};

/// One verse ready for display.
///
/// # Examples
///
/// ```
/// use dbs_core::Verse;
///
/// let verse = Verse {
///     reference: "John 3:16".to_string(),
///     text: "[16] For God so loved the world...".to_string(),
/// };
/// assert!(verse.text.starts_with("[16]"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Reference label, e.g. "John 3:16"; also used as the scene name
    pub reference: String,
    /// Display text prefixed with the verse number, e.g. "[16] For God..."
    pub text: String,
}

/// The verses of a fetched reference with their combined text and section heading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_getters::Getters)]
pub struct Passage {
    /// Matched verses in chapter order
    verses: Vec<Verse>,
    /// Space-joined display texts of all verses
    text: String,
    /// Section heading in effect at the first matched verse, or empty
    title: String,
}

impl Passage {
    /// Start an empty passage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a verse, extending the combined text.
    pub fn push(&mut self, verse: Verse) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(&verse.text);
        self.verses.push(verse);
    }

    /// Set the section title unless one is already recorded.
    pub fn set_title_once(&mut self, heading: &str) {
        if self.title.is_empty() {
            self.title = heading.to_string();
        }
    }

    /// True when no verse has been added.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}
