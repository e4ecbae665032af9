//! Study plan records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing state of a queued reference.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum StudyStatus {
    /// Queued, not yet run
    Pending,
    /// Scenes and images generated
    Processed,
    /// Study held
    Complete,
}

/// Metadata for one image generated for a study item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Absolute path of the saved image
    pub filename: String,
    /// Verse range the image illustrates
    pub verse_range: String,
    /// Short description, also the scene name
    pub description: String,
}

/// One entry of the study plan.
///
/// `reference` is the key and is never rewritten once the item exists.
///
/// # Examples
///
/// ```
/// use dbs_core::{StudyItem, StudyStatus};
///
/// let item = StudyItem::new("John 3:16-17");
/// assert_eq!(item.status, StudyStatus::Pending);
/// assert_eq!(item.created_at, item.updated_at);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyItem {
    /// Reference string as entered by the user
    pub reference: String,
    /// Section heading found when the passage was fetched
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Processing state
    pub status: StudyStatus,
    /// Images generated during the last run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generated_images: Vec<GeneratedImage>,
    /// When the item was added
    pub created_at: DateTime<Utc>,
    /// When the item last changed
    pub updated_at: DateTime<Utc>,
}

impl StudyItem {
    /// New pending item stamped with the current time.
    pub fn new(reference: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            reference: reference.into(),
            title: String::new(),
            status: StudyStatus::Pending,
            generated_images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a change at the current time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
