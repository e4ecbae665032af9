//! Plan file load, query and mutation.

use dbs_core::{GeneratedImage, StudyItem, StudyStatus};
use dbs_error::{PlanError, PlanErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Directory under the home directory holding the plan.
pub const PLAN_DIR_NAME: &str = ".dbs-initiator";
/// Plan file name.
pub const PLAN_FILE_NAME: &str = "study_plan.json";

/// `~/.dbs-initiator/study_plan.json`.
pub fn default_plan_path() -> Result<PathBuf, PlanError> {
    let home = dirs::home_dir().ok_or_else(|| PlanError::new(PlanErrorKind::HomeDirectory))?;
    Ok(home.join(PLAN_DIR_NAME).join(PLAN_FILE_NAME))
}

/// Ordered queue of study items bound to a file.
///
/// # Examples
///
/// ```no_run
/// use dbs_planner::StudyPlan;
///
/// let mut plan = StudyPlan::load()?;
/// plan.add("John 3:16-17")?;
/// if let Some(next) = plan.get_next_pending() {
///     println!("next up: {}", next.reference);
/// }
/// # Ok::<(), dbs_error::PlanError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudyPlan {
    items: Vec<StudyItem>,
    #[serde(skip)]
    path: PathBuf,
}

impl StudyPlan {
    /// Load the plan from the default location.
    pub fn load() -> Result<Self, PlanError> {
        Self::load_from(default_plan_path()?)
    }

    /// Load the plan stored at `path`, or start an empty one if the file does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let path = path.as_ref().to_path_buf();

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No plan file yet, starting empty");
                return Ok(Self {
                    items: Vec::new(),
                    path,
                });
            }
            Err(e) => {
                return Err(PlanError::new(PlanErrorKind::Read(format!(
                    "{}: {}",
                    path.display(),
                    e
                ))));
            }
        };

        let mut plan: StudyPlan = serde_json::from_str(&contents).map_err(|e| {
            PlanError::new(PlanErrorKind::Parse(format!("{}: {}", path.display(), e)))
        })?;
        plan.path = path;
        debug!(items = plan.items.len(), "Loaded plan");
        Ok(plan)
    }

    /// File the plan persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole plan, creating the parent directory if needed.
    pub fn save(&self) -> Result<(), PlanError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                PlanError::new(PlanErrorKind::Write(format!(
                    "failed to create {}: {}",
                    dir.display(),
                    e
                )))
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PlanError::new(PlanErrorKind::Write(e.to_string())))?;
        std::fs::write(&self.path, json).map_err(|e| {
            PlanError::new(PlanErrorKind::Write(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })
    }

    /// Queue `reference` as pending and persist.
    ///
    /// # Errors
    ///
    /// `DuplicateReference` if it is already in the plan; the existing item is untouched.
    #[instrument(skip(self))]
    pub fn add(&mut self, reference: &str) -> Result<(), PlanError> {
        if self.get(reference).is_some() {
            return Err(PlanError::new(PlanErrorKind::DuplicateReference(
                reference.to_string(),
            )));
        }

        self.items.push(StudyItem::new(reference));
        self.save()?;
        info!("Added to plan");
        Ok(())
    }

    /// All items in insertion order.
    pub fn list(&self) -> &[StudyItem] {
        &self.items
    }

    /// Item keyed by `reference`.
    pub fn get(&self, reference: &str) -> Option<&StudyItem> {
        self.items.iter().find(|item| item.reference == reference)
    }

    /// First pending item in insertion order.
    pub fn get_next_pending(&self) -> Option<&StudyItem> {
        self.items
            .iter()
            .find(|item| item.status == StudyStatus::Pending)
    }

    /// Set the status of `reference` and persist.
    #[instrument(skip(self))]
    pub fn update_status(&mut self, reference: &str, status: StudyStatus) -> Result<(), PlanError> {
        self.update(reference, |item| item.status = status)
    }

    /// Set the section title of `reference` and persist.
    #[instrument(skip(self))]
    pub fn update_title(&mut self, reference: &str, title: &str) -> Result<(), PlanError> {
        self.update(reference, |item| item.title = title.to_string())
    }

    /// Replace the generated image list of `reference` and persist.
    #[instrument(skip(self, images), fields(count = images.len()))]
    pub fn update_images(
        &mut self,
        reference: &str,
        images: Vec<GeneratedImage>,
    ) -> Result<(), PlanError> {
        self.update(reference, |item| item.generated_images = images)
    }

    /// Apply the outcome of a run in one write: title, images, and status `Processed`.
    #[instrument(skip(self, images), fields(count = images.len()))]
    pub fn record_run(
        &mut self,
        reference: &str,
        title: &str,
        images: Vec<GeneratedImage>,
    ) -> Result<(), PlanError> {
        self.update(reference, |item| {
            if !title.is_empty() {
                item.title = title.to_string();
            }
            item.generated_images = images;
            item.status = StudyStatus::Processed;
        })
    }

    fn update(
        &mut self,
        reference: &str,
        mutate: impl FnOnce(&mut StudyItem),
    ) -> Result<(), PlanError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.reference == reference)
            .ok_or_else(|| PlanError::new(PlanErrorKind::NotFound(reference.to_string())))?;

        mutate(item);
        item.touch();
        self.save()
    }
}
