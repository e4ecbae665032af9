//! Per-reference output directory.

use dbs_core::Reference;
use dbs_error::{StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// An existing, absolute directory that receives a run's images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirectory {
    path: PathBuf,
}

impl OutputDirectory {
    /// Create `<root>/<reference dir name>` and resolve it to an absolute path.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the current
    /// directory cannot be resolved for a relative root.
    #[tracing::instrument(skip(root), fields(reference = %reference))]
    pub async fn create(
        root: impl AsRef<Path>,
        reference: &Reference,
    ) -> Result<Self, StorageError> {
        let relative = root.as_ref().join(reference.output_dir_name());

        tokio::fs::create_dir_all(&relative).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                relative.display(),
                e
            )))
        })?;

        let path = std::path::absolute(&relative).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{}: {}",
                relative.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), "Prepared output directory");
        Ok(Self { path })
    }

    /// Absolute directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the image generated for prompt `index`.
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.path.join(format!("img_{}.png", index))
    }

    /// Write image `index` and return its absolute path.
    ///
    /// Writes to a temporary file first and renames it into place, so an
    /// interrupted write never leaves a truncated image under the final name.
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn write_image(&self, index: usize, data: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.image_path(index);
        let temp_path = path.with_extension("tmp");

        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            match tokio::fs::remove_file(&temp_path).await {
                Err(cleanup) if cleanup.kind() != std::io::ErrorKind::NotFound => {
                    tracing::warn!(
                        path = %temp_path.display(),
                        error = %cleanup,
                        "Could not remove temporary image"
                    );
                }
                _ => {}
            }
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            ))));
        }

        tracing::info!(path = %path.display(), "Saved image");
        Ok(path)
    }
}
