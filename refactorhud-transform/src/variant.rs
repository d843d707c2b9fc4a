//! Variant Persistence
//!
//! Writes each track's variant to `<project>/../<track>_refactored/<relative path>`.

use std::path::{Path, PathBuf};

use refactorhud_core::Track;
use tracing::debug;

use crate::{Result, TransformError};

/// Variant tree writer for one project
#[derive(Debug, Clone)]
pub struct VariantStore {
    project_dir: PathBuf,
}

impl VariantStore {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Where `file`'s variant for `track` lives
    pub fn variant_path(&self, track: Track, file: &Path) -> Result<PathBuf> {
        Ok(track.variant_path(&self.project_dir, file)?)
    }

    /// Write `text` as `file`'s variant for `track`, replacing any earlier one
    pub async fn persist(&self, track: Track, file: &Path, text: &str) -> Result<PathBuf> {
        if file.file_name().is_none() {
            return Err(TransformError::Transform(format!("{} does not name a file", file.display())));
        }

        let destination = self.variant_path(track, file)?;

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        if tokio::fs::try_exists(&destination).await? {
            tokio::fs::remove_file(&destination).await?;
        }
        tokio::fs::write(&destination, text).await?;

        debug!("Wrote {} variant to {}", track, destination.display());
        Ok(destination)
    }
}
