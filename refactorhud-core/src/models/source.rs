//! Source File Model

use std::path::{Path, PathBuf};

use serde::Serialize;

/// One project file as read at the start of a run; never modified afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read `path` from disk
    pub async fn read(path: &Path) -> crate::Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(Self::new(path, text))
    }

    /// Path as recorded in the report
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }

    /// Raw line count, the way `str::lines` counts them
    pub fn line_count(&self) -> usize {
        count_lines(&self.text)
    }
}

/// Raw line count of `text`; a trailing newline does not start a new line
pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}
