//! Project source discovery

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use refactorhud_utils::{has_extension, should_exclude_path};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Source files under `project_dir` with one of `extensions`, sorted by path.
///
/// Exclusion patterns are matched against entries below the project root
/// only, so a project that itself lives in e.g. a `build` directory is still
/// scanned.
pub fn discover_sources(project_dir: &Path, extensions: &[String], exclude: &HashSet<String>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(project_dir)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, exclude))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && has_extension(entry.path(), extensions))
        .map(DirEntry::into_path)
        .collect();

    files.sort();
    debug!("Discovered {} source file(s) under {}", files.len(), project_dir.display());
    files
}

fn is_excluded(entry: &DirEntry, exclude: &HashSet<String>) -> bool {
    should_exclude_path(Path::new(entry.file_name()), exclude)
}
