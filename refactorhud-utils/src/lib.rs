//! refactorhud Utilities
//!
//! Small helpers shared by every refactorhud crate: logging bootstrap,
//! configuration file loading and safe path handling for variant trees.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod file;
pub mod config;
pub mod logging;

pub use file::{absolute_path, safe_path_join, normalize_path, relative_to};
pub use config::{load_config, merge_configs};

/// Result type used throughout refactorhud utilities
pub type Result<T> = std::result::Result<T, UtilError>;

/// Error types for utility operations
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path operation error
    #[error("Path operation error: {0}")]
    PathOperation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Directories that never hold project sources worth measuring
pub fn default_exclusion_patterns() -> std::collections::HashSet<String> {
    let mut patterns = std::collections::HashSet::new();

    // Version control
    patterns.insert(".git".to_string());
    patterns.insert(".svn".to_string());
    patterns.insert(".hg".to_string());

    // Haskell build artifacts
    patterns.insert("dist-newstyle".to_string());
    patterns.insert(".stack-work".to_string());
    patterns.insert("*.hi".to_string());
    patterns.insert("*.o".to_string());

    // IDE and editor files
    patterns.insert(".vscode".to_string());
    patterns.insert(".idea".to_string());
    patterns.insert("*.swp".to_string());
    patterns.insert("*~".to_string());

    // Variant trees written by a previous run
    patterns.insert("static_refactored".to_string());
    patterns.insert("hybrid_refactored".to_string());
    patterns.insert("llm_only_refactored".to_string());

    patterns
}

/// Check if a path should be excluded based on patterns
pub fn should_exclude_path(path: &std::path::Path, patterns: &std::collections::HashSet<String>) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    for pattern in patterns {
        if let Some(ext) = pattern.strip_prefix("*.") {
            if let Some(file_ext) = path.extension().and_then(|e| e.to_str()) {
                if file_ext.eq_ignore_ascii_case(ext) {
                    return true;
                }
            }
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            if path_str.ends_with(&suffix.to_lowercase()) {
                return true;
            }
        } else if path
            .components()
            .any(|c| c.as_os_str().to_string_lossy().eq_ignore_ascii_case(pattern))
        {
            return true;
        }
    }

    false
}

/// Whether the file extension is one of `extensions` (case-insensitive, no leading dot)
pub fn has_extension(path: &std::path::Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext)))
}
