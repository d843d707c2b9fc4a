//! refactorhud Transform - Candidate Application and Refactoring Tracks
//!
//! This crate turns suggestions into variant source files:
//! - The candidate application engine (exact substring substitution)
//! - The static and hybrid track strategies behind one [`TrackStrategy`] contract
//! - Variant tree persistence next to the project directory

#![warn(clippy::all, clippy::pedantic)]

pub mod engine;
pub mod strategies;
pub mod types;
pub mod variant;

// Re-export main types for convenience
pub use engine::{apply_candidates, apply_with_outcomes, Application, CandidateOutcome};
pub use strategies::{static_suggestions, HybridStrategy, StaticStrategy, TrackStrategy};
pub use types::VariantOutcome;
pub use variant::VariantStore;

/// Result type for transformation operations
pub type Result<T> = std::result::Result<T, TransformError>;

/// Error types for transformation operations
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// refactorhud core error
    #[error("Core error: {0}")]
    Core(#[from] refactorhud_core::Error),

    /// Transformation error
    #[error("Transformation error: {0}")]
    Transform(String),
}
