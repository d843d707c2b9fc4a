//! refactorhud Analysis - Measurement and Report Pipeline
//!
//! This crate measures a project before and after each refactoring track and
//! folds the results into one comparable report:
//! - The composite code quality score
//! - The metric collector over the external measurement tools
//! - The track orchestrator writing and re-measuring variants
//! - The pipeline aggregator and report exporter

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
)]

pub mod quality_score;
pub mod collector;
pub mod orchestrator;
pub mod pipeline;

// Re-export main types for convenience
pub use quality_score::{quality_score, QualityScoreCalculator};
pub use collector::MetricCollector;
pub use orchestrator::TrackOrchestrator;
pub use pipeline::{aggregate_track, RefactorPipeline, ReportExporter, TrackAccumulator};

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error types for pipeline operations
///
/// Only precondition failures surface here; external tool and remote service
/// failures are degraded per file inside the collector and the strategies.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// refactorhud core error
    #[error("Core error: {0}")]
    Core(#[from] refactorhud_core::Error),

    /// Variant persistence error
    #[error("Transform error: {0}")]
    Transform(#[from] refactorhud_transform::TransformError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML report serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
