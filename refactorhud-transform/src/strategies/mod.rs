//! Refactoring Track Strategies
//!
//! Each track turns one source file plus its static suggestions into variant
//! text. Strategies never fail: external failures degrade to the original
//! text or to "no variant" for that file.

use async_trait::async_trait;
use refactorhud_core::{parse_diagnostics, MeasurementProvider, SourceFile, Suggestion, Track};
use tracing::{debug, warn};

use crate::types::VariantOutcome;

pub mod static_track;
pub mod hybrid;

pub use static_track::StaticStrategy;
pub use hybrid::HybridStrategy;

/// One refactoring track
#[async_trait]
pub trait TrackStrategy: Send + Sync {
    fn track(&self) -> Track;

    /// Variant for `source`, or `None` when this track has nothing for the file
    async fn produce_variant(&self, source: &SourceFile, static_suggestions: &[Suggestion]) -> Option<VariantOutcome>;
}

/// Linter suggestions for `source`, never empty.
///
/// Falls back to a single placeholder when the linter reports nothing or
/// cannot be run.
pub async fn static_suggestions(measurements: &dyn MeasurementProvider, source: &SourceFile) -> Vec<Suggestion> {
    let suggestions = match measurements.lint_diagnostics(&source.path).await {
        Ok(report) => parse_diagnostics(&report),
        Err(e) => {
            warn!("Linter report unavailable for {}: {}", source.path.display(), e);
            Vec::new()
        }
    };

    if suggestions.is_empty() {
        debug!("No static suggestions for {}, using placeholder", source.path.display());
        return vec![Suggestion::placeholder(&source.display_name())];
    }

    debug!("{} static suggestion(s) for {}", suggestions.len(), source.path.display());
    suggestions
}
