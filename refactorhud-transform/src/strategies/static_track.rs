//! Static Track
//!
//! Linter findings only. By default the linter's own rewrite is trusted;
//! [`StaticMode::ApplySuggestions`] instead applies each Found / Perhaps pair
//! through the candidate application engine.

use std::sync::Arc;

use async_trait::async_trait;
use refactorhud_core::{Candidate, Findings, MeasurementProvider, SourceFile, StaticMode, Suggestion, Track};
use tracing::{debug, warn};

use super::TrackStrategy;
use crate::engine::apply_with_outcomes;
use crate::types::VariantOutcome;

pub struct StaticStrategy {
    measurements: Arc<dyn MeasurementProvider>,
    mode: StaticMode,
}

impl StaticStrategy {
    pub fn new(measurements: Arc<dyn MeasurementProvider>, mode: StaticMode) -> Self {
        Self { measurements, mode }
    }

    async fn auto_refactor(&self, source: &SourceFile) -> String {
        match self.measurements.auto_refactor(&source.path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Auto-refactor failed for {}, keeping original text: {}", source.path.display(), e);
                source.text.clone()
            }
        }
    }

    fn apply_suggestions(source: &SourceFile, suggestions: &[Suggestion]) -> String {
        let candidates: Vec<Candidate> = suggestions.iter().filter_map(Candidate::from_suggestion).collect();
        let application = apply_with_outcomes(&source.text, &candidates);

        debug!(
            "Applied {}/{} linter candidate(s) to {}",
            application.applied_count(),
            candidates.len(),
            source.path.display()
        );
        application.text
    }
}

#[async_trait]
impl TrackStrategy for StaticStrategy {
    fn track(&self) -> Track {
        Track::Static
    }

    async fn produce_variant(&self, source: &SourceFile, static_suggestions: &[Suggestion]) -> Option<VariantOutcome> {
        let text = match self.mode {
            StaticMode::AutoRefactor => self.auto_refactor(source).await,
            StaticMode::ApplySuggestions => Self::apply_suggestions(source, static_suggestions),
        };

        Some(VariantOutcome::new(
            Track::Static,
            text,
            Findings::Suggestions(static_suggestions.to_vec()),
        ))
    }
}
