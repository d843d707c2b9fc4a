//! Hybrid Track
//!
//! The remote suggestion service proposes candidates seeded with the static
//! findings; they are applied to the original text. A file without any
//! candidate gets no hybrid variant.

use std::sync::Arc;

use async_trait::async_trait;
use refactorhud_core::{Findings, SourceFile, Suggestion, Track};
use refactorhud_llm::SuggestionProvider;
use tracing::{debug, info, warn};

use super::TrackStrategy;
use crate::engine::apply_with_outcomes;
use crate::types::VariantOutcome;

pub struct HybridStrategy {
    suggestions: Arc<dyn SuggestionProvider>,
}

impl HybridStrategy {
    pub fn new(suggestions: Arc<dyn SuggestionProvider>) -> Self {
        Self { suggestions }
    }
}

#[async_trait]
impl TrackStrategy for HybridStrategy {
    fn track(&self) -> Track {
        Track::Hybrid
    }

    async fn produce_variant(&self, source: &SourceFile, static_suggestions: &[Suggestion]) -> Option<VariantOutcome> {
        let candidates = match self.suggestions.suggest_candidates(static_suggestions, &source.text).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Suggestion service failed for {}: {}", source.path.display(), e);
                Vec::new()
            }
        };

        if candidates.is_empty() {
            info!("No hybrid candidates for {}, skipping", source.path.display());
            return None;
        }

        let application = apply_with_outcomes(&source.text, &candidates);
        debug!(
            "Applied {}/{} hybrid candidate(s) to {}",
            application.applied_count(),
            candidates.len(),
            source.path.display()
        );

        Some(VariantOutcome::new(
            Track::Hybrid,
            application.text,
            Findings::Candidates(candidates),
        ))
    }
}
