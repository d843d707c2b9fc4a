//! Track Orchestrator
//!
//! Runs every configured track over one source file: the track produces its
//! variant text, the variant is written into the track's tree and the written
//! file is measured again.

use std::collections::BTreeMap;
use std::path::Path;

use refactorhud_core::{FileMetrics, RefactoredCode, SourceFile, Suggestion, Track};
use refactorhud_transform::{static_suggestions, TrackStrategy, VariantStore};
use tracing::{debug, info};

use crate::collector::MetricCollector;
use crate::Result;

/// Post-refactor results for one file, in track order
pub type TrackResults = Vec<(Track, FileMetrics)>;

pub struct TrackOrchestrator {
    collector: MetricCollector,
    store: VariantStore,
    strategies: Vec<Box<dyn TrackStrategy>>,
}

impl TrackOrchestrator {
    pub fn new(collector: MetricCollector, store: VariantStore) -> Self {
        Self {
            collector,
            store,
            strategies: Vec::new(),
        }
    }

    /// Add a track; tracks run in the order they are added
    #[must_use]
    pub fn with_strategy(mut self, strategy: Box<dyn TrackStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Tracks this orchestrator runs
    pub fn tracks(&self) -> Vec<Track> {
        self.strategies.iter().map(|s| s.track()).collect()
    }

    pub fn store(&self) -> &VariantStore {
        &self.store
    }

    /// Where every track, reserved ones included, writes `file`'s variant,
    /// keyed `<track>_refactored_file`
    pub fn variant_paths(&self, file: &Path) -> Result<BTreeMap<String, String>> {
        let mut paths = BTreeMap::new();
        for track in Track::all() {
            let path = self.store.variant_path(track, file)?;
            paths.insert(track.variant_key(), path.display().to_string());
        }
        Ok(paths)
    }

    /// Run every track over `source`.
    ///
    /// Tracks with nothing to offer for the file are absent from the result.
    /// Only variant persistence can fail.
    pub async fn refactor_file(&self, source: &SourceFile) -> Result<TrackResults> {
        let suggestions = static_suggestions(self.collector.provider(), source).await;

        let mut results = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            if let Some(metrics) = self.run_track(strategy.as_ref(), source, &suggestions).await? {
                results.push((strategy.track(), metrics));
            }
        }

        Ok(results)
    }

    /// Produce, persist and measure one track's variant of `source`
    pub async fn run_track(
        &self,
        strategy: &dyn TrackStrategy,
        source: &SourceFile,
        suggestions: &[Suggestion],
    ) -> Result<Option<FileMetrics>> {
        let Some(variant) = strategy.produce_variant(source, suggestions).await else {
            debug!("{} track produced no variant for {}", strategy.track(), source.path.display());
            return Ok(None);
        };

        let destination = self.store.persist(variant.track, &source.path, &variant.text).await?;
        info!("{} variant of {} written to {}", variant.track, source.path.display(), destination.display());

        let written = SourceFile::new(&destination, variant.text);
        let measurement = self.collector.measure_source(&written).await;
        let written_name = written.display_name();

        let mut metrics = FileMetrics::from_measurement(
            measurement,
            source.text.clone(),
            variant.findings,
            RefactoredCode::Text(written.text),
        )
        .with_refactored_file_name(written_name);
        metrics.file_name = source.display_name();

        Ok(Some(metrics))
    }
}
