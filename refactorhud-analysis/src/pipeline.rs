//! Refactoring Pipeline - before/after report over a whole project
//!
//! Files are processed one at a time: the original is measured, then every
//! track runs over it, before the next file starts. Per-track records are
//! folded into an overall summary once all files are done.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use refactorhud_core::{
    ComplexityStats, FileMetrics, Findings, LintSummary, OverallStats, RefactoredCode, Report, SourceFile, Track,
    TrackReport,
};
use tracing::info;

use crate::collector::MetricCollector;
use crate::orchestrator::TrackOrchestrator;
use crate::quality_score::quality_score;
use crate::Result;

/// Running totals for one phase or track
#[derive(Debug, Default)]
pub struct TrackAccumulator {
    files: Vec<FileMetrics>,
}

impl TrackAccumulator {
    pub fn push(&mut self, metrics: FileMetrics) {
        self.files.push(metrics);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn finish(self) -> TrackReport {
        aggregate_track(self.files)
    }
}

/// Fold per-file records into a [`TrackReport`].
///
/// Counters and complexity min / max / sum are summed across files; the
/// complexity average is the summed sum over the file count, and the score is
/// recomputed from the totals rather than averaged. A track that ran over no
/// files has zero counters and the score of empty code.
pub fn aggregate_track(files: Vec<FileMetrics>) -> TrackReport {
    let mut complexity = ComplexityStats::default();
    let mut lint = LintSummary::default();
    let mut syntax_errors = 0;
    let mut lines_of_code = 0;
    let mut analyzer_loc = 0;

    for file in &files {
        complexity.min += file.cyclomatic_complexity.min;
        complexity.max += file.cyclomatic_complexity.max;
        complexity.sum += file.cyclomatic_complexity.sum;
        lint += file.hlint_suggestions;
        syntax_errors += file.syntax_errors;
        lines_of_code += file.lines_of_code;
        analyzer_loc += file.homplexity_lines_of_code;
    }
    if !files.is_empty() {
        complexity.average = complexity.sum / files.len() as f64;
    }

    TrackReport {
        overall: OverallStats {
            cyclomatic_complexity: complexity,
            hlint_suggestions: lint,
            syntax_errors,
            lines_of_code,
            homplexity_lines_of_code: analyzer_loc,
            code_quality_score: quality_score(analyzer_loc, complexity.sum),
            files_analyzed: files.len(),
        },
        files,
    }
}

/// Measures a project, runs every track and assembles the [`Report`]
pub struct RefactorPipeline {
    collector: MetricCollector,
    orchestrator: TrackOrchestrator,
    output_path: Option<PathBuf>,
}

impl RefactorPipeline {
    pub fn new(collector: MetricCollector, orchestrator: TrackOrchestrator) -> Self {
        Self {
            collector,
            orchestrator,
            output_path: None,
        }
    }

    /// Also write the report here at the end of each run
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Run the pipeline over `files`, in the given order.
    ///
    /// External tool and remote service failures degrade per file. Reading a
    /// source file, writing a variant or writing the report aborts the run.
    pub async fn run(&self, project_name: &str, files: &[PathBuf]) -> Result<Report> {
        info!("Starting refactoring pipeline for {} ({} file(s))", project_name, files.len());

        let mut pre_refactor = TrackAccumulator::default();
        let mut post_refactor: BTreeMap<Track, TrackAccumulator> = self
            .orchestrator
            .tracks()
            .into_iter()
            .map(|track| (track, TrackAccumulator::default()))
            .collect();

        for (index, path) in files.iter().enumerate() {
            info!("[{}/{}] {}", index + 1, files.len(), path.display());
            let source = SourceFile::read(path).await?;

            pre_refactor.push(self.measure_original(&source).await?);

            for (track, metrics) in self.orchestrator.refactor_file(&source).await? {
                post_refactor.entry(track).or_default().push(metrics);
            }
        }

        let mut report = Report::new(project_name, pre_refactor.finish());
        for (track, accumulator) in post_refactor {
            info!("{} track: {} file(s) refactored", track, accumulator.len());
            report.set_track(track, accumulator.finish());
        }

        if let Some(path) = &self.output_path {
            ReportExporter::write(&report, path).await?;
            info!("Report written to {}", path.display());
        }

        Ok(report)
    }

    async fn measure_original(&self, source: &SourceFile) -> Result<FileMetrics> {
        let measurement = self.collector.measure_source(source).await;
        let issues = measurement.lint_issues.clone();
        let variants = self.orchestrator.variant_paths(&source.path)?;

        Ok(FileMetrics::from_measurement(
            measurement,
            source.text.clone(),
            Findings::Issues(issues),
            RefactoredCode::Variants(variants),
        ))
    }
}

/// Report serialization
pub struct ReportExporter;

impl ReportExporter {
    pub fn to_json(report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    pub fn to_yaml(report: &Report) -> Result<String> {
        Ok(serde_yaml::to_string(report)?)
    }

    /// Write `report` to `path`, as YAML for `.yaml` / `.yml` and JSON otherwise.
    /// Missing parent directories are created.
    pub async fn write(report: &Report, path: &Path) -> Result<()> {
        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::to_yaml(report)?,
            _ => Self::to_json(report)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
        Ok(())
    }
}
