//! Report Models
//!
//! The before/after report written at the end of a pipeline run. Field names
//! follow the keys existing report consumers already read.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::metrics::{ComplexityAnalysis, ComplexityStats, LintIssue, LintSummary, Measurement};
use super::suggestion::{Candidate, Suggestion};
use crate::Track;

/// What a file record lists under `suggestions`, by phase
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Findings {
    /// Pre-refactor: the linter's structured issues
    Issues(Vec<LintIssue>),
    /// Static track: parsed suggestions, possibly the placeholder
    Suggestions(Vec<Suggestion>),
    /// Hybrid track: the candidates that were applied
    Candidates(Vec<Candidate>),
}

impl Findings {
    pub fn len(&self) -> usize {
        match self {
            Findings::Issues(items) => items.len(),
            Findings::Suggestions(items) => items.len(),
            Findings::Candidates(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What a file record lists under `refactored_code`, by phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RefactoredCode {
    /// Pre-refactor: `<track>_refactored_file` -> variant path
    Variants(BTreeMap<String, String>),
    /// Post-refactor: the variant text
    Text(String),
}

/// Metrics for one file in one phase or track
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMetrics {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refactored_file_name: Option<String>,
    pub cyclomatic_complexity: ComplexityStats,
    pub hlint_suggestions: LintSummary,
    pub syntax_errors: usize,
    pub lines_of_code: usize,
    pub homplexity_lines_of_code: u64,
    pub code_quality_score: f64,
    pub homplexity_analysis: ComplexityAnalysis,
    pub original_code: String,
    pub suggestions: Findings,
    pub refactored_code: RefactoredCode,
}

impl FileMetrics {
    /// Record for a measured file; `original_code` is the pre-refactor text
    /// even when `measurement` was taken on a variant.
    pub fn from_measurement(
        measurement: Measurement,
        original_code: String,
        suggestions: Findings,
        refactored_code: RefactoredCode,
    ) -> Self {
        Self {
            file_name: measurement.file_name,
            refactored_file_name: None,
            cyclomatic_complexity: measurement.complexity.cyclomatic_complexity,
            hlint_suggestions: measurement.lint,
            syntax_errors: measurement.syntax_errors,
            lines_of_code: measurement.lines_of_code,
            homplexity_lines_of_code: measurement.complexity.analyzer_loc,
            code_quality_score: measurement.code_quality_score,
            homplexity_analysis: measurement.complexity,
            original_code,
            suggestions,
            refactored_code,
        }
    }

    #[must_use]
    pub fn with_refactored_file_name(mut self, name: impl Into<String>) -> Self {
        self.refactored_file_name = Some(name.into());
        self
    }
}

/// Aggregate over a track's files
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallStats {
    pub cyclomatic_complexity: ComplexityStats,
    pub hlint_suggestions: LintSummary,
    pub syntax_errors: usize,
    pub lines_of_code: usize,
    pub homplexity_lines_of_code: u64,
    pub code_quality_score: f64,
    pub files_analyzed: usize,
}

/// One phase or track of the report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackReport {
    pub overall: OverallStats,
    pub files: Vec<FileMetrics>,
}

impl TrackReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn file(&self, file_name: &str) -> Option<&FileMetrics> {
        self.files.iter().find(|f| f.file_name == file_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportAnalysis {
    pub pre_refactor: TrackReport,
    /// Every track has an entry, including reserved ones that stay empty
    pub post_refactor: BTreeMap<Track, TrackReport>,
}

/// Terminal artifact of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub project_name: String,
    pub generated_at: DateTime<Utc>,
    pub analysis: ReportAnalysis,
}

impl Report {
    pub fn new(project_name: impl Into<String>, pre_refactor: TrackReport) -> Self {
        let post_refactor = Track::all()
            .into_iter()
            .map(|track| (track, TrackReport::empty()))
            .collect();

        Self {
            project_name: project_name.into(),
            generated_at: Utc::now(),
            analysis: ReportAnalysis { pre_refactor, post_refactor },
        }
    }

    pub fn pre_refactor(&self) -> &TrackReport {
        &self.analysis.pre_refactor
    }

    pub fn track(&self, track: Track) -> Option<&TrackReport> {
        self.analysis.post_refactor.get(&track)
    }

    pub fn set_track(&mut self, track: Track, report: TrackReport) {
        self.analysis.post_refactor.insert(track, report);
    }
}
