//! Metric Collector
//!
//! Runs the three measurements (structured lint, syntax check, complexity
//! analysis) for one file and folds them into a [`Measurement`]. A failing
//! tool only zeroes its own part of the record; the complexity analyzer
//! additionally falls back to the remote estimator when one is configured.

use std::path::Path;
use std::sync::Arc;

use refactorhud_core::external_tools::ghc::count_error_lines;
use refactorhud_core::external_tools::homplexity::parse_homplexity_output;
use refactorhud_core::{ComplexityAnalysis, LintIssue, LintSummary, Measurement, MeasurementProvider, SourceFile};
use refactorhud_llm::ComplexityEstimator;
use tracing::{debug, warn};

use crate::quality_score::QualityScoreCalculator;
use crate::Result;

/// Per-file measurement over the external tools
#[derive(Clone)]
pub struct MetricCollector {
    measurements: Arc<dyn MeasurementProvider>,
    fallback: Option<Arc<dyn ComplexityEstimator>>,
    scorer: QualityScoreCalculator,
}

impl MetricCollector {
    pub fn new(measurements: Arc<dyn MeasurementProvider>) -> Self {
        Self {
            measurements,
            fallback: None,
            scorer: QualityScoreCalculator::default(),
        }
    }

    /// Estimate complexity remotely whenever the analyzer fails
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn ComplexityEstimator>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: QualityScoreCalculator) -> Self {
        self.scorer = scorer;
        self
    }

    /// The tools this collector measures with
    pub fn provider(&self) -> &dyn MeasurementProvider {
        self.measurements.as_ref()
    }

    /// Read `file` and measure it. Only the read itself can fail.
    pub async fn measure(&self, file: &Path) -> Result<Measurement> {
        let source = SourceFile::read(file).await?;
        Ok(self.measure_source(&source).await)
    }

    /// Measure a file whose text is already in memory
    pub async fn measure_source(&self, source: &SourceFile) -> Measurement {
        let lint_issues = self.lint_issues(source).await;
        let lint = LintSummary::from_issues(&lint_issues);
        let syntax_errors = self.syntax_errors(source).await;
        let complexity = self.complexity(source).await;

        let code_quality_score = self
            .scorer
            .calculate(complexity.analyzer_loc as f64, complexity.cyclomatic_complexity.sum);

        debug!(
            "Measured {}: {} lint issue(s), {} syntax error(s), complexity sum {}, score {}",
            source.path.display(),
            lint.total,
            syntax_errors,
            complexity.cyclomatic_complexity.sum,
            code_quality_score
        );

        Measurement {
            file_name: source.display_name(),
            text: source.text.clone(),
            lines_of_code: source.line_count(),
            lint_issues,
            lint,
            syntax_errors,
            complexity,
            code_quality_score,
        }
    }

    async fn lint_issues(&self, source: &SourceFile) -> Vec<LintIssue> {
        match self.measurements.lint_issues(&source.path).await {
            Ok(issues) => issues,
            Err(e) => {
                warn!("Lint measurement failed for {}: {}", source.path.display(), e);
                Vec::new()
            }
        }
    }

    async fn syntax_errors(&self, source: &SourceFile) -> usize {
        match self.measurements.syntax_check(&source.path).await {
            Ok(stderr) => count_error_lines(&stderr),
            Err(e) => {
                warn!("Syntax check failed for {}: {}", source.path.display(), e);
                0
            }
        }
    }

    async fn complexity(&self, source: &SourceFile) -> ComplexityAnalysis {
        let failure = match self.measurements.complexity_report(&source.path).await {
            Ok(report) => return parse_homplexity_output(&report),
            Err(e) => e.to_string(),
        };

        let Some(fallback) = &self.fallback else {
            warn!("Complexity analysis failed for {}: {}", source.path.display(), failure);
            return ComplexityAnalysis::unavailable(failure);
        };

        warn!(
            "Complexity analysis failed for {}, asking the remote estimator: {}",
            source.path.display(),
            failure
        );
        match fallback.estimate_complexity(&source.text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Complexity fallback failed for {}: {}", source.path.display(), e);
                ComplexityAnalysis::unavailable(format!("{failure}; fallback: {e}"))
            }
        }
    }
}
