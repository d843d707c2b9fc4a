//! Measurement Models
//!
//! Per-file results of the three measurement tools and the normalized
//! bundle the metric collector folds them into.

use serde::{Serialize, Deserialize};

/// Cyclomatic-complexity statistics over a file's definitions
///
/// All fields are zero when no definitions were found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityStats {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub sum: f64,
}

impl ComplexityStats {
    /// Fold per-definition complexities; `average` is the arithmetic mean
    pub fn from_values(values: &[u64]) -> Self {
        let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
            return Self::default();
        };

        let sum: u64 = values.iter().sum();

        Self {
            min: min as f64,
            max: max as f64,
            average: sum as f64 / values.len() as f64,
            sum: sum as f64,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Where a file's complexity numbers came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexitySource {
    /// The complexity analyzer's own report
    Analyzer,
    /// The remote fallback, after the analyzer failed
    Fallback,
    /// Neither produced usable numbers; stats are all zero
    #[default]
    Unavailable,
}

/// Complexity analyzer result, also the JSON shape the remote fallback must return
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityAnalysis {
    #[serde(default)]
    pub cyclomatic_complexity: ComplexityStats,
    /// Effective lines of code as counted by the analyzer
    #[serde(rename = "homplexity_loc", default)]
    pub analyzer_loc: u64,
    /// Raw analyzer text, or the raw failure text when nothing could be parsed
    #[serde(rename = "homplexity_output", default)]
    pub raw_output: String,
    #[serde(default)]
    pub source: ComplexitySource,
}

impl ComplexityAnalysis {
    /// All-zero result that keeps the offending text for diagnosis
    pub fn unavailable(raw_output: impl Into<String>) -> Self {
        Self {
            raw_output: raw_output.into(),
            ..Self::default()
        }
    }
}

/// One issue from the linter's structured (JSON) output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintIssue {
    #[serde(default)]
    pub module: Vec<String>,
    #[serde(default)]
    pub decl: Vec<String>,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub start_line: u32,
    #[serde(default)]
    pub start_column: u32,
    #[serde(default)]
    pub end_line: u32,
    #[serde(default)]
    pub end_column: u32,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub note: Vec<String>,
}

/// Severity bucket of a lint issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintCategory {
    Error,
    Warning,
    Suggestion,
    Ignore,
}

impl LintCategory {
    /// Case-insensitive substring match, first bucket wins.
    /// Unrecognized severities fall in no bucket.
    pub fn classify(severity: &str) -> Option<Self> {
        let severity = severity.to_lowercase();

        [
            ("error", LintCategory::Error),
            ("warning", LintCategory::Warning),
            ("suggestion", LintCategory::Suggestion),
            ("ignore", LintCategory::Ignore),
        ]
        .into_iter()
        .find_map(|(keyword, category)| severity.contains(keyword).then_some(category))
    }
}

/// Lint issue counts by severity bucket
///
/// `total` counts every reported issue, so the buckets can sum to less than
/// `total` when a severity string is unrecognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintSummary {
    pub error: usize,
    pub warning: usize,
    pub suggestion: usize,
    pub ignore: usize,
    pub total: usize,
}

impl LintSummary {
    pub fn from_issues(issues: &[LintIssue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            summary.record(&issue.severity);
        }
        summary
    }

    /// Count one issue with the given severity string
    pub fn record(&mut self, severity: &str) {
        self.total += 1;
        match LintCategory::classify(severity) {
            Some(LintCategory::Error) => self.error += 1,
            Some(LintCategory::Warning) => self.warning += 1,
            Some(LintCategory::Suggestion) => self.suggestion += 1,
            Some(LintCategory::Ignore) => self.ignore += 1,
            None => {}
        }
    }

    /// Issues that landed in no bucket
    pub fn unclassified(&self) -> usize {
        self.total
            .saturating_sub(self.error + self.warning + self.suggestion + self.ignore)
    }
}

impl std::ops::AddAssign for LintSummary {
    fn add_assign(&mut self, other: Self) {
        self.error += other.error;
        self.warning += other.warning;
        self.suggestion += other.suggestion;
        self.ignore += other.ignore;
        self.total += other.total;
    }
}

/// Everything the metric collector measures for one file on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub file_name: String,
    /// Text that was measured
    pub text: String,
    /// Raw line count of `text`
    pub lines_of_code: usize,
    pub lint_issues: Vec<LintIssue>,
    pub lint: LintSummary,
    pub syntax_errors: usize,
    pub complexity: ComplexityAnalysis,
    pub code_quality_score: f64,
}

impl Measurement {
    pub fn analyzer_loc(&self) -> u64 {
        self.complexity.analyzer_loc
    }

    pub fn complexity_stats(&self) -> ComplexityStats {
        self.complexity.cyclomatic_complexity
    }
}
