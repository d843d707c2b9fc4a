//! Data models module for refactorhud core
//!
//! Suggestions and candidates flow from the linter and the remote suggestion
//! service into the candidate application engine; metrics and reports flow
//! from the collector into the final JSON artifact.

pub mod source;
pub mod suggestion;
pub mod metrics;
pub mod report;

pub use source::{SourceFile, count_lines};
pub use suggestion::{Suggestion, Candidate};
pub use metrics::{ComplexityStats, ComplexityAnalysis, ComplexitySource, LintIssue, LintCategory, LintSummary, Measurement};
pub use report::{FileMetrics, Findings, RefactoredCode, OverallStats, TrackReport, Report, ReportAnalysis};
