//! refactorhud Core - Data Model and Tool Integrations
//!
//! This crate provides the pieces every other refactorhud crate builds on:
//! - The suggestion / candidate / metrics / report data model
//! - The line-oriented parser for the linter's free-text diagnostics
//! - Subprocess integrations for the linter, compiler front-end and complexity analyzer
//! - The [`MeasurementProvider`](external_tools::MeasurementProvider) capability that
//!   the metric collector and track strategies are written against
//! - Pipeline configuration

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
)]
#![allow(
    clippy::module_name_repetitions,  // Often necessary for clarity
    clippy::cast_precision_loss,      // Counts converted to f64 stay far below 2^52
)]

pub mod models;
pub mod diagnostics;
pub mod external_tools;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use diagnostics::parse_diagnostics;
pub use external_tools::{MeasurementProvider, ToolchainProvider};
pub use models::{
    source::{SourceFile, count_lines},
    suggestion::{Suggestion, Candidate},
    metrics::{ComplexityStats, ComplexityAnalysis, ComplexitySource, LintIssue, LintCategory, LintSummary, Measurement},
    report::{FileMetrics, Findings, RefactoredCode, OverallStats, TrackReport, Report, ReportAnalysis},
};

/// Result type used throughout refactorhud core
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for refactorhud core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// External tool error
    #[error("External tool error: {tool}: {message}")]
    ExternalTool { tool: String, message: String },

    /// Timeout error
    #[error("Operation timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Utility error
    #[error("Utility error: {0}")]
    Util(#[from] refactorhud_utils::UtilError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Refactoring tracks, each producing one variant per file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Track {
    /// Linter findings applied by the linter's own rewrite
    Static,
    /// Remote suggestion service seeded with the linter findings
    Hybrid,
    /// Remote suggestion service alone; reserved in the report, never run
    LlmOnly,
}

impl Track {
    /// Tracks the pipeline actually runs, in execution order
    pub const ACTIVE: [Track; 2] = [Track::Static, Track::Hybrid];

    /// Every track that has a slot in the report
    pub fn all() -> [Track; 3] {
        [Track::Static, Track::Hybrid, Track::LlmOnly]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Track::Static => "static",
            Track::Hybrid => "hybrid",
            Track::LlmOnly => "llm_only",
        }
    }

    /// Name of the sibling directory holding this track's variant tree
    pub fn variant_dir_name(&self) -> String {
        format!("{}_refactored", self.as_str())
    }

    /// Key under which the pre-refactor record lists this track's variant path
    pub fn variant_key(&self) -> String {
        format!("{}_refactored_file", self.as_str())
    }

    /// Variant location for `file` of the project rooted at `project_dir`:
    /// `<project_dir>/../<track>_refactored/<relative path>`, with relative
    /// inputs resolved against the current directory
    pub fn variant_path(&self, project_dir: &Path, file: &Path) -> Result<PathBuf> {
        let relative = refactorhud_utils::relative_to(file, project_dir)?;
        let project_dir = refactorhud_utils::absolute_path(project_dir)?;
        let root = project_dir
            .parent()
            .map_or_else(|| project_dir.clone(), Path::to_path_buf)
            .join(self.variant_dir_name());

        Ok(refactorhud_utils::safe_path_join(&root, &relative)?)
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the static track turns linter findings into a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum StaticMode {
    /// Trust the linter's own auto-refactor output
    #[default]
    AutoRefactor,
    /// Convert each Found/Perhaps pair into a candidate and apply it textually
    ApplySuggestions,
}

/// One external program invocation: binary plus the fixed leading arguments
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToolCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// External measurement tools
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Linter; `--json` and `--refactor` are appended for its structured and rewrite modes
    pub linter: ToolCommand,
    /// Compiler front-end used only for its syntax-error count
    pub compiler: ToolCommand,
    /// Cyclomatic-complexity analyzer
    pub complexity: ToolCommand,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            linter: ToolCommand::new("hlint", &[]),
            compiler: ToolCommand::new("ghc", &["-fno-code"]),
            complexity: ToolCommand::new("homplexity-cli", &["--severity", "Debug"]),
        }
    }
}

/// Remote completion service settings
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Chat-completions endpoint
    pub api_url: String,
    /// Model used for hybrid-track candidates
    pub model: String,
    /// Model used when the complexity analyzer fails
    pub complexity_model: String,
    /// Environment variable holding the bearer token
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "deepseek/deepseek-r1".to_string(),
            complexity_model: "openai/gpt-4o-2024-11-20".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            timeout_secs: 300,
        }
    }
}

/// Configuration for one pipeline run
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tools: ToolsConfig,
    pub llm: LlmSettings,
    /// Upper bound for any single external tool invocation
    pub tool_timeout_secs: u64,
    /// Replaces the built-in hybrid instruction template
    pub prompt_template_path: Option<PathBuf>,
    /// Source file extensions picked up from the project directory
    pub source_extensions: Vec<String>,
    /// Patterns to exclude
    pub exclude_patterns: Option<HashSet<String>>,
    /// Where the final report JSON is written
    pub output_path: PathBuf,
    pub static_mode: StaticMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tools: ToolsConfig::default(),
            llm: LlmSettings::default(),
            tool_timeout_secs: 120,
            prompt_template_path: None,
            source_extensions: vec!["hs".to_string()],
            exclude_patterns: Some(refactorhud_utils::default_exclusion_patterns()),
            output_path: PathBuf::from("project_result/project_result.json"),
            static_mode: StaticMode::AutoRefactor,
        }
    }
}

impl PipelineConfig {
    /// Load from a TOML/JSON/YAML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        Ok(refactorhud_utils::load_config(path)?)
    }

    pub fn tool_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tool_timeout_secs)
    }
}
