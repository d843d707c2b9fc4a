//! Homplexity Complexity Analyzer Integration
//!
//! The analyzer prints one message per definition metric, e.g.
//!
//! ```text
//! Debug:SrcLoc "src/Main.hs" 12 1: Function main has cyclomatic complexity of 3
//! Debug:SrcLoc "src/Main.hs" 12 1: Function main has 14 lines of code
//! ```
//!
//! Only lines tagged with `:SrcLoc` are read.

use super::{run_on_file, ExternalTool};
use crate::models::{ComplexityAnalysis, ComplexitySource, ComplexityStats};
use crate::ToolCommand;
use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// Raw output recorded when the analyzer ran but reported no definitions
pub const NO_DEFINITIONS_OUTPUT: &str = "error";

lazy_static! {
    static ref CYCLOMATIC: Regex =
        Regex::new(r"cyclomatic complexity of (\d+)").expect("complexity pattern is valid");
    static ref LINES_OF_CODE: Regex =
        Regex::new(r"(\d+) lines of code").expect("lines-of-code pattern is valid");
}

pub struct HomplexityIntegration {
    command: ToolCommand,
}

impl HomplexityIntegration {
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }
}

#[async_trait::async_trait]
impl ExternalTool for HomplexityIntegration {
    type Output = String;

    fn tool_name(&self) -> &'static str {
        "homplexity"
    }

    fn command(&self) -> &ToolCommand {
        &self.command
    }

    /// Raw text report; any non-zero exit is an error so the caller can fall back
    async fn analyze_file(&self, file_path: &Path) -> Result<Self::Output> {
        debug!("Running homplexity analysis on {}", file_path.display());

        let output = run_on_file(&self.command, &[], file_path).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() { stdout } else { stderr };
            warn!("Homplexity failed on {}: {}", file_path.display(), detail.trim());
            return Err(anyhow::anyhow!(
                "Homplexity exited with {:?} on {}: {}",
                output.status.code(),
                file_path.display(),
                detail.trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Fold the analyzer's text report into per-file complexity
///
/// Without any complexity line the result is all zeros (LOC included) with
/// [`NO_DEFINITIONS_OUTPUT`] as the recorded output.
pub fn parse_homplexity_output(output: &str) -> ComplexityAnalysis {
    let mut complexities = Vec::new();
    let mut lines_of_code = Vec::new();

    for line in output.lines().map(str::trim) {
        if line.is_empty() || !line.contains(":SrcLoc") {
            continue;
        }

        if let Some(value) = capture_number(&CYCLOMATIC, line) {
            complexities.push(value);
        }
        if let Some(value) = capture_number(&LINES_OF_CODE, line) {
            lines_of_code.push(value);
        }
    }

    if complexities.is_empty() {
        return ComplexityAnalysis {
            raw_output: NO_DEFINITIONS_OUTPUT.to_string(),
            source: ComplexitySource::Analyzer,
            ..ComplexityAnalysis::default()
        };
    }

    ComplexityAnalysis {
        cyclomatic_complexity: ComplexityStats::from_values(&complexities),
        analyzer_loc: lines_of_code.iter().sum(),
        raw_output: output.to_string(),
        source: ComplexitySource::Analyzer,
    }
}

fn capture_number(pattern: &Regex, line: &str) -> Option<u64> {
    pattern.captures(line)?.get(1)?.as_str().parse().ok()
}
