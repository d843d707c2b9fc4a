//! HLint Linter Integration
//!
//! Three modes against one file: structured issues (`--json`), the free-text
//! report consumed by the diagnostic parser, and the auto-refactor rewrite
//! (`--refactor`).

use super::{run_on_file, ExternalTool};
use crate::models::LintIssue;
use crate::ToolCommand;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Output;
use tracing::{debug, warn};

/// HLint linter integration
pub struct HlintIntegration {
    command: ToolCommand,
}

impl HlintIntegration {
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }

    /// Free-text report, the header / Found / Perhaps shape
    pub async fn diagnostics(&self, file_path: &Path) -> Result<String> {
        let output = run_on_file(&self.command, &[], file_path).await?;
        let output = self.accept_hint_exit(output, file_path)?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Whole file text after applying every hint with the linter's own refactoring.
    ///
    /// Exit code 1 still carries the rewritten text on stdout; it only counts
    /// as a failure when nothing was printed.
    pub async fn refactor(&self, file_path: &Path) -> Result<String> {
        let output = run_on_file(&self.command, &["--refactor"], file_path).await?;
        let output = self.accept_hint_exit(output, file_path)?;

        if !output.status.success() && output.stdout.iter().all(u8::is_ascii_whitespace) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("HLint refactor produced no output on {}: {}", file_path.display(), stderr);
            return Err(anyhow::anyhow!("HLint refactor produced no output on {}: {}", file_path.display(), stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn accept_hint_exit(&self, output: Output, file_path: &Path) -> Result<Output> {
        // Exit code 1 is expected when hints are found
        if !output.status.success() && output.status.code() != Some(1) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("HLint execution failed on {}: {}", file_path.display(), stderr);
            return Err(anyhow::anyhow!("HLint failed on {}: {}", file_path.display(), stderr.trim()));
        }
        Ok(output)
    }
}

#[async_trait::async_trait]
impl ExternalTool for HlintIntegration {
    type Output = Vec<LintIssue>;

    fn tool_name(&self) -> &'static str {
        "hlint"
    }

    fn command(&self) -> &ToolCommand {
        &self.command
    }

    async fn analyze_file(&self, file_path: &Path) -> Result<Self::Output> {
        debug!("Running hlint analysis on file: {}", file_path.display());

        let output = run_on_file(&self.command, &["--json"], file_path).await?;
        let output = self.accept_hint_exit(output, file_path)?;

        parse_lint_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse the linter's `--json` output; empty output means no issues
pub fn parse_lint_json(stdout: &str) -> Result<Vec<LintIssue>> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(stdout).context("Failed to parse hlint JSON output")
}
