//! GHC Front-end Syntax Check
//!
//! Runs the compiler without code generation and hands back its standard
//! error. Only the number of error lines is used downstream.

use super::{run_on_file, ExternalTool};
use crate::ToolCommand;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// Marker the compiler puts on every error diagnostic line
pub const ERROR_MARKER: &str = "error:";

pub struct GhcIntegration {
    command: ToolCommand,
}

impl GhcIntegration {
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }
}

#[async_trait::async_trait]
impl ExternalTool for GhcIntegration {
    type Output = String;

    fn tool_name(&self) -> &'static str {
        "ghc"
    }

    fn command(&self) -> &ToolCommand {
        &self.command
    }

    /// A non-zero exit is the normal outcome for a broken file, so only a
    /// failure to launch is an error here.
    async fn analyze_file(&self, file_path: &Path) -> Result<Self::Output> {
        let output = run_on_file(&self.command, &[], file_path).await?;
        debug!("ghc exited with {:?} on {}", output.status.code(), file_path.display());

        Ok(String::from_utf8_lossy(&output.stderr).into_owned())
    }
}

/// Number of lines carrying [`ERROR_MARKER`]; every error counts, not just the first
pub fn count_error_lines(stderr: &str) -> usize {
    stderr.lines().filter(|line| line.contains(ERROR_MARKER)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_error_lines() {
        let stderr = "\
[1 of 1] Compiling Main ( A.hs, nothing )

A.hs:3:1: error: parse error on input 'where'
  |
3 | where
  | ^^^^^

A.hs:9:5: error:
    Variable not in scope: foo
";
        assert_eq!(count_error_lines(stderr), 2);
        assert_eq!(count_error_lines(""), 0);
        assert_eq!(count_error_lines("A.hs:1:1: warning: [-Wmissing-signatures]"), 0);
    }

    #[tokio::test]
    async fn test_ghc_version() {
        let ghc = GhcIntegration::new(ToolCommand::new("ghc", &["-fno-code"]));

        if ghc.is_available().await {
            let version = ghc.get_version().await.unwrap();
            println!("GHC version: {}", version);
            assert!(!version.is_empty());
        }
    }
}
