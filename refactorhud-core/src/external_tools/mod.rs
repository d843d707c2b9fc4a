//! External Tool Integration System
//!
//! Subprocess integrations for the three measurement tools (hlint, ghc,
//! homplexity) and the [`MeasurementProvider`] capability the metric collector
//! and track strategies are written against.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::Context;
use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

use crate::models::LintIssue;
use crate::{Error, PipelineConfig, Result, ToolCommand, ToolsConfig};

pub mod hlint;
pub mod ghc;
pub mod homplexity;

pub use hlint::HlintIntegration;
pub use ghc::GhcIntegration;
pub use homplexity::HomplexityIntegration;

/// Base trait for all external tool integrations
#[async_trait::async_trait]
pub trait ExternalTool: Send + Sync {
    type Output: Send;

    /// Get the tool name
    fn tool_name(&self) -> &'static str;

    /// Configured invocation
    fn command(&self) -> &ToolCommand;

    /// Run the tool's primary mode against one file
    async fn analyze_file(&self, file: &Path) -> anyhow::Result<Self::Output>;

    /// Check if the tool binary can be found on PATH
    async fn is_available(&self) -> bool {
        which::which(&self.command().program).is_ok()
    }

    /// Get the tool version
    async fn get_version(&self) -> anyhow::Result<String> {
        let program = &self.command().program;
        let output = TokioCommand::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to get {program} version"))?;

        if !output.status.success() {
            return Err(anyhow::anyhow!("Failed to get {program} version"));
        }

        let version = String::from_utf8_lossy(&output.stdout);
        Ok(version.lines().next().unwrap_or_default().trim().to_string())
    }
}

/// Run `command` with extra mode arguments against `file`, capturing both streams
pub(crate) async fn run_on_file(command: &ToolCommand, mode_args: &[&str], file: &Path) -> anyhow::Result<Output> {
    debug!("Running {} {:?} on {}", command.program, mode_args, file.display());

    TokioCommand::new(&command.program)
        .args(&command.args)
        .args(mode_args)
        .arg(file)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .with_context(|| format!("Failed to execute {}", command.program))
}

/// Source of per-file measurements
///
/// Every call is scoped to one file on disk. Errors are returned rather than
/// swallowed; callers decide how to degrade.
#[async_trait::async_trait]
pub trait MeasurementProvider: Send + Sync {
    /// Linter issues in structured form
    async fn lint_issues(&self, file: &Path) -> Result<Vec<LintIssue>>;

    /// Linter report in its free-text form
    async fn lint_diagnostics(&self, file: &Path) -> Result<String>;

    /// File text after the linter's own rewrite
    async fn auto_refactor(&self, file: &Path) -> Result<String>;

    /// Compiler front-end standard error; a failing exit status is not an error
    async fn syntax_check(&self, file: &Path) -> Result<String>;

    /// Complexity analyzer text report; a failing exit status is an error
    async fn complexity_report(&self, file: &Path) -> Result<String>;
}

/// Availability of one configured tool
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ToolStatus {
    pub tool: &'static str,
    pub program: String,
    pub resolved_path: Option<PathBuf>,
    pub version: Option<String>,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.resolved_path.is_some()
    }
}

/// [`MeasurementProvider`] backed by the real toolchain, every call time-bounded
pub struct ToolchainProvider {
    hlint: HlintIntegration,
    ghc: GhcIntegration,
    homplexity: HomplexityIntegration,
    timeout: Duration,
}

impl ToolchainProvider {
    pub fn new(tools: &ToolsConfig, timeout: Duration) -> Self {
        Self {
            hlint: HlintIntegration::new(tools.linter.clone()),
            ghc: GhcIntegration::new(tools.compiler.clone()),
            homplexity: HomplexityIntegration::new(tools.complexity.clone()),
            timeout,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(&config.tools, config.tool_timeout())
    }

    /// Probe every configured tool
    pub async fn check_tool_availability(&self) -> Vec<ToolStatus> {
        info!("Checking external tool availability...");

        vec![
            probe(&self.hlint).await,
            probe(&self.ghc).await,
            probe(&self.homplexity).await,
        ]
    }

    async fn bounded<T, F>(&self, tool: &str, work: F) -> Result<T>
    where
        T: Send,
        F: Future<Output = anyhow::Result<T>> + Send,
    {
        match tokio::time::timeout(self.timeout, work).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Error::ExternalTool {
                tool: tool.to_string(),
                message: format!("{e:#}"),
            }),
            Err(_) => Err(Error::Timeout { seconds: self.timeout.as_secs() }),
        }
    }
}

async fn probe<T: ExternalTool>(tool: &T) -> ToolStatus {
    let program = tool.command().program.clone();
    let resolved_path = which::which(&program).ok();

    let version = if resolved_path.is_some() {
        match tool.get_version().await {
            Ok(version) => Some(version),
            Err(e) => {
                debug!("{} version probe failed: {:#}", tool.tool_name(), e);
                None
            }
        }
    } else {
        None
    };

    if resolved_path.is_some() {
        debug!("✅ {} is available", tool.tool_name());
    } else {
        warn!("⚠️ {} ({}) is not available", tool.tool_name(), program);
    }

    ToolStatus {
        tool: tool.tool_name(),
        program,
        resolved_path,
        version,
    }
}

#[async_trait::async_trait]
impl MeasurementProvider for ToolchainProvider {
    async fn lint_issues(&self, file: &Path) -> Result<Vec<LintIssue>> {
        self.bounded(self.hlint.tool_name(), self.hlint.analyze_file(file)).await
    }

    async fn lint_diagnostics(&self, file: &Path) -> Result<String> {
        self.bounded(self.hlint.tool_name(), self.hlint.diagnostics(file)).await
    }

    async fn auto_refactor(&self, file: &Path) -> Result<String> {
        self.bounded(self.hlint.tool_name(), self.hlint.refactor(file)).await
    }

    async fn syntax_check(&self, file: &Path) -> Result<String> {
        self.bounded(self.ghc.tool_name(), self.ghc.analyze_file(file)).await
    }

    async fn complexity_report(&self, file: &Path) -> Result<String> {
        self.bounded(self.homplexity.tool_name(), self.homplexity.analyze_file(file)).await
    }
}
