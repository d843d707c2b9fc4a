//! refactorhud CLI Entry Point
//!
//! Measures a Haskell project, refactors it along each track and reports the
//! before/after metrics.

mod discovery;
mod setup;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use refactorhud_core::{PipelineConfig, Report, ToolchainProvider, Track, TrackReport};
use refactorhud_utils::logging::{init_logging, LogLevel, LoggerConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "refactorhud")]
#[command(about = "refactorhud - Before/after quality metrics for refactoring tracks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure a project, run the refactoring tracks and write the report
    Run {
        /// Project directory to refactor
        project_dir: PathBuf,

        /// Configuration file (TOML, JSON or YAML)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Override a configuration value, e.g. `--set tools.linter.program=hlint`
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Report path, overriding the configured one (.json, .yaml or .yml)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Project name recorded in the report; defaults to the directory name
        #[arg(short = 'n', long)]
        project_name: Option<String>,

        /// Tracks to run
        #[arg(short = 't', long = "track", value_enum, default_values_t = Track::ACTIVE)]
        tracks: Vec<Track>,

        /// Enable debug logging
        #[arg(short = 'd', long)]
        debug: bool,
    },

    /// Check that the configured external tools can be found
    CheckTools {
        /// Configuration file (TOML, JSON or YAML)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Override a configuration value, e.g. `--set tools.linter.program=hlint`
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let debug = matches!(cli.command, Commands::Run { debug: true, .. });
    init_logging(LoggerConfig {
        level: if debug { LogLevel::Debug } else { LogLevel::Info },
        ..LoggerConfig::default()
    })?;

    match cli.command {
        Commands::Run {
            project_dir,
            config,
            overrides,
            output,
            project_name,
            tracks,
            debug: _,
        } => {
            let mut config = setup::load_config(config.as_deref())?;
            setup::apply_overrides(&mut config, &overrides)?;
            if let Some(output) = output {
                config.output_path = output;
            }
            run(&project_dir, config, project_name, &tracks).await
        }
        Commands::CheckTools { config, overrides } => {
            let mut config = setup::load_config(config.as_deref())?;
            setup::apply_overrides(&mut config, &overrides)?;
            check_tools(&config).await
        }
    }
}

async fn run(project_dir: &Path, config: PipelineConfig, project_name: Option<String>, tracks: &[Track]) -> Result<()> {
    if !project_dir.is_dir() {
        bail!("Project path must be an existing directory: {}", project_dir.display());
    }
    // Variant trees and the default project name come from the resolved path
    let project_dir = &std::fs::canonicalize(project_dir)
        .with_context(|| format!("Failed to resolve project directory {}", project_dir.display()))?;

    let project_name = project_name.unwrap_or_else(|| {
        project_dir
            .file_name()
            .map_or_else(|| project_dir.display().to_string(), |n| n.to_string_lossy().into_owned())
    });

    let exclude = config.exclude_patterns.clone().unwrap_or_default();
    let files = discovery::discover_sources(project_dir, &config.source_extensions, &exclude);
    info!("Found {} source file(s) in {}", files.len(), project_dir.display());

    let pipeline = setup::build_pipeline(&config, project_dir, tracks)?;
    let report = pipeline
        .run(&project_name, &files)
        .await
        .with_context(|| format!("Refactoring pipeline failed for {}", project_dir.display()))?;

    print_summary(&report);
    println!("\n💾 Report saved to: {}", config.output_path.display());
    Ok(())
}

fn print_summary(report: &Report) {
    println!("\n=== {} ===", report.project_name);
    println!(
        "{:<14} {:>6} {:>8} {:>10} {:>8} {:>8} {:>8}",
        "phase", "files", "loc", "cc sum", "hints", "errors", "score"
    );

    print_row("pre_refactor", report.pre_refactor());
    for track in Track::all() {
        if let Some(track_report) = report.track(track) {
            print_row(track.as_str(), track_report);
        }
    }
}

fn print_row(label: &str, track: &TrackReport) {
    let overall = &track.overall;
    println!(
        "{:<14} {:>6} {:>8} {:>10} {:>8} {:>8} {:>8.2}",
        label,
        overall.files_analyzed,
        overall.lines_of_code,
        overall.cyclomatic_complexity.sum,
        overall.hlint_suggestions.total,
        overall.syntax_errors,
        overall.code_quality_score
    );
}

async fn check_tools(config: &PipelineConfig) -> Result<()> {
    let statuses = ToolchainProvider::from_config(config).check_tool_availability().await;

    let mut missing = 0;
    for status in &statuses {
        match (&status.resolved_path, &status.version) {
            (Some(path), version) => println!(
                "✅ {} ({}) {} at {}",
                status.tool,
                status.program,
                version.as_deref().unwrap_or("unknown version"),
                path.display()
            ),
            (None, _) => {
                missing += 1;
                println!("❌ {} ({}) not found", status.tool, status.program);
            }
        }
    }

    if missing > 0 {
        bail!("{} of {} external tool(s) are missing", missing, statuses.len());
    }
    Ok(())
}
