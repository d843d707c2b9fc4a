//! Pipeline assembly from configuration

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use refactorhud_analysis::{MetricCollector, RefactorPipeline, TrackOrchestrator};
use refactorhud_core::{MeasurementProvider, PipelineConfig, ToolchainProvider, Track};
use refactorhud_llm::{ComplexityFallback, HybridSuggester, OpenRouterClient, PromptTemplate};
use refactorhud_transform::{HybridStrategy, StaticStrategy, VariantStore};
use refactorhud_utils::merge_configs;
use serde_json::Value;
use tracing::debug;

/// Configuration file if given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

/// Apply `key.path=value` overrides on top of the loaded configuration.
///
/// Values are read as JSON when they parse (`30`, `true`, `["hs"]`) and as
/// plain strings otherwise.
pub fn apply_overrides(config: &mut PipelineConfig, overrides: &[String]) -> Result<()> {
    for entry in overrides {
        let Some((key, raw)) = entry.split_once('=').filter(|(key, _)| !key.is_empty()) else {
            bail!("Override must look like key=value: {}", entry);
        };

        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        let nested = key.rsplit('.').fold(value, |inner, part| {
            let mut object = serde_json::Map::new();
            object.insert(part.to_string(), inner);
            Value::Object(object)
        });

        merge_configs(config, nested).with_context(|| format!("Invalid override {}", entry))?;
        debug!("Applied configuration override {}", entry);
    }
    Ok(())
}

/// Wire the real tools and remote service into a pipeline for `project_dir`
pub fn build_pipeline(config: &PipelineConfig, project_dir: &Path, tracks: &[Track]) -> Result<RefactorPipeline> {
    let tools: Arc<dyn MeasurementProvider> = Arc::new(ToolchainProvider::from_config(config));

    let estimator = OpenRouterClient::from_settings(&config.llm, &config.llm.complexity_model)
        .context("Failed to create the complexity fallback client")?;
    let collector = MetricCollector::new(Arc::clone(&tools)).with_fallback(Arc::new(ComplexityFallback::new(estimator)));

    let mut orchestrator = TrackOrchestrator::new(collector.clone(), VariantStore::new(project_dir));
    for track in tracks {
        debug!("Enabling {} track", track);
        orchestrator = match track {
            Track::Static => orchestrator.with_strategy(Box::new(StaticStrategy::new(Arc::clone(&tools), config.static_mode))),
            Track::Hybrid => {
                let client = OpenRouterClient::from_settings(&config.llm, &config.llm.model)
                    .context("Failed to create the suggestion service client")?;
                let template = PromptTemplate::from_optional_path(config.prompt_template_path.as_deref())
                    .context("Failed to load the prompt template")?;
                orchestrator.with_strategy(Box::new(HybridStrategy::new(Arc::new(HybridSuggester::new(client, template)))))
            }
            Track::LlmOnly => bail!("The {} track is reserved and cannot be run yet", track),
        };
    }

    Ok(RefactorPipeline::new(collector, orchestrator).with_output_path(&config.output_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use refactorhud_core::StaticMode;

    #[test]
    fn test_default_config_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.source_extensions, ["hs"]);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/refactorhud.toml"))).is_err());
    }

    #[test]
    fn test_overrides_replace_nested_values() {
        let mut config = PipelineConfig::default();
        let overrides = [
            "tool_timeout_secs=30".to_string(),
            "tools.linter.program=/opt/bin/hlint".to_string(),
            "static_mode=apply_suggestions".to_string(),
        ];

        apply_overrides(&mut config, &overrides).unwrap();

        assert_eq!(config.tool_timeout_secs, 30);
        assert_eq!(config.tools.linter.program, "/opt/bin/hlint");
        assert_eq!(config.tools.linter.args, PipelineConfig::default().tools.linter.args);
        assert_eq!(config.static_mode, StaticMode::ApplySuggestions);
        assert_eq!(config.source_extensions, ["hs"]);
    }

    #[test]
    fn test_malformed_overrides_are_errors() {
        let mut config = PipelineConfig::default();

        assert!(apply_overrides(&mut config, &["tool_timeout_secs".to_string()]).is_err());
        assert!(apply_overrides(&mut config, &["=5".to_string()]).is_err());
        assert!(apply_overrides(&mut config, &["tool_timeout_secs=soon".to_string()]).is_err());
    }

    #[test]
    fn test_reserved_track_is_rejected() {
        let config = PipelineConfig::default();
        let result = build_pipeline(&config, Path::new("/work/project"), &[Track::Static, Track::LlmOnly]);
        assert!(result.is_err());
    }

    #[test]
    fn test_active_tracks_build() {
        let config = PipelineConfig::default();
        assert!(build_pipeline(&config, Path::new("/work/project"), &Track::ACTIVE).is_ok());
    }
}
