//! Whole-pipeline runs over a small project with scripted tools

use std::path::{Path, PathBuf};
use std::sync::Arc;

use refactorhud_analysis::{MetricCollector, RefactorPipeline, TrackOrchestrator};
use refactorhud_core::{
    Candidate, Error, Findings, LintIssue, MeasurementProvider, RefactoredCode, Result, StaticMode, Suggestion, Track,
};
use refactorhud_llm::{LlmResult, SuggestionProvider};
use refactorhud_transform::{HybridStrategy, StaticStrategy, VariantStore};
use tempfile::TempDir;

const TARGET: &str = "putStrLn (show 1)";
const REPLACEMENT: &str = "print 1";

const QUIET_MODULE: &str = "module A where\n\nanswer :: Int\nanswer = 42\n";
const NOISY_MODULE: &str = "module Main where\n\nmain :: IO ()\nmain =\n  putStrLn (show 1)\n";

/// Tools whose answers depend only on the file's current contents
struct ContentTools;

fn read(file: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(file)?)
}

#[async_trait::async_trait]
impl MeasurementProvider for ContentTools {
    async fn lint_issues(&self, file: &Path) -> Result<Vec<LintIssue>> {
        let text = read(file)?;
        Ok(if text.contains(TARGET) {
            vec![LintIssue {
                severity: "Suggestion".to_string(),
                hint: "Use print".to_string(),
                file: file.display().to_string(),
                ..LintIssue::default()
            }]
        } else {
            Vec::new()
        })
    }

    async fn lint_diagnostics(&self, file: &Path) -> Result<String> {
        let text = read(file)?;
        if !text.contains(TARGET) {
            return Ok("No hints\n".to_string());
        }
        Ok(format!(
            "{}:(5,3)-(5,19): Suggestion: Use print\nFound\n  {TARGET}\nPerhaps\n  {REPLACEMENT}\n\n1 hint\n",
            file.display()
        ))
    }

    async fn auto_refactor(&self, file: &Path) -> Result<String> {
        Ok(read(file)?.replace(TARGET, REPLACEMENT))
    }

    async fn syntax_check(&self, _file: &Path) -> Result<String> {
        Ok(String::new())
    }

    async fn complexity_report(&self, file: &Path) -> Result<String> {
        let text = read(file)?;
        if text.is_empty() {
            return Err(Error::ExternalTool { tool: "homplexity".to_string(), message: "empty module".to_string() });
        }
        let complexity = if text.contains(TARGET) { 2 } else { 1 };
        Ok(format!(
            "Debug:SrcLoc \"{0}\" 1 1: Function f has cyclomatic complexity of {complexity}\n\
             Debug:SrcLoc \"{0}\" 1 1: Function f has {1} lines of code\n",
            file.display(),
            text.lines().count()
        ))
    }
}

/// Suggestion service that only knows one rewrite
struct OneRewrite;

#[async_trait::async_trait]
impl SuggestionProvider for OneRewrite {
    async fn suggest_candidates(&self, _static_suggestions: &[Suggestion], code: &str) -> LlmResult<Vec<Candidate>> {
        Ok(if code.contains(TARGET) {
            vec![Candidate::new(TARGET, REPLACEMENT).with_justification("Use print")]
        } else {
            Vec::new()
        })
    }
}

struct Project {
    root: TempDir,
    files: Vec<PathBuf>,
}

impl Project {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("project");
        std::fs::create_dir_all(dir.join("src")).unwrap();

        let quiet = dir.join("src/A.hs");
        let noisy = dir.join("src/Main.hs");
        std::fs::write(&quiet, QUIET_MODULE).unwrap();
        std::fs::write(&noisy, NOISY_MODULE).unwrap();

        Self { root, files: vec![quiet, noisy] }
    }

    fn dir(&self) -> PathBuf {
        self.root.path().join("project")
    }

    fn output(&self) -> PathBuf {
        self.root.path().join("project_result/project_result.json")
    }

    fn pipeline(&self) -> RefactorPipeline {
        let tools: Arc<dyn MeasurementProvider> = Arc::new(ContentTools);
        let collector = MetricCollector::new(tools.clone());
        let orchestrator = TrackOrchestrator::new(collector.clone(), VariantStore::new(self.dir()))
            .with_strategy(Box::new(StaticStrategy::new(tools, StaticMode::AutoRefactor)))
            .with_strategy(Box::new(HybridStrategy::new(Arc::new(OneRewrite))));

        RefactorPipeline::new(collector, orchestrator).with_output_path(self.output())
    }

    fn name(&self, index: usize) -> String {
        self.files[index].display().to_string()
    }
}

#[tokio::test]
async fn pre_refactor_phase_measures_every_file_in_order() {
    let project = Project::new();
    let report = project.pipeline().run("demo", &project.files).await.unwrap();

    let pre = report.pre_refactor();
    let names: Vec<_> = pre.files.iter().map(|f| f.file_name.clone()).collect();
    assert_eq!(names, [project.name(0), project.name(1)]);

    assert_eq!(pre.overall.files_analyzed, 2);
    assert_eq!(pre.overall.lines_of_code, 9);
    assert_eq!(pre.overall.hlint_suggestions.suggestion, 1);
    assert_eq!(pre.overall.homplexity_lines_of_code, 9);
    assert!((pre.overall.cyclomatic_complexity.sum - 3.0).abs() < f64::EPSILON);
    assert!((pre.overall.cyclomatic_complexity.average - 1.5).abs() < f64::EPSILON);

    let noisy = &pre.files[1];
    assert_eq!(noisy.original_code, NOISY_MODULE);
    assert!(matches!(&noisy.suggestions, Findings::Issues(issues) if issues.len() == 1));

    let RefactoredCode::Variants(variants) = &noisy.refactored_code else {
        panic!("pre-refactor record should list variant paths");
    };
    assert_eq!(variants.len(), 3);
    assert_eq!(
        variants["static_refactored_file"],
        project.root.path().join("static_refactored/src/Main.hs").display().to_string()
    );
    assert!(variants.contains_key("llm_only_refactored_file"));
}

#[tokio::test]
async fn static_track_covers_every_file() {
    let project = Project::new();
    let report = project.pipeline().run("demo", &project.files).await.unwrap();
    let static_track = report.track(Track::Static).unwrap();

    assert_eq!(static_track.files.len(), 2);

    let quiet = static_track.file(&project.name(0)).unwrap();
    assert_eq!(quiet.refactored_code, RefactoredCode::Text(QUIET_MODULE.to_string()));
    let Findings::Suggestions(suggestions) = &quiet.suggestions else {
        panic!("static record should list parsed suggestions");
    };
    assert_eq!(suggestions.len(), 1);
    assert!(suggestions[0].is_placeholder());

    let noisy = static_track.file(&project.name(1)).unwrap();
    assert_eq!(noisy.hlint_suggestions.total, 0);
    assert_eq!(noisy.original_code, NOISY_MODULE);
    assert_eq!(
        noisy.refactored_file_name.as_deref(),
        Some(project.root.path().join("static_refactored/src/Main.hs").display().to_string().as_str())
    );

    let on_disk = std::fs::read_to_string(project.root.path().join("static_refactored/src/A.hs")).unwrap();
    assert_eq!(on_disk, QUIET_MODULE);
}

#[tokio::test]
async fn hybrid_track_only_lists_files_with_candidates() {
    let project = Project::new();
    let report = project.pipeline().run("demo", &project.files).await.unwrap();
    let hybrid = report.track(Track::Hybrid).unwrap();

    assert_eq!(hybrid.files.len(), 1);
    assert!(hybrid.file(&project.name(0)).is_none());

    let noisy = hybrid.file(&project.name(1)).unwrap();
    assert_eq!(
        noisy.refactored_code,
        RefactoredCode::Text(NOISY_MODULE.replace(TARGET, REPLACEMENT))
    );
    assert!(matches!(&noisy.suggestions, Findings::Candidates(c) if c.len() == 1));

    assert!(project.root.path().join("hybrid_refactored/src/Main.hs").exists());
    assert!(!project.root.path().join("hybrid_refactored/src/A.hs").exists());

    assert_eq!(report.track(Track::LlmOnly).unwrap().files.len(), 0);
}

#[tokio::test]
async fn track_without_files_scores_as_empty_code() {
    let project = Project::new();
    let report = project.pipeline().run("demo", &project.files[..1]).await.unwrap();
    let hybrid = report.track(Track::Hybrid).unwrap();

    assert!(hybrid.files.is_empty());
    assert_eq!(hybrid.overall.files_analyzed, 0);
    assert_eq!(hybrid.overall.homplexity_lines_of_code, 0);
    assert!((hybrid.overall.code_quality_score - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn overall_lines_of_code_match_file_sums() {
    let project = Project::new();
    let report = project.pipeline().run("demo", &project.files).await.unwrap();

    for track in [report.pre_refactor(), report.track(Track::Static).unwrap(), report.track(Track::Hybrid).unwrap()] {
        let sum: usize = track.files.iter().map(|f| f.lines_of_code).sum();
        assert_eq!(track.overall.lines_of_code, sum);
        assert_eq!(track.overall.files_analyzed, track.files.len());
    }
}

#[tokio::test]
async fn report_is_written_as_json() {
    let project = Project::new();
    project.pipeline().run("demo", &project.files).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(project.output()).unwrap()).unwrap();

    assert_eq!(written["project_name"], "demo");
    let post = &written["analysis"]["post_refactor"];
    for key in ["static", "hybrid", "llm_only"] {
        assert!(post.get(key).is_some(), "missing {key} track");
    }
    assert_eq!(post["llm_only"]["files"].as_array().unwrap().len(), 0);
    assert_eq!(post["hybrid"]["files"][0]["suggestions"][0]["target_snippet"], TARGET);
    assert_eq!(written["analysis"]["pre_refactor"]["files"][1]["hlint_suggestions"]["suggestion"], 1);
}

#[tokio::test]
async fn unreadable_source_aborts_the_run() {
    let project = Project::new();
    let missing = project.dir().join("src/Gone.hs");

    let result = project.pipeline().run("demo", &[missing]).await;
    assert!(result.is_err());
    assert!(!project.output().exists());
}

#[tokio::test]
async fn file_outside_the_project_aborts_the_run() {
    let project = Project::new();
    let stray = project.root.path().join("Stray.hs");
    std::fs::write(&stray, QUIET_MODULE).unwrap();

    let result = project.pipeline().run("demo", &[stray]).await;
    assert!(result.is_err());
}
