//! Prompt Templates
//!
//! The hybrid-track instruction template receives the rendered static
//! suggestions at [`SUGGESTIONS_MARKER`]; the file itself travels separately as
//! the user message.

use std::path::Path;

use crate::LlmResult;
use refactorhud_core::Suggestion;

/// Placeholder replaced with the rendered static suggestions
pub const SUGGESTIONS_MARKER: &str = "{{STATIC_SUGGESTIONS}}";

const BUILTIN_HYBRID_TEMPLATE: &str = r#"You are a senior Haskell engineer reviewing one source file.

A static analyzer reported the following findings for this file. Each finding
gives its location, a title, the offending code under "Found" and the
analyzer's proposed replacement under "Perhaps":

{{STATIC_SUGGESTIONS}}

Using these findings as a starting point, together with your own review of the
full code, select refactorings that improve readability, remove redundancy or
reduce cyclomatic complexity without changing behaviour.

Rules:
- "target_snippet" must be copied verbatim from the full code, including
  indentation and line breaks; it is replaced by exact text substitution.
- "refactored_suggestion" must be a drop-in replacement for the target.
- Prefer small, independent edits. Do not propose overlapping targets.
- If nothing is worth changing, return an empty list.

Respond with a single JSON object and nothing else:
{
  "final_candidates": [
    {
      "target_snippet": "<exact text from the code>",
      "refactored_suggestion": "<replacement text>",
      "justification": "<one sentence>"
    }
  ]
}
"#;

/// System prompt for the complexity fallback
pub const COMPLEXITY_SYSTEM_PROMPT: &str = "You are a code analysis assistant specialized in Haskell. \
Analyze Haskell code and return JSON outputs. Do not return any additional explanation or text \
besides the JSON object. Your output must strictly follow the provided format.";

/// Hybrid-track instruction template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_HYBRID_TEMPLATE)
    }

    /// Read a template file
    pub fn load(path: &Path) -> LlmResult<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }

    /// Built-in template unless `path` is given
    pub fn from_optional_path(path: Option<&Path>) -> LlmResult<Self> {
        path.map_or_else(|| Ok(Self::builtin()), Self::load)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// System prompt for one file; the marker is left untouched when there are no suggestions
    pub fn render(&self, suggestions: &[Suggestion]) -> String {
        if suggestions.is_empty() {
            return self.text.clone();
        }

        self.text.replace(SUGGESTIONS_MARKER, &render_suggestions(suggestions))
    }
}

/// Suggestions back in the analyzer's own text shape, one blank-line-terminated block each
pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    suggestions.iter().map(Suggestion::render).collect()
}

/// User message carrying the file under review
pub fn full_code_message(code: &str) -> String {
    format!("\nFull Code:\n{code}")
}

/// User message for the complexity fallback
pub fn complexity_request(code: &str) -> String {
    format!(
        "Analyze the following Haskell code and return a JSON object with the cyclomatic complexity of each function. \
The JSON should have the function names as keys and their cyclomatic complexity as values. \
Also, include the computed minimum, maximum, average, and sum of these values as additional keys (min, max, average, sum). \
Also calculate how many Lines of Code are in the input. \
Here is the code:\n\n{code}\n\n\
Output your results in JSON format exactly as follows (do not output any additional text):\n\
{{\n    \"cyclomatic_complexity\": {{\n        \"min\": 0,\n        \"max\": 0,\n        \"average\": 0,\n        \"sum\": 0\n    }},\n    \"homplexity_loc\": 0,\n    \"homplexity_output\": \"\"\n}}"
    )
}
