//! Suggestion and Candidate Models
//!
//! A [`Suggestion`] is one finding parsed from the linter's free-text output.
//! A [`Candidate`] is one accepted `(target, replacement)` substitution, either
//! derived from a suggestion or returned by the remote suggestion service.

use serde::{Serialize, Deserialize};

/// Title of the stand-in suggestion used when the linter reports nothing
pub const PLACEHOLDER_TITLE: &str = "No suggestions";

/// Single found-line of the stand-in suggestion
pub const PLACEHOLDER_SNIPPET: &str = "-- Manual candidate snippet";

/// One linter finding with its offending and proposed code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// `<path>:(<line>,<col>)-(<line>,<col>)`, or the bare file name for a placeholder
    pub location: String,
    #[serde(rename = "suggestion_title")]
    pub title: String,
    #[serde(default)]
    pub found_block: Vec<String>,
    #[serde(default)]
    pub perhaps_block: Vec<String>,
    /// Set only on the placeholder synthesized for files without findings
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub synthesized: bool,
}

impl Suggestion {
    pub fn new(location: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            title: title.into(),
            found_block: Vec::new(),
            perhaps_block: Vec::new(),
            synthesized: false,
        }
    }

    /// Stand-in so downstream prompts always have at least one entry.
    /// Never converted into a [`Candidate`].
    pub fn placeholder(file_name: &str) -> Self {
        Self {
            location: file_name.to_string(),
            title: PLACEHOLDER_TITLE.to_string(),
            found_block: vec![PLACEHOLDER_SNIPPET.to_string()],
            perhaps_block: Vec::new(),
            synthesized: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.synthesized
    }

    pub fn found_text(&self) -> String {
        self.found_block.join("\n")
    }

    pub fn perhaps_text(&self) -> String {
        self.perhaps_block.join("\n")
    }

    /// Render back into the linter's own text shape, terminated by a blank line
    pub fn render(&self) -> String {
        format!(
            "{}: Suggestion: {}\nFound\n{}\nPerhaps\n{}\n\n",
            self.location,
            self.title,
            self.found_text(),
            self.perhaps_text()
        )
    }
}

/// One textual substitution to apply to a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Exact, whitespace-sensitive text expected in the source
    #[serde(default)]
    pub target_snippet: String,
    #[serde(default)]
    pub refactored_suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

impl Candidate {
    pub fn new(target_snippet: impl Into<String>, refactored_suggestion: impl Into<String>) -> Self {
        Self {
            target_snippet: target_snippet.into(),
            refactored_suggestion: refactored_suggestion.into(),
            justification: None,
        }
    }

    #[must_use]
    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = Some(justification.into());
        self
    }

    /// Candidate from a linter suggestion's Found/Perhaps pair.
    ///
    /// Returns `None` for the placeholder and for suggestions missing either block.
    pub fn from_suggestion(suggestion: &Suggestion) -> Option<Self> {
        if suggestion.is_placeholder()
            || suggestion.found_block.is_empty()
            || suggestion.perhaps_block.is_empty()
        {
            return None;
        }

        Some(
            Self::new(suggestion.found_text(), suggestion.perhaps_text())
                .with_justification(suggestion.title.clone()),
        )
    }

    /// Both sides non-empty; anything else is skipped by the application engine
    pub fn is_applicable(&self) -> bool {
        !self.target_snippet.is_empty() && !self.refactored_suggestion.is_empty()
    }
}
