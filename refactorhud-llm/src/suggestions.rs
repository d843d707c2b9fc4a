//! Hybrid-Track Candidate Requests
//!
//! Seeds the remote model with the static findings for one file and turns its
//! reply into [`Candidate`] records.

use crate::prompt::{full_code_message, PromptTemplate};
use crate::response::parse_final_candidates;
use crate::{CompletionProvider, LlmResult};
use refactorhud_core::{Candidate, Suggestion};
use tracing::{debug, warn};

/// Source of hybrid-track candidates
#[async_trait::async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Candidates for `code`, given the static suggestions for the same file.
    ///
    /// A reply that cannot be parsed yields an empty list; only transport and
    /// service failures are errors.
    async fn suggest_candidates(&self, static_suggestions: &[Suggestion], code: &str) -> LlmResult<Vec<Candidate>>;
}

/// [`SuggestionProvider`] over any chat-completion backend
pub struct HybridSuggester<C> {
    completion: C,
    template: PromptTemplate,
}

impl<C: CompletionProvider> HybridSuggester<C> {
    pub fn new(completion: C, template: PromptTemplate) -> Self {
        Self { completion, template }
    }
}

#[async_trait::async_trait]
impl<C: CompletionProvider> SuggestionProvider for HybridSuggester<C> {
    async fn suggest_candidates(&self, static_suggestions: &[Suggestion], code: &str) -> LlmResult<Vec<Candidate>> {
        let system_prompt = self.template.render(static_suggestions);
        let reply = self
            .completion
            .complete(&system_prompt, &full_code_message(code))
            .await?;

        match parse_final_candidates(&reply) {
            Ok(candidates) => {
                debug!("{} proposed {} candidate(s)", self.completion.model(), candidates.len());
                Ok(candidates)
            }
            Err(e) => {
                warn!("Unusable reply from {} ({}): {}", self.completion.model(), e, reply);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LlmError;
    use std::sync::Mutex;

    /// Replays one canned reply and records what it was sent
    struct CannedCompletion {
        reply: Option<String>,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl CannedCompletion {
        fn replying(reply: &str) -> Self {
            Self { reply: Some(reply.to_string()), seen: Mutex::new(Vec::new()) }
        }

        fn failing() -> Self {
            Self { reply: None, seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait::async_trait]
    impl CompletionProvider for CannedCompletion {
        fn model(&self) -> &str {
            "canned"
        }

        async fn complete(&self, system_prompt: &str, user_content: &str) -> LlmResult<String> {
            self.seen.lock().unwrap().push((system_prompt.to_string(), user_content.to_string()));
            self.reply
                .clone()
                .ok_or_else(|| LlmError::Inference("service unavailable".to_string()))
        }
    }

    fn suggester(completion: CannedCompletion) -> HybridSuggester<CannedCompletion> {
        HybridSuggester::new(completion, PromptTemplate::new("Findings:\n{{STATIC_SUGGESTIONS}}"))
    }

    #[tokio::test]
    async fn test_request_shape_and_parsed_candidates() {
        let hybrid = suggester(CannedCompletion::replying(
            r#"{"final_candidates": [{"target_snippet": "x + x", "refactored_suggestion": "2 * x"}]}"#,
        ));
        let mut finding = Suggestion::new("A.hs:(1,14)-(1,18)", "Use double");
        finding.found_block.push("x + x".to_string());

        let candidates = hybrid.suggest_candidates(&[finding], "let x = 1 in x + x").await.unwrap();
        assert_eq!(candidates, vec![Candidate::new("x + x", "2 * x")]);

        let seen = hybrid.completion.seen.lock().unwrap();
        assert!(seen[0].0.starts_with("Findings:\nA.hs:(1,14)-(1,18): Suggestion: Use double\nFound\nx + x\n"));
        assert_eq!(seen[0].1, "\nFull Code:\nlet x = 1 in x + x");
    }

    #[tokio::test]
    async fn test_unparseable_reply_yields_no_candidates() {
        let hybrid = suggester(CannedCompletion::replying("Sorry, I cannot help with that."));
        let candidates = hybrid.suggest_candidates(&[], "main = pure ()").await.unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_is_an_error() {
        let hybrid = suggester(CannedCompletion::failing());
        assert!(hybrid.suggest_candidates(&[], "main = pure ()").await.is_err());
    }
}
