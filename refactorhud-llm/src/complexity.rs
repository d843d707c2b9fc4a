//! Complexity Fallback
//!
//! When the local complexity analyzer fails on a file, a remote model is asked
//! for the same numbers in the analyzer's result shape.

use crate::prompt::{complexity_request, COMPLEXITY_SYSTEM_PROMPT};
use crate::response::clean_json_output;
use crate::{CompletionProvider, LlmResult};
use refactorhud_core::{ComplexityAnalysis, ComplexitySource, ComplexityStats};
use serde_json::Value;
use tracing::{debug, warn};

/// Estimates complexity for source text the analyzer could not handle
#[async_trait::async_trait]
pub trait ComplexityEstimator: Send + Sync {
    /// A reply that is not the expected JSON yields all-zero stats carrying the
    /// raw reply; only transport and service failures are errors.
    async fn estimate_complexity(&self, code: &str) -> LlmResult<ComplexityAnalysis>;
}

/// [`ComplexityEstimator`] over any chat-completion backend
pub struct ComplexityFallback<C> {
    completion: C,
}

impl<C: CompletionProvider> ComplexityFallback<C> {
    pub fn new(completion: C) -> Self {
        Self { completion }
    }
}

#[async_trait::async_trait]
impl<C: CompletionProvider> ComplexityEstimator for ComplexityFallback<C> {
    async fn estimate_complexity(&self, code: &str) -> LlmResult<ComplexityAnalysis> {
        debug!("Asking {} for complexity of {} bytes", self.completion.model(), code.len());

        let reply = self
            .completion
            .complete(COMPLEXITY_SYSTEM_PROMPT, &complexity_request(code))
            .await?;

        Ok(parse_fallback_reply(&reply))
    }
}

/// Read the fallback reply into the analyzer's result shape
///
/// `min`, `max`, `sum` and the LOC are truncated to integers; `average` is
/// rounded half-to-even. The cleaned reply is kept as the raw output.
pub fn parse_fallback_reply(reply: &str) -> ComplexityAnalysis {
    let content = clean_json_output(reply);

    let parsed = match serde_json::from_str::<Value>(&content) {
        Ok(value) if value.is_object() => value,
        Ok(_) | Err(_) => {
            warn!("Complexity fallback reply is not a JSON object: {}", content);
            return ComplexityAnalysis::unavailable(content);
        }
    };

    let cc = &parsed["cyclomatic_complexity"];
    let field = |name: &str| number(&cc[name]);

    ComplexityAnalysis {
        cyclomatic_complexity: ComplexityStats {
            min: field("min").trunc(),
            max: field("max").trunc(),
            average: field("average").round_ties_even(),
            sum: field("sum").trunc(),
        },
        analyzer_loc: number(&parsed["homplexity_loc"]).trunc().max(0.0) as u64,
        raw_output: content,
        source: ComplexitySource::Fallback,
    }
}

/// Numbers may come back as JSON numbers or numeric strings; anything else is 0
fn number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    };

    if n.is_finite() { n.max(0.0) } else { 0.0 }
}
