//! Completion Reply Cleanup
//!
//! Models are asked for bare JSON but routinely wrap it in Markdown fences or
//! surround it with prose.

use crate::{LlmError, LlmResult};
use refactorhud_core::Candidate;
use serde_json::Value;
use tracing::debug;

/// Key holding the candidate array in a hybrid-track reply
pub const FINAL_CANDIDATES_KEY: &str = "final_candidates";

/// Strip a leading ```` ``` ```` / ```` ```json ```` line and a trailing fence line
pub fn clean_json_output(output: &str) -> String {
    let output = output.trim();
    if !output.starts_with("```") {
        return output.to_string();
    }

    let mut lines: Vec<&str> = output.lines().collect();
    if lines.first().is_some_and(|line| line.starts_with("```")) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| line.starts_with("```")) {
        lines.pop();
    }

    lines.join("\n")
}

/// Parse the reply as one JSON object, falling back to its outermost `{...}` span
pub fn extract_json_object(output: &str) -> LlmResult<Value> {
    let cleaned = clean_json_output(output);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) if value.is_object() => return Ok(value),
        Ok(_) => {}
        Err(e) => debug!("Reply is not bare JSON ({}), looking for an embedded object", e),
    }

    let span = cleaned
        .find('{')
        .zip(cleaned.rfind('}'))
        .filter(|(start, end)| start < end)
        .map(|(start, end)| &cleaned[start..=end])
        .ok_or_else(|| LlmError::Inference("no JSON object in reply".to_string()))?;

    let value: Value = serde_json::from_str(span)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(LlmError::Inference("reply JSON is not an object".to_string()))
    }
}

/// Candidates from a hybrid-track reply
///
/// A missing `final_candidates` key means no candidates. Elements that are not
/// candidate-shaped objects are dropped; the rest are kept even when a field is
/// missing, since the application engine skips incomplete ones itself.
pub fn parse_final_candidates(output: &str) -> LlmResult<Vec<Candidate>> {
    let reply = extract_json_object(output)?;

    let Some(entries) = reply.get(FINAL_CANDIDATES_KEY) else {
        return Ok(Vec::new());
    };

    let entries = entries
        .as_array()
        .ok_or_else(|| LlmError::Inference(format!("{FINAL_CANDIDATES_KEY} is not an array")))?;

    let candidates = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Candidate>(entry.clone()) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                debug!("Dropping candidate #{}: {}", index, e);
                None
            }
        })
        .collect();

    Ok(candidates)
}
