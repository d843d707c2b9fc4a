//! Candidate Application Engine
//!
//! Applies `(target, replacement)` candidates to source text by exact
//! substring substitution, in the order given. Each candidate sees the text
//! left by the ones before it, so an earlier replacement can make a later
//! target match or stop matching.

use refactorhud_core::Candidate;
use serde::Serialize;
use tracing::debug;

/// What happened to one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum CandidateOutcome {
    /// Every occurrence of the target was replaced
    Applied { occurrences: usize },
    /// Target not present in the current text
    Missed,
    /// Empty target or replacement; never applied
    Skipped,
}

/// Result of one application pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    pub text: String,
    /// One entry per input candidate, same order
    pub outcomes: Vec<CandidateOutcome>,
}

impl Application {
    pub fn applied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, CandidateOutcome::Applied { .. }))
            .count()
    }

    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Apply `candidates` to `original`, returning only the new text
pub fn apply_candidates(original: &str, candidates: &[Candidate]) -> String {
    apply_with_outcomes(original, candidates).text
}

/// Apply `candidates` to `original`, recording the outcome of each
pub fn apply_with_outcomes(original: &str, candidates: &[Candidate]) -> Application {
    let mut text = original.to_string();
    let mut outcomes = Vec::with_capacity(candidates.len());

    for (index, candidate) in candidates.iter().enumerate() {
        if !candidate.is_applicable() {
            debug!("Skipping candidate #{}: empty target or replacement", index);
            outcomes.push(CandidateOutcome::Skipped);
            continue;
        }

        let occurrences = text.matches(candidate.target_snippet.as_str()).count();
        if occurrences == 0 {
            debug!("Candidate #{} target not found: {:?}", index, candidate.target_snippet);
            outcomes.push(CandidateOutcome::Missed);
            continue;
        }

        text = text.replace(&candidate.target_snippet, &candidate.refactored_suggestion);
        outcomes.push(CandidateOutcome::Applied { occurrences });
    }

    Application { text, outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_target() {
        let candidates = [Candidate::new("x + x", "2 * x")];
        assert_eq!(apply_candidates("let x = 1 in x + x", &candidates), "let x = 1 in 2 * x");
    }

    #[test]
    fn test_missing_target_is_identity() {
        let candidates = [Candidate::new("y * y", "y ^ 2")];
        let application = apply_with_outcomes("let x = 1 in x + x", &candidates);

        assert_eq!(application.text, "let x = 1 in x + x");
        assert_eq!(application.outcomes, vec![CandidateOutcome::Missed]);
        assert!(!application.changed("let x = 1 in x + x"));
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let application = apply_with_outcomes(
            "f = return ()\ng = return ()\n",
            &[Candidate::new("return ()", "pure ()")],
        );

        assert_eq!(application.text, "f = pure ()\ng = pure ()\n");
        assert_eq!(application.outcomes, vec![CandidateOutcome::Applied { occurrences: 2 }]);
    }

    #[test]
    fn test_order_sensitivity() {
        let candidates = [
            Candidate::new("concat (map f xs)", "concatMap f xs"),
            Candidate::new("map f xs", "fmap f xs"),
        ];
        // The first rewrite removes the second target
        assert_eq!(apply_candidates("r = concat (map f xs)", &candidates), "r = concatMap f xs");

        let reversed = [candidates[1].clone(), candidates[0].clone()];
        assert_eq!(apply_candidates("r = concat (map f xs)", &reversed), "r = concat (fmap f xs)");
    }

    #[test]
    fn test_whitespace_sensitive() {
        let candidates = [Candidate::new("x  + x", "2 * x")];
        assert_eq!(apply_candidates("x + x", &candidates), "x + x");
    }

    #[test]
    fn test_incomplete_candidates_are_skipped() {
        let candidates = [
            Candidate::new("", "anything"),
            Candidate::new("x", ""),
            Candidate::new("x", "y"),
        ];
        let application = apply_with_outcomes("x", &candidates);

        assert_eq!(application.text, "y");
        assert_eq!(
            application.outcomes,
            vec![
                CandidateOutcome::Skipped,
                CandidateOutcome::Skipped,
                CandidateOutcome::Applied { occurrences: 1 },
            ]
        );
        assert_eq!(application.applied_count(), 1);
    }

    #[test]
    fn test_second_pass_converges() {
        let candidates = [
            Candidate::new("x + x", "2 * x"),
            Candidate::new("return ()", "pure ()"),
        ];
        let once = apply_candidates("main = return ()\nd x = x + x\n", &candidates);
        let twice = apply_candidates(&once, &candidates);

        assert_eq!(once, twice);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn absent_target_leaves_text_unchanged(text in "[a-z ]{0,40}", target in "[A-Z]{1,8}", replacement in "[a-z]{1,8}") {
                let candidates = [Candidate::new(target, replacement)];
                prop_assert_eq!(apply_candidates(&text, &candidates), text);
            }

            #[test]
            fn applied_text_has_no_remaining_target(
                prefix in "[a-z ]{0,20}",
                suffix in "[a-z ]{0,20}",
                target in "[A-Z]{1,6}",
                replacement in "[0-9]{1,6}",
            ) {
                let text = format!("{prefix}{target}{suffix}");
                let candidates = [Candidate::new(target.clone(), replacement)];
                let result = apply_candidates(&text, &candidates);

                prop_assert!(!result.contains(&target));
            }

            #[test]
            fn reapplication_converges(
                text in "[a-c ]{0,40}",
                targets in proptest::collection::vec(("[a-c]{1,3}", "[x-z]{1,3}"), 0..5),
            ) {
                // Replacements never reintroduce a target
                let candidates: Vec<Candidate> = targets
                    .into_iter()
                    .map(|(target, replacement)| Candidate::new(target, replacement))
                    .collect();

                let once = apply_candidates(&text, &candidates);
                let twice = apply_candidates(&once, &candidates);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
