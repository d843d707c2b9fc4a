//! Linter Diagnostic Parser
//!
//! Turns the linter's free-text report into [`Suggestion`] records. The
//! report is a sequence of blocks shaped like:
//!
//! ```text
//! src/Main.hs:(4,1)-(5,20): Suggestion: Use map
//! Found
//!   foldr (\x acc -> f x : acc) [] xs
//! Perhaps
//!   map f xs
//!
//! ```
//!
//! A block ends at the next header line (which starts a new block), at a
//! blank line, or at end of input.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::Suggestion;

lazy_static! {
    static ref SUGGESTION_HEADER: Regex = Regex::new(
        r"^(?P<location>.+:\(\d+,\d+\)-\(\d+,\d+\)): Suggestion: (?P<title>.*)$"
    )
    .expect("suggestion header pattern is valid");
}

/// Which block the lines after a header are collected into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    /// Before the first marker; lines are dropped
    None,
    Found,
    Perhaps,
}

/// Whether `line` opens a new suggestion block
pub fn is_suggestion_header(line: &str) -> bool {
    SUGGESTION_HEADER.is_match(line)
}

/// Parse the linter's free-text report, preserving input order.
///
/// Lines outside any block are ignored, so leading banners and the trailing
/// `N hints` summary never produce records.
pub fn parse_diagnostics(output: &str) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let mut lines = output.lines().peekable();

    while let Some(line) = lines.next() {
        let Some(header) = SUGGESTION_HEADER.captures(line) else {
            continue;
        };

        let mut suggestion = Suggestion::new(&header["location"], header["title"].trim());
        let mut block = Block::None;

        while let Some(&next) = lines.peek() {
            if is_suggestion_header(next) {
                // Left for the outer loop to open the next block
                break;
            }
            lines.next();

            if next.trim().is_empty() {
                break;
            }

            if next.starts_with("Found") {
                block = Block::Found;
            } else if next.starts_with("Perhaps") {
                block = Block::Perhaps;
            } else {
                match block {
                    Block::Found => suggestion.found_block.push(next.to_string()),
                    Block::Perhaps => suggestion.perhaps_block.push(next.to_string()),
                    Block::None => {}
                }
            }
        }

        suggestions.push(suggestion);
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_HINTS: &str = "\
src/Main.hs:(4,1)-(5,20): Suggestion: Use map
Found
  foldr (\\x acc -> f x : acc) [] xs
Perhaps
  map f xs

src/Main.hs:(9,3)-(9,30): Suggestion: Redundant bracket
Found
  (f x)
Perhaps
  f x

2 hints
";

    #[test]
    fn test_parses_found_and_perhaps_blocks() {
        let suggestions = parse_diagnostics(TWO_HINTS);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].location, "src/Main.hs:(4,1)-(5,20)");
        assert_eq!(suggestions[0].title, "Use map");
        assert_eq!(suggestions[0].found_block, vec!["  foldr (\\x acc -> f x : acc) [] xs"]);
        assert_eq!(suggestions[0].perhaps_block, vec!["  map f xs"]);
        assert_eq!(suggestions[1].title, "Redundant bracket");
        assert_eq!(suggestions[1].found_block, vec!["  (f x)"]);
    }

    #[test]
    fn test_header_without_blocks() {
        let suggestions = parse_diagnostics("A.hs:(1,1)-(1,9): Suggestion: Eta reduce\n");

        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].found_block.is_empty());
        assert!(suggestions[0].perhaps_block.is_empty());
    }

    #[test]
    fn test_adjacent_headers_are_both_kept() {
        let input = "\
A.hs:(1,1)-(1,9): Suggestion: First
Found
  a
A.hs:(2,1)-(2,9): Suggestion: Second
Found
  b
Perhaps
  c";
        let suggestions = parse_diagnostics(input);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].found_block, vec!["  a"]);
        assert!(suggestions[0].perhaps_block.is_empty());
        // Unterminated input still flushes the last block
        assert_eq!(suggestions[1].perhaps_block, vec!["  c"]);
    }

    #[test]
    fn test_only_the_blank_line_is_consumed() {
        let input = "\
A.hs:(1,1)-(1,9): Suggestion: First
Found
  a

A.hs:(2,1)-(2,9): Suggestion: Second
Found
  b
";
        let suggestions = parse_diagnostics(input);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[1].title, "Second");
    }

    #[test]
    fn test_lines_before_first_marker_are_dropped() {
        let input = "\
A.hs:(1,1)-(1,9): Suggestion: Use pure
Note: increases laziness
Found
  return x
Perhaps
  pure x
";
        let suggestions = parse_diagnostics(input);
        assert_eq!(suggestions[0].found_block, vec!["  return x"]);
        assert_eq!(suggestions[0].perhaps_block, vec!["  pure x"]);
    }

    #[test]
    fn test_no_hints() {
        assert!(parse_diagnostics("No hints\n").is_empty());
        assert!(parse_diagnostics("").is_empty());
    }

    #[test]
    fn test_title_is_trimmed() {
        let suggestions = parse_diagnostics("A.hs:(1,1)-(1,9): Suggestion:   Use fmap   \n");
        assert_eq!(suggestions[0].title, "Use fmap");
    }

    #[test]
    fn test_count_matches_header_lines() {
        let headers = TWO_HINTS.lines().filter(|l| is_suggestion_header(l)).count();
        assert_eq!(parse_diagnostics(TWO_HINTS).len(), headers);
    }
}
