//! Fixed-text terminal matching.

use super::{MatchOutcome, TerminalMatcher, TokenMatch};
use quipu_core::{starts_with_folded, SourceStream};

/// Matches an exact substring at the cursor. O(length).
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    text: String,
    ignore_case: bool,
}

impl LiteralMatcher {
    pub fn new(text: &str, ignore_case: bool) -> Self {
        Self {
            text: text.to_string(),
            ignore_case,
        }
    }
}

impl TerminalMatcher for LiteralMatcher {
    fn try_match(&self, source: &SourceStream<'_>) -> MatchOutcome {
        if self.text.is_empty() {
            return MatchOutcome::NoMatch;
        }
        if starts_with_folded(source.rest(), &self.text, self.ignore_case) {
            MatchOutcome::Match(TokenMatch::plain(self.text.len()))
        } else {
            MatchOutcome::NoMatch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(text: &str, ignore_case: bool, input: &str) -> MatchOutcome {
        LiteralMatcher::new(text, ignore_case).try_match(&SourceStream::new(input))
    }

    #[test]
    fn matches_exact_prefix_only() {
        assert_eq!(outcome("if", false, "if x"), MatchOutcome::Match(TokenMatch::plain(2)));
        assert_eq!(outcome("if", false, "xif"), MatchOutcome::NoMatch);
        assert_eq!(outcome("if", false, "i"), MatchOutcome::NoMatch);
    }

    #[test]
    fn case_folding_is_opt_in() {
        assert_eq!(outcome("begin", false, "BEGIN"), MatchOutcome::NoMatch);
        assert_eq!(outcome("begin", true, "BEGIN x"), MatchOutcome::Match(TokenMatch::plain(5)));
    }
}
