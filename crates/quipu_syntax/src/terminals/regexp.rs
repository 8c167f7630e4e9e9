//! Regex terminal matching.
//!
//! Patterns are anchored with `\A` against the unconsumed suffix, so a match
//! only succeeds if it starts exactly at the cursor; the matcher never scans
//! ahead.

use super::{MatchOutcome, TerminalMatcher, TokenMatch};
use quipu_core::SourceStream;
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    fn anchored(pattern: &str) -> String {
        format!(r"\A(?:{pattern})")
    }

    /// Check a pattern without building a matcher, for eager validation at
    /// declaration sites.
    pub fn validate(pattern: &str) -> Result<(), regex::Error> {
        Regex::new(&Self::anchored(pattern)).map(|_| ())
    }

    pub fn new(pattern: &str, ignore_case: bool) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&Self::anchored(pattern))
            .case_insensitive(ignore_case)
            .build()?;
        Ok(Self { regex })
    }
}

impl TerminalMatcher for RegexMatcher {
    fn try_match(&self, source: &SourceStream<'_>) -> MatchOutcome {
        match self.regex.find(source.rest()) {
            // A zero-length match would make the scanner spin; treat it as no match.
            Some(m) if m.start() == 0 && !m.is_empty() => {
                MatchOutcome::Match(TokenMatch::plain(m.end()))
            }
            _ => MatchOutcome::NoMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(pattern: &str, input: &str) -> Option<usize> {
        let matcher = RegexMatcher::new(pattern, false).unwrap();
        match matcher.try_match(&SourceStream::new(input)) {
            MatchOutcome::Match(m) => Some(m.length),
            _ => None,
        }
    }

    #[test]
    fn match_is_anchored_at_the_cursor() {
        assert_eq!(length("[0-9]+", "123abc"), Some(3));
        // the pattern occurs later in the input, but not at the cursor
        assert_eq!(length("[0-9]+", "abc123"), None);
    }

    #[test]
    fn zero_length_matches_are_rejected() {
        assert_eq!(length("[0-9]*", "abc"), None);
    }

    #[test]
    fn case_insensitive_flag_applies() {
        let matcher = RegexMatcher::new("[a-z]+", true).unwrap();
        let outcome = matcher.try_match(&SourceStream::new("ABC"));
        assert_eq!(outcome, MatchOutcome::Match(TokenMatch::plain(3)));
    }

    #[test]
    fn validate_rejects_bad_patterns() {
        assert!(RegexMatcher::validate("[unclosed").is_err());
        assert!(RegexMatcher::validate("[0-9]+").is_ok());
    }
}
