//! Line and block comment matching.

use super::{MatchOutcome, TerminalMatcher, TokenMatch};
use crate::diagnostics::LexicalError;
use quipu_core::SourceStream;

/// Matches a comment introduced by `start`.
///
/// With `end = None` the comment runs to the end of the line; the terminating
/// newline is not consumed. With an end delimiter, reaching end of input first
/// is a lexical error.
#[derive(Debug, Clone)]
pub struct CommentMatcher {
    start: String,
    end: Option<String>,
}

impl CommentMatcher {
    pub fn new(start: &str, end: Option<&str>) -> Self {
        Self {
            start: start.to_string(),
            end: end.map(str::to_string),
        }
    }
}

impl TerminalMatcher for CommentMatcher {
    fn try_match(&self, source: &SourceStream<'_>) -> MatchOutcome {
        let rest = source.rest();
        if !rest.starts_with(&self.start) {
            return MatchOutcome::NoMatch;
        }
        let body = &rest[self.start.len()..];
        match &self.end {
            None => {
                let len = body.find('\n').unwrap_or(body.len());
                MatchOutcome::Match(TokenMatch::plain(self.start.len() + len))
            }
            Some(end) => match body.find(end.as_str()) {
                Some(idx) => MatchOutcome::Match(TokenMatch::plain(self.start.len() + idx + end.len())),
                None => MatchOutcome::Error {
                    error: LexicalError::UnterminatedComment,
                    length: rest.len(),
                },
            },
        }
    }
}
