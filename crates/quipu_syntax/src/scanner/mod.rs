//! Scanner: drives terminal matchers over source text.
//!
//! At each position the scanner:
//! 1. skips (and records) whitespace,
//! 2. pre-filters candidate terminals by the grammar's first-character index,
//! 3. tries candidates in descending priority, keeping the **longest** match
//!    (priority breaks equal-length ties),
//! 4. filters non-grammar tokens (comments, anything marked non-grammar):
//!    recorded for formatting tools, never forwarded to the parser,
//! 5. turns lexical match errors into error-category tokens rather than
//!    aborting the scan.
//!
//! The scanner synthesizes an end-of-input token at the end of the text and
//! keeps returning it, so the parser can always peek one token ahead.

pub mod tokens;

pub use tokens::{Token, TokenValue};

use crate::grammar::{Grammar, TokenCategory};
use crate::terminals::{MatchOutcome, TokenMatch};
use quipu_core::{SourceStream, Span};

/// Pull-based token source over one parse run.
pub struct Scanner<'g, 'src> {
    grammar: &'g Grammar,
    stream: SourceStream<'src>,
    /// Non-grammar tokens (whitespace, comments) in source order.
    skipped: Vec<Token>,
}

impl<'g, 'src> Scanner<'g, 'src> {
    pub fn new(grammar: &'g Grammar, source: &'src str) -> Self {
        Self {
            grammar,
            stream: SourceStream::new(source),
            skipped: Vec::new(),
        }
    }

    pub fn source(&self) -> &'src str {
        self.stream.text()
    }

    pub fn position(&self) -> usize {
        self.stream.position()
    }

    /// Non-grammar tokens recorded so far, for comment-preserving tools.
    pub fn skipped(&self) -> &[Token] {
        &self.skipped
    }

    /// Drain the recorded non-grammar tokens.
    pub fn take_skipped(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.skipped)
    }

    /// Produce the next grammar-relevant token.
    pub fn next_token(&mut self) -> Token {
        loop {
            if let Some(ws) = self.skip_whitespace() {
                self.skipped.push(ws);
            }
            if self.stream.at_end() {
                let end = self.stream.position();
                return Token::new(
                    self.grammar.eof(),
                    Span::new(end, end),
                    TokenCategory::Content,
                    TokenValue::None,
                );
            }
            let token = self.match_at_cursor();
            if self.grammar.terminal(token.terminal).non_grammar {
                self.skipped.push(token);
                continue;
            }
            return token;
        }
    }

    fn skip_whitespace(&mut self) -> Option<Token> {
        let start = self.stream.position();
        while let Some(c) = self.stream.peek() {
            if self.grammar.whitespace_chars().contains(c) {
                self.stream.advance(c.len_utf8());
            } else {
                break;
            }
        }
        let end = self.stream.position();
        (end > start).then(|| {
            Token::new(
                self.grammar.whitespace_terminal(),
                Span::new(start, end),
                TokenCategory::Whitespace,
                TokenValue::None,
            )
        })
    }

    fn match_at_cursor(&mut self) -> Token {
        let start = self.stream.position();
        let first = self.stream.peek().expect("INVARIANT: cursor is not at end");

        let mut best: Option<(crate::grammar::TerminalId, TokenMatch)> = None;
        let mut first_error = None;
        for &id in self.grammar.scan_candidates(first) {
            let Some(matcher) = self.grammar.terminal(id).matcher.as_deref() else {
                continue;
            };
            match matcher.try_match(&self.stream) {
                MatchOutcome::Match(m) if m.length > 0 => {
                    let longer = best.as_ref().is_none_or(|(_, b)| m.length > b.length);
                    if longer {
                        best = Some((id, m));
                    }
                }
                MatchOutcome::Match(_) | MatchOutcome::NoMatch => {}
                MatchOutcome::Error { error, length } => {
                    if first_error.is_none() {
                        first_error = Some((error, length));
                    }
                }
            }
        }

        if let Some((id, m)) = best {
            self.stream.advance(m.length);
            let span = Span::new(start, self.stream.position());
            return Token::new(id, span, self.grammar.terminal(id).category, m.value);
        }

        // A matcher recognized the input as malformed: surface it as an error
        // token so the parser reports a syntax error instead of the scanner
        // aborting.
        if let Some((error, length)) = first_error {
            self.stream.advance(length.max(first.len_utf8()));
            let span = Span::new(start, self.stream.position());
            return Token::new(
                self.grammar.error_terminal(),
                span,
                TokenCategory::Error,
                TokenValue::Text(error.to_string()),
            );
        }

        // Nothing recognizes this character at all.
        self.stream.advance(first.len_utf8());
        let span = Span::new(start, self.stream.position());
        Token::new(
            self.grammar.error_terminal(),
            span,
            TokenCategory::Error,
            TokenValue::Text(
                crate::diagnostics::LexicalError::UnexpectedChar(first).to_string(),
            ),
        )
    }
}
