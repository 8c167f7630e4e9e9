//! Terminal matchers: polymorphic token recognizers.
//!
//! A matcher is a pure function of its configuration and a [`SourceStream`]
//! cursor. Matchers never advance the cursor; they report how many bytes a
//! match covers and the scanner advances. On `NoMatch` the stream is untouched
//! by contract.
//!
//! ## Module Structure
//!
//! - `literal` - fixed-text matching
//! - `regexp` - anchored regex matching
//! - `strings` - escaped/quoted string literals (dialects, escape families)
//! - `comment` - line and block comments

mod comment;
mod literal;
mod regexp;
mod strings;

pub use comment::CommentMatcher;
pub use literal::LiteralMatcher;
pub use regexp::RegexMatcher;
pub use strings::{EscapeFlags, QuotePair, RawPrefix, StringDialect, StringMatcher};

use crate::diagnostics::LexicalError;
use crate::scanner::TokenValue;
use quipu_core::SourceStream;

/// A successful match: how far it reaches and the decoded value, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMatch {
    /// Bytes covered, starting at the cursor.
    pub length: usize,
    pub value: TokenValue,
}

impl TokenMatch {
    pub fn plain(length: usize) -> Self {
        Self {
            length,
            value: TokenValue::None,
        }
    }
}

/// Result of trying one matcher at the cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Match(TokenMatch),
    /// This matcher does not apply here; the cursor was not touched.
    NoMatch,
    /// The matcher applies but the input is malformed (e.g. an unterminated
    /// string). `length` covers the malformed region so the scanner can move
    /// past it.
    Error { error: LexicalError, length: usize },
}

/// A token recognizer driven by the scanner.
///
/// Implementations are stateless and shareable; matching the same input twice
/// yields the same outcome.
pub trait TerminalMatcher: std::fmt::Debug + Send + Sync {
    fn try_match(&self, source: &SourceStream<'_>) -> MatchOutcome;
}
