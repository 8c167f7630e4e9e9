//! Token types produced by the scanner.
//!
//! Tokens carry **grammar-backed IDs**: the [`TerminalId`] that matched, the
//! category copied from that terminal, and the decoded value where matching
//! produced one (string literals, char literals).

use crate::grammar::{TerminalId, TokenCategory};
use quipu_core::Span;

/// Decoded payload of a token.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    /// The matched text is the value (identifiers, numbers, keywords).
    #[default]
    None,
    /// A decoded string body, or an error message for error tokens.
    Text(String),
    /// A character literal (char-suffix or char-literal dialects).
    Char(char),
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            TokenValue::Char(c) => Some(*c),
            _ => None,
        }
    }
}

/// A token with its terminal, source span, category, and decoded value.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub terminal: TerminalId,
    pub span: Span,
    pub category: TokenCategory,
    pub value: TokenValue,
}

impl Token {
    pub fn new(terminal: TerminalId, span: Span, category: TokenCategory, value: TokenValue) -> Self {
        Self {
            terminal,
            span,
            category,
            value,
        }
    }

    /// The matched source text.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end.min(source.len())]
    }

    /// Whether this token was synthesized from a lexical error.
    pub fn is_error(&self) -> bool {
        matches!(self.category, TokenCategory::Error)
    }
}
