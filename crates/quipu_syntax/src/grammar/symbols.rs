//! Symbol identities and definitions.
//!
//! The grammar uses **arena-backed IDs** for its vocabulary:
//! - [`TerminalId`] for leaf symbols matched by the scanner
//! - [`NonTerminalId`] for symbols defined by productions
//! - [`SymbolId`] wherever a production body can hold either
//!
//! ## Notes
//! - ID-bearing symbols avoid stringly-typed checks in the builder and engine.
//! - IDs are ordered so automaton construction iterates deterministically.

use crate::terminals::TerminalMatcher;

/// Identity of a terminal within one grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TerminalId(pub(crate) usize);

/// Identity of a non-terminal within one grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminalId(pub(crate) usize);

/// Identity of a production within one grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductionId(pub(crate) usize);

/// Either side of the terminal/non-terminal split, for production bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolId {
    Terminal(TerminalId),
    NonTerminal(NonTerminalId),
}

impl From<TerminalId> for SymbolId {
    fn from(id: TerminalId) -> Self {
        SymbolId::Terminal(id)
    }
}

impl From<NonTerminalId> for SymbolId {
    fn from(id: NonTerminalId) -> Self {
        SymbolId::NonTerminal(id)
    }
}

/// Category a token belongs to, carried from its terminal.
///
/// `Whitespace` and `Comment` tokens are filtered by the scanner (recorded for
/// formatting tools, never forwarded to the parser). `Punctuation` tokens are
/// parsed normally but elided from reduction children. `Error` marks tokens
/// synthesized from lexical failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenCategory {
    #[default]
    Content,
    Punctuation,
    Whitespace,
    Comment,
    Error,
}

/// A frozen terminal definition.
pub struct Terminal {
    pub name: String,
    pub category: TokenCategory,
    /// Scanning priority; breaks ties between equal-length matches.
    pub priority: i16,
    /// Prefix strings used to pre-filter candidate matchers at a position.
    pub(crate) firsts: Vec<String>,
    /// `None` for internal terminals (end-of-input, error) that are never
    /// produced by matching.
    pub(crate) matcher: Option<Box<dyn TerminalMatcher>>,
    /// Filtered by the scanner without participating in any production.
    pub(crate) non_grammar: bool,
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("priority", &self.priority)
            .field("firsts", &self.firsts)
            .field("non_grammar", &self.non_grammar)
            .finish_non_exhaustive()
    }
}

/// A frozen non-terminal definition.
#[derive(Debug)]
pub struct NonTerminal {
    pub name: String,
    /// Collapsed out of the resulting tree; an arity-1 reduction promotes the
    /// single child in its place.
    pub transient: bool,
    /// Productions with this non-terminal as head, in declaration order.
    pub(crate) productions: Vec<ProductionId>,
}
