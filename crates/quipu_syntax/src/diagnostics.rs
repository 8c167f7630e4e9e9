//! Diagnostics and error taxonomy for the toolkit.
//!
//! All errors are **structured**: kinds plus substitution fields, with source or
//! automaton-state locations where available. Rendering is a host concern; the
//! `Display` impls here are a convenience, not a localization layer.
//!
//! ## Notes
//! - Build-time problems are fatal and reported as [`GrammarError`]; a table is
//!   never published for a grammar that failed to build.
//! - Per-token and per-parse problems ([`LexicalError`], [`SyntaxError`]) are
//!   accumulated, never thrown, so one run can surface several independent issues.

use quipu_core::{Location, Span};
use std::fmt;

// ============================================================================
// Build-time errors (fatal)
// ============================================================================

/// Fatal error raised while freezing a grammar or building its parser table.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GrammarError {
    #[error("grammar has no start symbol")]
    #[diagnostic(code(quipu::grammar::no_start))]
    NoStartSymbol,

    /// A non-terminal was declared but never given a production.
    #[error("non-terminal `{name}` has no productions")]
    #[diagnostic(
        code(quipu::grammar::empty_rule),
        help("every non-terminal needs at least one production before the table can be built")
    )]
    EmptyRule { name: String },

    /// A production references an id that was not registered with this grammar.
    #[error("production for `{head}` references a symbol not registered with this grammar")]
    #[diagnostic(code(quipu::grammar::undeclared_symbol))]
    UndeclaredSymbol { head: String },

    #[error("invalid pattern for terminal `{name}`")]
    #[diagnostic(code(quipu::grammar::invalid_pattern))]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Two productions are reducible in the same state on the same lookaheads
    /// with no precedence declared to pick a winner.
    #[error(
        "reduce/reduce conflict in state {state} on {}: `{first}` vs `{second}`",
        .lookaheads.join(", ")
    )]
    #[diagnostic(
        code(quipu::grammar::reduce_reduce),
        help("declare operator precedence for the productions involved, or restructure the grammar")
    )]
    ReduceReduceConflict {
        state: usize,
        lookaheads: Vec<String>,
        first: String,
        second: String,
    },

    /// The automaton blew through the state ceiling; treated as a runaway
    /// grammar rather than a silent hang.
    #[error("automaton did not converge: state count exceeded {limit}")]
    #[diagnostic(code(quipu::grammar::non_convergence))]
    NonConvergence { limit: usize },
}

// ============================================================================
// Lexical errors (local to one token)
// ============================================================================

/// Error produced by a terminal matcher.
///
/// The scanner turns these into error-category tokens; the parser then reports
/// them as syntax errors. A lexical error never aborts scanning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexicalError {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated comment")]
    UnterminatedComment,

    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),

    #[error("expected hexadecimal digits after the escape marker")]
    MissingEscapeDigits,

    #[error("expected {expected} hexadecimal digits in escape sequence, found {found}")]
    EscapeDigits { expected: usize, found: usize },

    #[error("escape sequence 0x{0:x} does not encode a valid character")]
    InvalidCodepoint(u32),

    #[error("character literal must contain exactly one character, found {0}")]
    BadCharLiteral(usize),

    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
}

// ============================================================================
// Parse-time records
// ============================================================================

/// A recoverable syntax error with location information.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub location: Location,
    /// Names of the terminals that would have been accepted at this point.
    pub expected: Vec<String>,
}

impl SyntaxError {
    pub fn new(message: String, span: Span, location: Location) -> Self {
        Self {
            message,
            span,
            location,
            expected: Vec::new(),
        }
    }

    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = expected;
        self
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)?;
        if !self.expected.is_empty() {
            write!(f, " (expected {})", self.expected.join(", "))?;
        }
        Ok(())
    }
}

/// Fatal per-parse failure: the engine cannot safely continue reducing.
#[derive(Debug, thiserror::Error)]
pub enum FatalParseError {
    #[error("failed to construct node for production `{production}`: {message}")]
    NodeConstruction { production: String, message: String },
}

// ============================================================================
// Warnings and informational records
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
}

/// A non-fatal structured diagnostic.
///
/// Table construction attaches resolved-conflict warnings; the parser engine
/// attaches discarded-region records produced by error recovery.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
        }
    }

    pub fn info(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            severity: Severity::Info,
        }
    }
}

/// What a diagnostic is about, with its substitution fields.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// A shift/reduce conflict with no precedence on one side resolved to
    /// shift. This permissive bias can mask grammar bugs; see the `automaton`
    /// module docs.
    ShiftOverReduce {
        state: usize,
        lookahead: String,
        production: String,
    },
    /// Equal precedence on a non-associative operator: the table entry was
    /// removed, so chaining the operator is a syntax error.
    NonAssociativeRejection { state: usize, lookahead: String },
    /// A reduce/reduce conflict resolved through declared precedence.
    ReduceReduceResolved {
        state: usize,
        lookahead: String,
        chosen: String,
        discarded: String,
    },
    /// Error recovery discarded a region of input.
    DiscardedRegion { span: Span, tokens: usize },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::ShiftOverReduce {
                state,
                lookahead,
                production,
            } => write!(
                f,
                "state {state}: shift/reduce conflict on `{lookahead}` resolved to shift over `{production}`"
            ),
            DiagnosticKind::NonAssociativeRejection { state, lookahead } => write!(
                f,
                "state {state}: `{lookahead}` is non-associative; chained uses are rejected"
            ),
            DiagnosticKind::ReduceReduceResolved {
                state,
                lookahead,
                chosen,
                discarded,
            } => write!(
                f,
                "state {state}: reduce/reduce conflict on `{lookahead}` resolved to `{chosen}` over `{discarded}`"
            ),
            DiagnosticKind::DiscardedRegion { span, tokens } => write!(
                f,
                "discarded {tokens} token(s) at {}..{} while recovering",
                span.start, span.end
            ),
        }
    }
}
