//! Parser engine: a shift-reduce automaton driver.
//!
//! Consumes tokens from the [`Scanner`] against a built [`ParserTable`],
//! maintains a state/value stack, invokes the host's node factory on each
//! reduction, and recovers from syntax errors in panic mode. Errors are
//! accumulated, never thrown: a parse with recoverable errors still yields a
//! best-effort tree alongside its diagnostics.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use quipu_syntax::{automaton, grammar::GrammarBuilder, parser};
//!
//! let mut g = GrammarBuilder::new();
//! let num = g.regex_terminal("number", "[0-9]+").unwrap();
//! let expr = g.nonterminal("expr");
//! g.production(expr, [num.into()]);
//! g.set_start(expr);
//! let table = automaton::build(g.build().unwrap()).unwrap();
//!
//! let outcome = parser::parse(&table, "42");
//! assert!(outcome.is_clean());
//! ```

use crate::automaton::{Action, ParserTable, StateId};
use crate::diagnostics::{Diagnostic, DiagnosticKind, FatalParseError, SyntaxError};
use crate::grammar::{ProductionId, TokenCategory};
use crate::scanner::{Scanner, Token, TokenValue};
use crate::tree::{NodeFactory, ParseValue, Reduction, TreeFactory};
use quipu_core::{location_at, Span};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/engine.rs");
include!("parser/recovery.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
