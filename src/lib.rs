#![forbid(unsafe_code)]
//! quipu — a grammar-driven parsing toolkit.
//!
//! Given a declarative grammar (terminals, non-terminals, BNF-style
//! productions, operator precedence declarations), quipu builds a
//! deterministic LALR shift/reduce automaton and uses it to convert a token
//! stream into a syntax tree.
//!
//! The work lives in two member crates, re-exported here:
//! - `quipu_core` — source spans, cursors, case folding
//! - `quipu_syntax` — grammar model, terminal matchers, scanner, automaton
//!   builder, parser engine
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling: production code uses
//! `Result` with `?` and accumulated diagnostics. `.expect()` appears only for
//! true invariants, with an `INVARIANT:` explanation. Test code may unwrap.
//!
//! ## Examples
//! ```rust,no_run
//! use quipu::grammar::{Associativity, GrammarBuilder};
//! use quipu::{automaton, parser};
//!
//! let mut g = GrammarBuilder::new();
//! let num = g.regex_terminal("number", "[0-9]+").unwrap();
//! let plus = g.literal("+");
//! let expr = g.nonterminal("expr");
//! g.production(expr, [num.into()]);
//! g.production(expr, [expr.into(), plus.into(), expr.into()]);
//! g.precedence(Associativity::Left, &[plus]);
//! g.set_start(expr);
//!
//! let table = automaton::build(g.build().unwrap()).unwrap();
//! assert!(parser::parse(&table, "1+2+3").is_clean());
//! ```

pub use quipu_core::{location_at, Location, SourceStream, Span};
pub use quipu_syntax::{automaton, diagnostics, grammar, parser, scanner, terminals, tree};
