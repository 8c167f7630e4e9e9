//! Grammar-driven parsing toolkit: grammar model, terminal matchers, LALR
//! table builder, and shift-reduce engine.
//!
//! This crate is intentionally "syntax-only": it turns a declarative grammar
//! into a parser table and source text into a syntax tree. It does not
//! evaluate trees, render diagnostics, or host a front end — those are the
//! caller's concerns, wired in through the node factory and the structured
//! diagnostics.
//!
//! ## Notes
//! - Grammars are authored mutably on [`grammar::GrammarBuilder`] and frozen
//!   by `build()`; the automaton never mutates its input.
//! - A built [`automaton::ParserTable`] is immutable and safely shared by
//!   concurrent parses.
//!
//! ## Examples
//! ```rust,no_run
//! use quipu_syntax::{automaton, grammar::GrammarBuilder, parser};
//!
//! let mut g = GrammarBuilder::new();
//! let num = g.regex_terminal("number", "[0-9]+").unwrap();
//! let expr = g.nonterminal("expr");
//! g.production(expr, [num.into()]);
//! g.set_start(expr);
//!
//! let table = automaton::build(g.build().unwrap()).unwrap();
//! let outcome = parser::parse(&table, "42");
//! assert!(outcome.is_clean());
//! ```

pub mod automaton;
pub mod diagnostics;
pub mod grammar;
pub mod parser;
pub mod scanner;
pub mod terminals;
pub mod tree;
