//! Property-based tests for the parsing toolkit.
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use quipu::grammar::{Associativity, GrammarBuilder};
use quipu::terminals::StringDialect;
use quipu::{automaton, parser};

fn calculator_table() -> automaton::ParserTable {
    let mut g = GrammarBuilder::new();
    let num = g.regex_terminal("number", "[0-9]+").unwrap();
    let plus = g.literal("+");
    let star = g.literal("*");
    let lparen = g.literal("(");
    let rparen = g.literal(")");
    let string = g.string_terminal("string", StringDialect::python());
    let expr = g.nonterminal("expr");
    g.production(expr, [expr.into(), plus.into(), expr.into()]);
    g.production(expr, [expr.into(), star.into(), expr.into()]);
    g.production(expr, [lparen.into(), expr.into(), rparen.into()]);
    g.production(expr, [num.into()]);
    g.production(expr, [string.into()]);
    g.precedence(Associativity::Left, &[plus]);
    g.precedence(Associativity::Left, &[star]);
    g.set_start(expr);
    automaton::build(g.build().unwrap()).unwrap()
}

proptest! {
    /// Property: parsing terminates and never panics, whatever the input.
    #[test]
    fn parse_always_terminates(input in ".{0,200}") {
        let table = calculator_table();
        let outcome = parser::parse(&table, &input);
        // every run produces either a tree or at least one error
        prop_assert!(outcome.tree.is_some() || !outcome.errors.is_empty() || input.trim().is_empty());
    }

    /// Property: token soup over the grammar's own alphabet never hangs or
    /// panics either.
    #[test]
    fn symbol_soup_terminates(input in "[0-9+*()' ]{0,80}") {
        let table = calculator_table();
        let _ = parser::parse(&table, &input);
    }

    /// Property: well-formed simple string bodies survive a python-dialect
    /// round trip undamaged.
    #[test]
    fn plain_string_bodies_round_trip(body in "[a-zA-Z0-9 ]{0,40}") {
        let table = calculator_table();
        let source = format!("'{body}'");
        let outcome = parser::parse(&table, &source);
        prop_assert!(outcome.is_clean());
        let tree = outcome.tree.unwrap();
        let token = tree.as_node().unwrap().children[0].as_token().unwrap();
        prop_assert_eq!(token.value.as_text().unwrap(), body);
    }

    /// Property: balanced arithmetic over numbers always parses cleanly.
    #[test]
    fn balanced_arithmetic_parses(terms in prop::collection::vec(0u32..1000, 1..8)) {
        let table = calculator_table();
        let source = terms
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("+");
        let outcome = parser::parse(&table, &source);
        prop_assert!(outcome.is_clean());
    }
}
