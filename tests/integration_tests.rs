//! End-to-end tests: grammar definition through table construction to parsing.
//!
//! These exercise the public facade the way a host application would — define
//! a grammar, build the table once, parse many inputs against it.

use quipu::grammar::{Associativity, GrammarBuilder};
use quipu::parser::ParseOutcome;
use quipu::terminals::StringDialect;
use quipu::{automaton, parser};

// =============================================================================
// Expression grammar: operator precedence round-trips
// =============================================================================

fn expression_table() -> automaton::ParserTable {
    let mut g = GrammarBuilder::new();
    let ident = g.regex_terminal("identifier", "[a-z]+").unwrap();
    let plus = g.literal("+");
    let minus = g.literal("-");
    let star = g.literal("*");
    let pow = g.literal("**");
    let expr = g.nonterminal("expr");
    for op in [plus, minus, star, pow] {
        g.production(expr, [expr.into(), op.into(), expr.into()]);
    }
    g.production(expr, [ident.into()]);
    g.precedence(Associativity::Left, &[plus, minus]);
    g.precedence(Associativity::Left, &[star]);
    g.precedence(Associativity::Right, &[pow]);
    g.set_start(expr);
    automaton::build(g.build().unwrap()).unwrap()
}

fn sexpr(table: &automaton::ParserTable, source: &str) -> String {
    let outcome = parser::parse(table, source);
    assert!(outcome.is_clean(), "parse of {source:?} failed: {:?}", outcome.errors);
    outcome.tree.unwrap().sexpr(table.grammar(), source)
}

#[test]
fn multiplication_wins_over_addition() {
    let table = expression_table();
    insta::assert_snapshot!(
        sexpr(&table, "a+b*c"),
        @"(expr (expr a) + (expr (expr b) * (expr c)))"
    );
}

#[test]
fn power_chains_to_the_right() {
    let table = expression_table();
    assert_eq!(
        sexpr(&table, "a**b**c"),
        "(expr (expr a) ** (expr (expr b) ** (expr c)))"
    );
}

#[test]
fn same_level_operators_chain_to_the_left() {
    let table = expression_table();
    assert_eq!(
        sexpr(&table, "a-b-c"),
        "(expr (expr (expr a) - (expr b)) - (expr c))"
    );
}

#[test]
fn building_twice_yields_the_same_behavior() {
    let first = expression_table();
    let second = expression_table();
    assert_eq!(first.state_count(), second.state_count());
    assert_eq!(first.warnings().len(), second.warnings().len());
    assert_eq!(sexpr(&first, "a+b*c"), sexpr(&second, "a+b*c"));
}

// =============================================================================
// String literal terminals inside a grammar
// =============================================================================

fn string_outcome(dialect: StringDialect, source: &str) -> (ParseOutcome, automaton::ParserTable) {
    let mut g = GrammarBuilder::new();
    let string = g.string_terminal("string", dialect);
    let value = g.nonterminal("value");
    g.production(value, [string.into()]);
    g.set_start(value);
    let table = automaton::build(g.build().unwrap()).unwrap();
    let outcome = parser::parse(&table, source);
    (outcome, table)
}

fn decoded_string(dialect: StringDialect, source: &str) -> String {
    let (outcome, _table) = string_outcome(dialect, source);
    assert!(outcome.is_clean(), "parse of {source:?} failed: {:?}", outcome.errors);
    let tree = outcome.tree.unwrap();
    let node = tree.as_node().unwrap();
    let token = node.children[0].as_token().unwrap();
    token.value.as_text().unwrap().to_string()
}

#[test]
fn python_escapes_decode_through_the_whole_pipeline() {
    assert_eq!(
        decoded_string(StringDialect::python(), r"'00\a\b\t\n00'"),
        "00\u{7}\u{8}\t\n00"
    );
}

#[test]
fn raw_prefix_leaves_escape_sequences_literal() {
    assert_eq!(
        decoded_string(StringDialect::python(), r"r'00\a\b\t\n00'"),
        r"00\a\b\t\n00"
    );
}

#[test]
fn doubled_quote_dialect_decodes_one_literal_quote() {
    assert_eq!(
        decoded_string(StringDialect::vb(), "\"abcd\"\"efg\""),
        "abcd\"efg"
    );
}

#[test]
fn multi_line_string_in_single_line_dialect_is_a_syntax_error() {
    let (outcome, _) = string_outcome(StringDialect::python(), "'abcd\nefg'");
    assert!(outcome.tree.is_none());
    assert!(
        outcome.errors.iter().any(|e| e.message.contains("unterminated")),
        "got: {:?}",
        outcome.errors
    );
}

#[test]
fn lone_quote_at_end_of_input_is_an_error_not_a_crash() {
    let (outcome, _) = string_outcome(StringDialect::python(), "'");
    assert!(outcome.tree.is_none());
    assert_eq!(outcome.errors.len(), 1);
}

#[test]
fn hex_and_octal_escape_boundaries() {
    assert_eq!(decoded_string(StringDialect::csharp(), "\"\\x0040\""), "@");
    assert_eq!(decoded_string(StringDialect::csharp(), "\"\\x40\""), "@");
    assert_eq!(decoded_string(StringDialect::csharp(), "\"\\0601\""), "01");
}

// =============================================================================
// Grammar flags: case sensitivity, comments
// =============================================================================

#[test]
fn case_insensitive_grammars_fold_keywords() {
    let mut g = GrammarBuilder::new();
    g.set_case_sensitive(false);
    let begin = g.literal("begin");
    let end = g.literal("end");
    let block = g.nonterminal("block");
    g.production(block, [begin.into(), end.into()]);
    g.set_start(block);
    let table = automaton::build(g.build().unwrap()).unwrap();

    assert!(parser::parse(&table, "BEGIN End").is_clean());
    assert!(parser::parse(&table, "begin end").is_clean());
}

#[test]
fn comments_are_preserved_in_the_outcome() {
    let mut g = GrammarBuilder::new();
    let num = g.regex_terminal("number", "[0-9]+").unwrap();
    g.comment_terminal("comment", "//", None);
    g.comment_terminal("block comment", "/*", Some("*/"));
    let expr = g.nonterminal("expr");
    g.production(expr, [num.into()]);
    g.set_start(expr);
    let table = automaton::build(g.build().unwrap()).unwrap();

    let source = "/* leading */ 42 // trailing";
    let outcome = parser::parse(&table, source);
    assert!(outcome.is_clean());
    let comments: Vec<&str> = outcome
        .skipped
        .iter()
        .filter(|t| t.category == quipu::grammar::TokenCategory::Comment)
        .map(|t| t.text(source))
        .collect();
    assert_eq!(comments, vec!["/* leading */", "// trailing"]);
}

// =============================================================================
// Shared tables
// =============================================================================

#[test]
fn one_table_is_shared_across_threads() {
    use std::sync::Arc;

    let table = Arc::new(expression_table());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = Arc::clone(&table);
            std::thread::spawn(move || parser::parse(&table, "a+b*c").is_clean())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
