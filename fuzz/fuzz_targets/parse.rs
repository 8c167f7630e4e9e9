#![no_main]

use libfuzzer_sys::fuzz_target;
use quipu::grammar::{Associativity, GrammarBuilder};
use quipu::terminals::StringDialect;
use quipu::{automaton, parser};
use std::sync::OnceLock;

static TABLE: OnceLock<automaton::ParserTable> = OnceLock::new();

fn table() -> &'static automaton::ParserTable {
    TABLE.get_or_init(|| {
        let mut g = GrammarBuilder::new();
        let num = g.regex_terminal("number", "[0-9]+").unwrap();
        let plus = g.literal("+");
        let star = g.literal("*");
        let lparen = g.literal("(");
        let rparen = g.literal(")");
        let string = g.string_terminal("string", StringDialect::python());
        g.comment_terminal("comment", "#", None);
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
    })
}

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // The parse must terminate and never panic, whatever the input.
        let _ = parser::parse(table(), s);
    }
});
