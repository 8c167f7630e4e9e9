//! Grammar model: terminals, non-terminals, productions, precedence.
//!
//! Authoring follows a **build-then-freeze** shape: mutate a [`GrammarBuilder`]
//! freely while declaring vocabulary and productions, then consume it with
//! [`GrammarBuilder::build`] into an immutable [`Grammar`]. Structural problems
//! (a rule never assigned, a foreign symbol id, a bad regex) fail `build`
//! before any automaton work begins; the table builder never mutates a grammar.
//!
//! ## Examples
//! ```rust,no_run
//! use quipu_syntax::grammar::{Associativity, GrammarBuilder};
//!
//! let mut g = GrammarBuilder::new();
//! let num = g.regex_terminal("number", "[0-9]+").unwrap();
//! let plus = g.literal("+");
//! let expr = g.nonterminal("expr");
//! g.production(expr, [num.into()]);
//! g.production(expr, [expr.into(), plus.into(), expr.into()]);
//! g.precedence(Associativity::Left, &[plus]);
//! g.set_start(expr);
//! let grammar = g.build().unwrap();
//! assert_eq!(grammar.terminal(plus).name, "+");
//! ```

mod precedence;
mod productions;
mod symbols;

pub use precedence::{Associativity, OperatorInfo, PrecedenceTable};
pub use productions::Production;
pub use symbols::{NonTerminal, NonTerminalId, ProductionId, SymbolId, Terminal, TerminalId, TokenCategory};

use crate::diagnostics::GrammarError;
use crate::terminals::{CommentMatcher, LiteralMatcher, RegexMatcher, StringDialect, StringMatcher, TerminalMatcher};
use std::collections::BTreeMap;

/// Default scanning priority for literal terminals, so a keyword beats a
/// same-length identifier match while longest-match still wins overall.
const LITERAL_PRIORITY: i16 = 1;

// ============================================================================
// BUILDER
// ============================================================================

/// How a terminal recognizes source text; compiled into a matcher at build time.
#[derive(Debug, Clone)]
enum TerminalKind {
    Literal(String),
    Regex(String),
    QuotedString(StringDialect),
    Comment { start: String, end: Option<String> },
    /// End-of-input, error, whitespace: never produced by matching.
    Internal,
}

#[derive(Debug)]
struct TerminalSpec {
    name: String,
    category: TokenCategory,
    kind: TerminalKind,
    priority: i16,
    firsts: Option<Vec<String>>,
    non_grammar: bool,
}

#[derive(Debug)]
struct NonTerminalSpec {
    name: String,
    transient: bool,
}

#[derive(Debug)]
struct ProductionSpec {
    head: NonTerminalId,
    body: Vec<SymbolId>,
    node_kind: Option<&'static str>,
    precedence: Option<TerminalId>,
}

/// Mutable grammar under construction.
pub struct GrammarBuilder {
    case_sensitive: bool,
    whitespace: String,
    terminals: Vec<TerminalSpec>,
    nonterminals: Vec<NonTerminalSpec>,
    productions: Vec<ProductionSpec>,
    precedence: PrecedenceTable,
    start: Option<NonTerminalId>,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            case_sensitive: true,
            whitespace: " \t\r\n".to_string(),
            terminals: Vec::new(),
            nonterminals: Vec::new(),
            productions: Vec::new(),
            precedence: PrecedenceTable::default(),
            start: None,
        };
        // Internal terminals occupy fixed slots so the automaton and scanner
        // can reference them without lookups.
        builder.push_terminal(TerminalSpec {
            name: "end of input".to_string(),
            category: TokenCategory::Content,
            kind: TerminalKind::Internal,
            priority: 0,
            firsts: None,
            non_grammar: false,
        });
        builder.push_terminal(TerminalSpec {
            name: "error".to_string(),
            category: TokenCategory::Error,
            kind: TerminalKind::Internal,
            priority: 0,
            firsts: None,
            non_grammar: false,
        });
        builder.push_terminal(TerminalSpec {
            name: "whitespace".to_string(),
            category: TokenCategory::Whitespace,
            kind: TerminalKind::Internal,
            priority: 0,
            firsts: None,
            non_grammar: true,
        });
        builder
    }

    /// Match keywords and delimiters without regard to ASCII case.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    /// Characters the scanner silently consumes between tokens.
    pub fn set_whitespace(&mut self, chars: &str) {
        self.whitespace = chars.to_string();
    }

    /// The error symbol, usable in production bodies as a recovery point.
    pub fn error_symbol(&self) -> SymbolId {
        SymbolId::Terminal(ERROR)
    }

    /// Register a fixed-text terminal. Its name is its spelling.
    pub fn literal(&mut self, text: &str) -> TerminalId {
        self.push_terminal(TerminalSpec {
            name: text.to_string(),
            category: TokenCategory::Content,
            kind: TerminalKind::Literal(text.to_string()),
            priority: LITERAL_PRIORITY,
            firsts: None,
            non_grammar: false,
        })
    }

    /// Register a regex-matched terminal. The pattern is anchored at the
    /// cursor; it never scans ahead.
    ///
    /// ## Errors
    /// The pattern is validated eagerly so a typo is reported against the
    /// terminal being declared rather than at build time.
    pub fn regex_terminal(&mut self, name: &str, pattern: &str) -> Result<TerminalId, GrammarError> {
        // Validation compile; the real matcher is compiled at build() with the
        // grammar's case flag applied.
        RegexMatcher::validate(pattern).map_err(|source| GrammarError::InvalidPattern {
            name: name.to_string(),
            source,
        })?;
        Ok(self.push_terminal(TerminalSpec {
            name: name.to_string(),
            category: TokenCategory::Content,
            kind: TerminalKind::Regex(pattern.to_string()),
            priority: 0,
            firsts: None,
            non_grammar: false,
        }))
    }

    /// Register a quoted-string terminal with the given dialect.
    pub fn string_terminal(&mut self, name: &str, dialect: StringDialect) -> TerminalId {
        self.push_terminal(TerminalSpec {
            name: name.to_string(),
            category: TokenCategory::Content,
            kind: TerminalKind::QuotedString(dialect),
            priority: 0,
            firsts: None,
            non_grammar: false,
        })
    }

    /// Register a comment terminal. `end = None` means the comment runs to the
    /// end of the line (or input). Comments are non-grammar: the scanner
    /// records and skips them.
    pub fn comment_terminal(&mut self, name: &str, start: &str, end: Option<&str>) -> TerminalId {
        self.push_terminal(TerminalSpec {
            name: name.to_string(),
            category: TokenCategory::Comment,
            kind: TerminalKind::Comment {
                start: start.to_string(),
                end: end.map(str::to_string),
            },
            priority: 0,
            firsts: None,
            non_grammar: true,
        })
    }

    /// Override a terminal's scanning priority (ties between equal-length
    /// matches go to the higher priority).
    pub fn set_priority(&mut self, terminal: TerminalId, priority: i16) {
        self.terminals[terminal.0].priority = priority;
    }

    /// Override the prefix strings used to pre-filter this terminal during
    /// scanning. Mostly useful for regex terminals, which otherwise get tried
    /// at every position.
    pub fn set_firsts(&mut self, terminal: TerminalId, firsts: &[&str]) {
        self.terminals[terminal.0].firsts = Some(firsts.iter().map(|s| s.to_string()).collect());
    }

    /// Mark terminals as punctuation: parsed normally, elided from reduction
    /// children.
    pub fn mark_punctuation(&mut self, terminals: &[TerminalId]) {
        for &t in terminals {
            self.terminals[t.0].category = TokenCategory::Punctuation;
        }
    }

    /// Mark a terminal as non-grammar: matched and recorded by the scanner but
    /// never forwarded to the parser.
    pub fn mark_non_grammar(&mut self, terminal: TerminalId) {
        self.terminals[terminal.0].non_grammar = true;
    }

    pub fn nonterminal(&mut self, name: &str) -> NonTerminalId {
        self.nonterminals.push(NonTerminalSpec {
            name: name.to_string(),
            transient: false,
        });
        NonTerminalId(self.nonterminals.len() - 1)
    }

    /// Mark non-terminals as transient (collapsed out of the tree).
    pub fn mark_transient(&mut self, nonterminals: &[NonTerminalId]) {
        for &nt in nonterminals {
            self.nonterminals[nt.0].transient = true;
        }
    }

    /// Add a production. An empty body derives the empty sequence.
    pub fn production(
        &mut self,
        head: NonTerminalId,
        body: impl IntoIterator<Item = SymbolId>,
    ) -> ProductionId {
        self.productions.push(ProductionSpec {
            head,
            body: body.into_iter().collect(),
            node_kind: None,
            precedence: None,
        });
        ProductionId(self.productions.len() - 1)
    }

    /// Attach an opaque node-construction hint to a production. The automaton
    /// carries it for the host's factory and never inspects it.
    pub fn set_node_kind(&mut self, production: ProductionId, kind: &'static str) {
        self.productions[production.0].node_kind = Some(kind);
    }

    /// Give a production an explicit precedence terminal, overriding the
    /// rightmost-terminal default.
    pub fn set_precedence_symbol(&mut self, production: ProductionId, terminal: TerminalId) {
        self.productions[production.0].precedence = Some(terminal);
    }

    /// Declare the next-higher precedence level (level 1 is lowest) for a
    /// group of operator terminals.
    pub fn precedence(&mut self, assoc: Associativity, operators: &[TerminalId]) {
        self.precedence.push_level(assoc, operators);
    }

    pub fn set_start(&mut self, start: NonTerminalId) {
        self.start = Some(start);
    }

    // ========================================================================
    // Rule combinators
    // ========================================================================

    /// An optional occurrence of `symbol`: derives `symbol` or nothing.
    /// The helper non-terminal is transient, so it never shows up in trees.
    pub fn optional(&mut self, name: &str, symbol: SymbolId) -> NonTerminalId {
        let opt = self.nonterminal(name);
        self.production(opt, [symbol]);
        self.production(opt, []);
        self.mark_transient(&[opt]);
        opt
    }

    /// One or more occurrences of `element`, optionally separated.
    pub fn plus_list(
        &mut self,
        name: &str,
        element: SymbolId,
        separator: Option<TerminalId>,
    ) -> NonTerminalId {
        let list = self.nonterminal(name);
        self.production(list, [element]);
        match separator {
            Some(sep) => self.production(list, [list.into(), sep.into(), element]),
            None => self.production(list, [list.into(), element]),
        };
        list
    }

    /// Zero or more occurrences of `element`, optionally separated.
    pub fn star_list(
        &mut self,
        name: &str,
        element: SymbolId,
        separator: Option<TerminalId>,
    ) -> NonTerminalId {
        let list = self.nonterminal(name);
        self.production(list, []);
        match separator {
            // a separated star list is empty or a non-empty separated list
            Some(_) => {
                let plus = self.plus_list(&format!("{name}+"), element, separator);
                self.production(list, [plus.into()]);
                self.mark_transient(&[list]);
            }
            None => {
                self.production(list, [list.into(), element]);
            }
        }
        list
    }

    fn push_terminal(&mut self, spec: TerminalSpec) -> TerminalId {
        self.terminals.push(spec);
        TerminalId(self.terminals.len() - 1)
    }

    /// Freeze the grammar, validating structure and compiling matchers.
    ///
    /// ## Errors
    /// - [`GrammarError::NoStartSymbol`] if no start symbol was set
    /// - [`GrammarError::EmptyRule`] for a non-terminal with no productions
    /// - [`GrammarError::UndeclaredSymbol`] if a body references an id that
    ///   does not belong to this grammar
    /// - [`GrammarError::InvalidPattern`] if a regex terminal fails to compile
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let start = self.start.ok_or(GrammarError::NoStartSymbol)?;

        // Collect productions per head before validation so empty rules are
        // reported with their non-terminal's name.
        let mut rules: Vec<Vec<ProductionId>> = vec![Vec::new(); self.nonterminals.len() + 1];
        for (i, prod) in self.productions.iter().enumerate() {
            if prod.head.0 >= self.nonterminals.len() {
                return Err(GrammarError::UndeclaredSymbol {
                    head: format!("#{}", prod.head.0),
                });
            }
            rules[prod.head.0].push(ProductionId(i));
        }
        for (i, nt) in self.nonterminals.iter().enumerate() {
            if rules[i].is_empty() {
                return Err(GrammarError::EmptyRule {
                    name: nt.name.clone(),
                });
            }
        }
        for prod in &self.productions {
            let head_name = &self.nonterminals[prod.head.0].name;
            for symbol in &prod.body {
                let known = match symbol {
                    SymbolId::Terminal(t) => t.0 < self.terminals.len(),
                    SymbolId::NonTerminal(nt) => nt.0 < self.nonterminals.len(),
                };
                if !known {
                    return Err(GrammarError::UndeclaredSymbol {
                        head: head_name.clone(),
                    });
                }
            }
        }

        // Augment: Start' -> Start ⊣ is modelled as Start' -> Start with the
        // end-of-input terminal seeding the start state's lookaheads.
        let augmented_nt = NonTerminalId(self.nonterminals.len());
        let augmented = ProductionId(self.productions.len());
        rules[augmented_nt.0].push(augmented);

        let mut nonterminals: Vec<NonTerminal> = self
            .nonterminals
            .iter()
            .zip(&rules)
            .map(|(spec, prods)| NonTerminal {
                name: spec.name.clone(),
                transient: spec.transient,
                productions: prods.clone(),
            })
            .collect();
        nonterminals.push(NonTerminal {
            name: format!("{}'", self.nonterminals[start.0].name),
            transient: false,
            productions: vec![augmented],
        });

        let mut productions: Vec<Production> = self
            .productions
            .iter()
            .map(|spec| Production {
                head: spec.head,
                body: spec.body.clone(),
                node_kind: spec.node_kind,
                precedence: spec.precedence,
            })
            .collect();
        productions.push(Production {
            head: augmented_nt,
            body: vec![SymbolId::NonTerminal(start)],
            node_kind: None,
            precedence: None,
        });

        let ignore_case = !self.case_sensitive;
        let mut terminals = Vec::with_capacity(self.terminals.len());
        for spec in self.terminals {
            let (matcher, firsts): (Option<Box<dyn TerminalMatcher>>, Vec<String>) = match &spec.kind {
                TerminalKind::Internal => (None, Vec::new()),
                TerminalKind::Literal(text) => (
                    Some(Box::new(LiteralMatcher::new(text, ignore_case))),
                    vec![text.clone()],
                ),
                TerminalKind::Regex(pattern) => {
                    let matcher =
                        RegexMatcher::new(pattern, ignore_case).map_err(|source| GrammarError::InvalidPattern {
                            name: spec.name.clone(),
                            source,
                        })?;
                    (Some(Box::new(matcher)), Vec::new())
                }
                TerminalKind::QuotedString(dialect) => {
                    let matcher = StringMatcher::new(dialect.clone());
                    let firsts = matcher.firsts();
                    (Some(Box::new(matcher)), firsts)
                }
                TerminalKind::Comment { start, end } => (
                    Some(Box::new(CommentMatcher::new(start, end.as_deref()))),
                    vec![start.clone()],
                ),
            };
            terminals.push(Terminal {
                name: spec.name,
                category: spec.category,
                priority: spec.priority,
                firsts: spec.firsts.unwrap_or(firsts),
                matcher,
                non_grammar: spec.non_grammar,
            });
        }

        let scan_index = ScanIndex::build(&terminals, ignore_case);

        Ok(Grammar {
            case_sensitive: self.case_sensitive,
            whitespace: self.whitespace,
            terminals,
            nonterminals,
            productions,
            precedence: self.precedence,
            start,
            augmented,
            scan_index,
        })
    }
}

// ============================================================================
// FROZEN GRAMMAR
// ============================================================================

/// End-of-input terminal, fixed in slot 0 by the builder.
pub(crate) const EOF: TerminalId = TerminalId(0);
/// Error terminal, fixed in slot 1.
pub(crate) const ERROR: TerminalId = TerminalId(1);
/// Whitespace terminal, fixed in slot 2.
pub(crate) const WHITESPACE: TerminalId = TerminalId(2);

/// Immutable grammar, ready for table construction and scanning.
///
/// ## Notes
/// - A `Grammar` is safely shared across concurrent parses; nothing mutates it
///   after `build`.
#[derive(Debug)]
pub struct Grammar {
    case_sensitive: bool,
    whitespace: String,
    terminals: Vec<Terminal>,
    nonterminals: Vec<NonTerminal>,
    productions: Vec<Production>,
    precedence: PrecedenceTable,
    start: NonTerminalId,
    augmented: ProductionId,
    scan_index: ScanIndex,
}

impl Grammar {
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn terminal(&self, id: TerminalId) -> &Terminal {
        &self.terminals[id.0]
    }

    pub fn nonterminal(&self, id: NonTerminalId) -> &NonTerminal {
        &self.nonterminals[id.0]
    }

    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id.0]
    }

    pub fn productions_of(&self, id: NonTerminalId) -> &[ProductionId] {
        &self.nonterminals[id.0].productions
    }

    pub fn production_count(&self) -> usize {
        self.productions.len()
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    pub fn nonterminal_count(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn start(&self) -> NonTerminalId {
        self.start
    }

    pub fn eof(&self) -> TerminalId {
        EOF
    }

    pub fn error_terminal(&self) -> TerminalId {
        ERROR
    }

    pub(crate) fn whitespace_terminal(&self) -> TerminalId {
        WHITESPACE
    }

    pub(crate) fn augmented(&self) -> ProductionId {
        self.augmented
    }

    pub(crate) fn whitespace_chars(&self) -> &str {
        &self.whitespace
    }

    pub fn precedence(&self) -> &PrecedenceTable {
        &self.precedence
    }

    /// Precedence a production reduces under: its explicit precedence terminal
    /// if set, otherwise the rightmost body terminal with a registered entry.
    pub fn effective_precedence(&self, id: ProductionId) -> Option<OperatorInfo> {
        let production = self.production(id);
        if let Some(term) = production.precedence {
            return self.precedence.get(term);
        }
        production.body.iter().rev().find_map(|symbol| match symbol {
            SymbolId::Terminal(t) => self.precedence.get(*t),
            SymbolId::NonTerminal(_) => None,
        })
    }

    pub fn symbol_name(&self, symbol: SymbolId) -> &str {
        match symbol {
            SymbolId::Terminal(t) => &self.terminal(t).name,
            SymbolId::NonTerminal(nt) => &self.nonterminal(nt).name,
        }
    }

    /// Human-readable rendering of a production for diagnostics.
    pub fn production_display(&self, id: ProductionId) -> String {
        let production = self.production(id);
        let mut out = format!("{} ->", self.nonterminal(production.head).name);
        if production.body.is_empty() {
            out.push_str(" <empty>");
        }
        for symbol in &production.body {
            out.push(' ');
            out.push_str(self.symbol_name(*symbol));
        }
        out
    }

    /// Candidate terminals for a position starting with `first`, sorted by
    /// descending priority (registration order breaks ties).
    pub(crate) fn scan_candidates(&self, first: char) -> &[TerminalId] {
        self.scan_index.candidates(first)
    }
}

// ============================================================================
// Scanner pre-filter index
// ============================================================================

/// First-character index over matched terminals, built once per grammar.
#[derive(Debug)]
struct ScanIndex {
    by_first_char: BTreeMap<char, Vec<TerminalId>>,
    /// Terminals with no prefix information; tried at every position.
    unindexed: Vec<TerminalId>,
}

impl ScanIndex {
    fn build(terminals: &[Terminal], ignore_case: bool) -> Self {
        let mut unindexed: Vec<TerminalId> = Vec::new();
        let mut by_first_char: BTreeMap<char, Vec<TerminalId>> = BTreeMap::new();

        for (i, term) in terminals.iter().enumerate() {
            if term.matcher.is_none() {
                continue;
            }
            let id = TerminalId(i);
            if term.firsts.is_empty() {
                unindexed.push(id);
                continue;
            }
            for prefix in &term.firsts {
                let Some(c) = prefix.chars().next() else {
                    continue;
                };
                let mut chars = vec![c];
                if ignore_case {
                    chars.extend(c.to_lowercase());
                    chars.extend(c.to_uppercase());
                }
                for c in chars {
                    let entry = by_first_char.entry(c).or_default();
                    if !entry.contains(&id) {
                        entry.push(id);
                    }
                }
            }
        }

        let by_priority = |a: &TerminalId, b: &TerminalId| {
            terminals[b.0]
                .priority
                .cmp(&terminals[a.0].priority)
                .then(a.cmp(b))
        };
        unindexed.sort_by(by_priority);
        for list in by_first_char.values_mut() {
            // Unindexed terminals are candidates everywhere.
            for &id in &unindexed {
                if !list.contains(&id) {
                    list.push(id);
                }
            }
            list.sort_by(by_priority);
        }

        Self {
            by_first_char,
            unindexed,
        }
    }

    fn candidates(&self, first: char) -> &[TerminalId] {
        self.by_first_char
            .get(&first)
            .map(Vec::as_slice)
            .unwrap_or(&self.unindexed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_a_start_symbol() {
        let mut g = GrammarBuilder::new();
        let num = g.regex_terminal("number", "[0-9]+").unwrap();
        let expr = g.nonterminal("expr");
        g.production(expr, [num.into()]);
        assert!(matches!(g.build(), Err(GrammarError::NoStartSymbol)));
    }

    #[test]
    fn build_rejects_a_rule_never_assigned() {
        let mut g = GrammarBuilder::new();
        let num = g.regex_terminal("number", "[0-9]+").unwrap();
        let expr = g.nonterminal("expr");
        let orphan = g.nonterminal("orphan");
        g.production(expr, [num.into(), orphan.into()]);
        g.set_start(expr);
        match g.build() {
            Err(GrammarError::EmptyRule { name }) => assert_eq!(name, "orphan"),
            other => panic!("expected EmptyRule, got {other:?}"),
        }
    }

    #[test]
    fn build_rejects_foreign_symbol_ids() {
        let mut other = GrammarBuilder::new();
        for _ in 0..10 {
            other.nonterminal("padding");
        }
        let foreign = other.nonterminal("foreign");

        let mut g = GrammarBuilder::new();
        let expr = g.nonterminal("expr");
        g.production(expr, [foreign.into()]);
        g.set_start(expr);
        assert!(matches!(g.build(), Err(GrammarError::UndeclaredSymbol { .. })));
    }

    #[test]
    fn build_rejects_invalid_regex_eagerly() {
        let mut g = GrammarBuilder::new();
        let err = g.regex_terminal("broken", "[unclosed").unwrap_err();
        assert!(matches!(err, GrammarError::InvalidPattern { name, .. } if name == "broken"));
    }

    #[test]
    fn effective_precedence_uses_rightmost_operator() {
        let mut g = GrammarBuilder::new();
        let plus = g.literal("+");
        let star = g.literal("*");
        let num = g.regex_terminal("number", "[0-9]+").unwrap();
        let expr = g.nonterminal("expr");
        let p_add = g.production(expr, [expr.into(), plus.into(), expr.into()]);
        let p_num = g.production(expr, [num.into()]);
        g.precedence(Associativity::Left, &[plus]);
        g.precedence(Associativity::Left, &[star]);
        g.set_start(expr);
        let grammar = g.build().unwrap();

        assert_eq!(
            grammar.effective_precedence(p_add),
            Some(OperatorInfo {
                level: 1,
                assoc: Associativity::Left
            })
        );
        assert_eq!(grammar.effective_precedence(p_num), None);
    }

    #[test]
    fn production_display_names_symbols() {
        let mut g = GrammarBuilder::new();
        let plus = g.literal("+");
        let num = g.regex_terminal("number", "[0-9]+").unwrap();
        let expr = g.nonterminal("expr");
        let p = g.production(expr, [expr.into(), plus.into(), num.into()]);
        g.set_start(expr);
        let grammar = g.build().unwrap();
        assert_eq!(grammar.production_display(p), "expr -> expr + number");
    }

    #[test]
    fn scan_index_prefers_higher_priority_on_ties() {
        let mut g = GrammarBuilder::new();
        let kw = g.literal("if");
        let ident = g.regex_terminal("identifier", "[a-z]+").unwrap();
        let expr = g.nonterminal("expr");
        g.production(expr, [kw.into(), ident.into()]);
        g.set_start(expr);
        let grammar = g.build().unwrap();

        let candidates = grammar.scan_candidates('i');
        assert_eq!(candidates.first(), Some(&kw), "literal should be tried before the fallback regex");
        assert!(candidates.contains(&ident));
    }
}
