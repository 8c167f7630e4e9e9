//! Nullability and FIRST sets, computed to a fixed point.
//!
//! FIRST's empty-production markers are represented by the separate nullable
//! set rather than an epsilon pseudo-terminal.

use crate::grammar::{Grammar, NonTerminalId, ProductionId, SymbolId, TerminalId};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug)]
pub(crate) struct FirstSets {
    nullable: BTreeSet<NonTerminalId>,
    first: BTreeMap<NonTerminalId, BTreeSet<TerminalId>>,
}

impl FirstSets {
    pub(crate) fn compute(grammar: &Grammar) -> Self {
        let mut sets = Self {
            nullable: BTreeSet::new(),
            first: BTreeMap::new(),
        };

        let production_ids: Vec<_> = (0..grammar.production_count()).map(ProductionId).collect();

        loop {
            let mut changed = false;
            for &pid in &production_ids {
                let production = grammar.production(pid);
                let head = production.head;

                if production.body.iter().all(|&s| sets.nullable_symbol(s))
                    && sets.nullable.insert(head)
                {
                    changed = true;
                }

                let mut additions: BTreeSet<TerminalId> = BTreeSet::new();
                for &symbol in &production.body {
                    match symbol {
                        SymbolId::Terminal(t) => {
                            additions.insert(t);
                            break;
                        }
                        SymbolId::NonTerminal(nt) => {
                            if let Some(set) = sets.first.get(&nt) {
                                additions.extend(set.iter().copied());
                            }
                            if !sets.nullable.contains(&nt) {
                                break;
                            }
                        }
                    }
                }
                let entry = sets.first.entry(head).or_default();
                let before = entry.len();
                entry.extend(additions);
                changed |= entry.len() != before;
            }
            if !changed {
                break;
            }
        }

        sets
    }

    pub(crate) fn nullable_symbol(&self, symbol: SymbolId) -> bool {
        match symbol {
            SymbolId::Terminal(_) => false,
            SymbolId::NonTerminal(nt) => self.nullable.contains(&nt),
        }
    }

    /// FIRST of a symbol sequence followed by `tail` lookaheads: the terminals
    /// that can begin `symbols`, plus `tail` when the whole sequence can
    /// derive the empty sequence.
    pub(crate) fn first_of_sequence(
        &self,
        symbols: &[SymbolId],
        tail: &BTreeSet<TerminalId>,
    ) -> BTreeSet<TerminalId> {
        let mut out = BTreeSet::new();
        for &symbol in symbols {
            match symbol {
                SymbolId::Terminal(t) => {
                    out.insert(t);
                    return out;
                }
                SymbolId::NonTerminal(nt) => {
                    if let Some(set) = self.first.get(&nt) {
                        out.extend(set.iter().copied());
                    }
                    if !self.nullable.contains(&nt) {
                        return out;
                    }
                }
            }
        }
        out.extend(tail.iter().copied());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarBuilder;

    fn nullable_grammar() -> (Grammar, TerminalId, TerminalId, NonTerminalId, NonTerminalId) {
        let mut g = GrammarBuilder::new();
        let x = g.literal("x");
        let y = g.literal("y");
        let s = g.nonterminal("s");
        let a = g.nonterminal("a");
        let b = g.nonterminal("b");
        g.production(s, [a.into(), b.into()]);
        g.production(a, [x.into()]);
        g.production(a, []);
        g.production(b, [y.into()]);
        g.set_start(s);
        (g.build().unwrap(), x, y, a, b)
    }

    #[test]
    fn nullability_propagates_through_empty_productions() {
        let (grammar, _, _, a, b) = nullable_grammar();
        let firsts = FirstSets::compute(&grammar);
        assert!(firsts.nullable_symbol(SymbolId::NonTerminal(a)));
        assert!(!firsts.nullable_symbol(SymbolId::NonTerminal(b)));
    }

    #[test]
    fn first_of_sequence_skips_nullable_prefixes() {
        let (grammar, x, y, a, b) = nullable_grammar();
        let firsts = FirstSets::compute(&grammar);

        let sequence = [SymbolId::NonTerminal(a), SymbolId::NonTerminal(b)];
        let tail = BTreeSet::from([grammar.eof()]);
        assert_eq!(
            firsts.first_of_sequence(&sequence, &tail),
            BTreeSet::from([x, y])
        );
    }

    #[test]
    fn fully_nullable_sequences_fall_through_to_the_tail() {
        let (grammar, x, _, a, _) = nullable_grammar();
        let firsts = FirstSets::compute(&grammar);

        let sequence = [SymbolId::NonTerminal(a)];
        let tail = BTreeSet::from([grammar.eof()]);
        assert_eq!(
            firsts.first_of_sequence(&sequence, &tail),
            BTreeSet::from([x, grammar.eof()])
        );
    }
}
