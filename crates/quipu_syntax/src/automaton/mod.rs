//! Automaton builder: compiles a frozen [`Grammar`] into a [`ParserTable`].
//!
//! Construction runs in phases:
//! 1. nullability + FIRST sets (fixed point over the productions),
//! 2. LALR states from the augmented start production — closure, goto,
//!    kernel-keyed merging with lookahead union and re-propagation,
//! 3. candidate actions (shift per terminal transition, reduce per completed
//!    item per lookahead, accept on the augmented item),
//! 4. conflict resolution via a pure policy function,
//! 5. the immutable table, carrying resolved-conflict warnings.
//!
//! ## Conflict policy
//!
//! A shift/reduce conflict with no precedence declared on one side resolves
//! to **shift** and records a warning. This permissive default matches the
//! established toolkits this one is compatible with, but it can mask grammar
//! bugs: inspect [`ParserTable::warnings`] when developing a grammar rather
//! than relying on the bias. Reduce/reduce conflicts with no declared
//! precedence are fatal.
//!
//! ## Failure semantics
//!
//! Structural grammar problems fail earlier, in `GrammarBuilder::build`.
//! Here, an undeclared reduce/reduce ambiguity or a state-count blowup
//! ([`GrammarError::NonConvergence`]) fails construction; resolved conflicts
//! are warnings attached to the table.

mod conflicts;
mod first;
mod items;
mod states;
mod table;

pub use table::{Action, ParserTable, StateId};

use crate::diagnostics::GrammarError;
use crate::grammar::{Grammar, SymbolId, TerminalId};
use conflicts::Candidates;
use first::FirstSets;
use std::collections::BTreeMap;

/// Build the parser table for a grammar.
///
/// The grammar is consumed: the table owns it and publishes both as one
/// immutable unit.
///
/// ## Errors
/// - [`GrammarError::ReduceReduceConflict`] for an ambiguity the declared
///   precedence cannot resolve
/// - [`GrammarError::NonConvergence`] if state construction exceeds the
///   hard ceiling
#[tracing::instrument(skip_all, fields(
    terminals = grammar.terminal_count(),
    nonterminals = grammar.nonterminal_count(),
    productions = grammar.production_count(),
))]
pub fn build(grammar: Grammar) -> Result<ParserTable, GrammarError> {
    let firsts = FirstSets::compute(&grammar);
    let states = states::construct(&grammar, &firsts)?;
    tracing::debug!(states = states.len(), "automaton constructed");

    let mut actions = Vec::with_capacity(states.len());
    let mut gotos = Vec::with_capacity(states.len());
    let mut warnings = Vec::new();

    for (sid, state) in states.iter().enumerate() {
        let mut row: BTreeMap<TerminalId, Action> = BTreeMap::new();
        let mut goto_row = BTreeMap::new();
        let mut per_terminal: BTreeMap<TerminalId, Candidates> = BTreeMap::new();

        for (&symbol, &target) in &state.transitions {
            match symbol {
                SymbolId::Terminal(t) => per_terminal.entry(t).or_default().shift = Some(target),
                SymbolId::NonTerminal(nt) => {
                    goto_row.insert(nt, target);
                }
            }
        }

        // Closure items are ordered by (production, dot), so reduce candidates
        // accumulate in declaration order.
        for (item, lookaheads) in &state.closure {
            if !item.is_complete(&grammar) {
                continue;
            }
            let is_augmented = item.production == grammar.augmented();
            for &la in lookaheads {
                let entry = per_terminal.entry(la).or_default();
                if is_augmented {
                    entry.accept = true;
                } else {
                    entry.reduces.push(item.production);
                }
            }
        }

        for (terminal, candidates) in per_terminal {
            let (action, diagnostics) = conflicts::resolve(&grammar, sid, terminal, candidates)?;
            warnings.extend(diagnostics);
            if let Some(action) = action {
                row.insert(terminal, action);
            }
        }

        actions.push(row);
        gotos.push(goto_row);
    }

    for warning in &warnings {
        tracing::warn!("{}", warning.kind);
    }

    Ok(ParserTable {
        grammar,
        actions,
        gotos,
        warnings,
    })
}
