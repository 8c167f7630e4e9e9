//! The published parser table.

use crate::diagnostics::Diagnostic;
use crate::grammar::{Grammar, NonTerminalId, ProductionId, TerminalId};
use std::collections::BTreeMap;

pub type StateId = usize;

/// One resolved table entry. Absence of an entry is the error action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(StateId),
    Reduce(ProductionId),
    Accept,
}

/// Immutable parser table: per state, at most one action per lookahead
/// terminal and a goto target per non-terminal.
///
/// ## Notes
/// - The table owns its grammar; once built, both are read-only and safely
///   shared across concurrent parses (wrap in `Arc` to share ownership).
/// - Resolved-conflict warnings from construction ride along for diagnostic
///   inspection; a table with unresolved conflicts is never published.
#[derive(Debug)]
pub struct ParserTable {
    pub(crate) grammar: Grammar,
    pub(crate) actions: Vec<BTreeMap<TerminalId, Action>>,
    pub(crate) gotos: Vec<BTreeMap<NonTerminalId, StateId>>,
    pub(crate) warnings: Vec<Diagnostic>,
}

impl ParserTable {
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn state_count(&self) -> usize {
        self.actions.len()
    }

    pub fn action(&self, state: StateId, terminal: TerminalId) -> Option<Action> {
        self.actions.get(state).and_then(|row| row.get(&terminal)).copied()
    }

    pub(crate) fn goto(&self, state: StateId, nonterminal: NonTerminalId) -> Option<StateId> {
        self.gotos.get(state).and_then(|row| row.get(&nonterminal)).copied()
    }

    /// Warnings recorded while resolving conflicts during construction.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Terminals with an action in `state`, for expected-set reporting.
    /// The internal error terminal is not part of what a user can type.
    pub fn expected_terminals(&self, state: StateId) -> Vec<TerminalId> {
        self.actions
            .get(state)
            .map(|row| {
                row.keys()
                    .copied()
                    .filter(|&t| t != self.grammar.error_terminal())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Target of an error-shift transition out of `state`, if the grammar
    /// declared one (a production containing the error symbol).
    pub(crate) fn error_shift_target(&self, state: StateId) -> Option<StateId> {
        match self.action(state, self.grammar.error_terminal()) {
            Some(Action::Shift(target)) => Some(target),
            _ => None,
        }
    }
}
