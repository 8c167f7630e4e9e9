//! Conflict resolution: a pure function from candidate actions to a resolved
//! action plus diagnostics.
//!
//! Keeping resolution out of the state-construction traversal makes the
//! policy testable in isolation; nothing here mutates the table.

use super::table::{Action, StateId};
use crate::diagnostics::{Diagnostic, DiagnosticKind, GrammarError};
use crate::grammar::{Associativity, Grammar, ProductionId, TerminalId};

/// Raw candidate actions for one (state, lookahead) pair.
#[derive(Debug, Default)]
pub(crate) struct Candidates {
    pub shift: Option<StateId>,
    /// In production declaration order.
    pub reduces: Vec<ProductionId>,
    pub accept: bool,
}

/// Resolve to at most one action.
///
/// Policy, in order:
/// - Accept wins (it only occurs on the augmented item at end of input).
/// - Reduce/reduce: precedence on both productions picks the higher level
///   (warning names the discarded alternative); otherwise fatal.
/// - Shift/reduce: precedence on both sides compares levels; equal levels
///   defer to associativity (`Left` reduces, `Right` shifts,
///   `NonAssociative` removes the action). If either side lacks an entry the
///   conflict defaults to **shift** — a permissive, compatibility-preserving
///   bias — and records a warning.
pub(crate) fn resolve(
    grammar: &Grammar,
    state: StateId,
    lookahead: TerminalId,
    candidates: Candidates,
) -> Result<(Option<Action>, Vec<Diagnostic>), GrammarError> {
    let mut diagnostics = Vec::new();
    let lookahead_name = || grammar.terminal(lookahead).name.clone();

    if candidates.accept {
        if let Some(&production) = candidates.reduces.first() {
            diagnostics.push(Diagnostic::warning(DiagnosticKind::ShiftOverReduce {
                state,
                lookahead: lookahead_name(),
                production: grammar.production_display(production),
            }));
        }
        return Ok((Some(Action::Accept), diagnostics));
    }

    // Reduce/reduce first, so a surviving single reduce faces the shift.
    let reduce = match candidates.reduces.as_slice() {
        [] => None,
        [only] => Some(*only),
        [first, second, ..] => {
            let first_prec = grammar.effective_precedence(*first);
            let second_prec = grammar.effective_precedence(*second);
            match (first_prec, second_prec) {
                (Some(a), Some(b)) if a.level != b.level => {
                    let (chosen, discarded) = if a.level > b.level {
                        (*first, *second)
                    } else {
                        (*second, *first)
                    };
                    diagnostics.push(Diagnostic::warning(DiagnosticKind::ReduceReduceResolved {
                        state,
                        lookahead: lookahead_name(),
                        chosen: grammar.production_display(chosen),
                        discarded: grammar.production_display(discarded),
                    }));
                    Some(chosen)
                }
                _ => {
                    return Err(GrammarError::ReduceReduceConflict {
                        state,
                        lookaheads: vec![lookahead_name()],
                        first: grammar.production_display(*first),
                        second: grammar.production_display(*second),
                    });
                }
            }
        }
    };

    let action = match (candidates.shift, reduce) {
        (None, None) => None,
        (Some(target), None) => Some(Action::Shift(target)),
        (None, Some(production)) => Some(Action::Reduce(production)),
        (Some(target), Some(production)) => {
            let token_prec = grammar.precedence().get(lookahead);
            let production_prec = grammar.effective_precedence(production);
            match (token_prec, production_prec) {
                (Some(token), Some(prod)) => {
                    if prod.level > token.level {
                        Some(Action::Reduce(production))
                    } else if prod.level < token.level {
                        Some(Action::Shift(target))
                    } else {
                        match token.assoc {
                            Associativity::Left => Some(Action::Reduce(production)),
                            Associativity::Right => Some(Action::Shift(target)),
                            Associativity::NonAssociative => {
                                diagnostics.push(Diagnostic::warning(
                                    DiagnosticKind::NonAssociativeRejection {
                                        state,
                                        lookahead: lookahead_name(),
                                    },
                                ));
                                None
                            }
                        }
                    }
                }
                _ => {
                    // Documented permissive default; see the module docs.
                    diagnostics.push(Diagnostic::warning(DiagnosticKind::ShiftOverReduce {
                        state,
                        lookahead: lookahead_name(),
                        production: grammar.production_display(production),
                    }));
                    Some(Action::Shift(target))
                }
            }
        }
    };

    Ok((action, diagnostics))
}
