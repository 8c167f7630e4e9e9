//! LALR state construction.
//!
//! States are identified by their **kernel** (the pre-closure items). A goto
//! kernel that matches an existing state merges into it: lookaheads are
//! unioned and the state is re-queued so the new lookaheads propagate through
//! its closure and successors, until everything reaches a fixed point. This is
//! the defining LALR memory/precision trade-off.
//!
//! Construction fails with a dedicated non-convergence error once the state
//! count passes [`MAX_STATES`]; a runaway grammar must never look like a hang.

use super::first::FirstSets;
use super::items::Item;
use super::table::StateId;
use crate::diagnostics::GrammarError;
use crate::grammar::{Grammar, SymbolId, TerminalId};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Hard ceiling on the number of LALR states.
pub(crate) const MAX_STATES: usize = 4096;

type Lookaheads = BTreeMap<Item, BTreeSet<TerminalId>>;

#[derive(Debug)]
pub(crate) struct State {
    /// Pre-closure items; the state's identity.
    pub kernel: Vec<Item>,
    /// Lookahead sets for the kernel items.
    pub lookaheads: Lookaheads,
    pub transitions: BTreeMap<SymbolId, StateId>,
    /// Full closure with settled lookaheads; filled by the final pass.
    pub closure: Lookaheads,
}

/// Closure of a kernel: expand every non-terminal item by substituting its
/// productions, with lookaheads FIRST(rest · parent-lookaheads).
fn closure_of(grammar: &Grammar, firsts: &FirstSets, kernel: &Lookaheads) -> Lookaheads {
    let mut items = kernel.clone();
    let mut queue: VecDeque<Item> = items.keys().copied().collect();

    while let Some(item) = queue.pop_front() {
        let Some(SymbolId::NonTerminal(nt)) = item.next_symbol(grammar) else {
            continue;
        };
        let production = grammar.production(item.production);
        let rest = &production.body[item.dot + 1..];
        let tail = items
            .get(&item)
            .expect("INVARIANT: queued item is present in the closure")
            .clone();
        let first = firsts.first_of_sequence(rest, &tail);

        for &pid in grammar.productions_of(nt) {
            let expansion = Item::new(pid, 0);
            let is_new = !items.contains_key(&expansion);
            let entry = items.entry(expansion).or_default();
            let before = entry.len();
            entry.extend(first.iter().copied());
            if is_new || entry.len() != before {
                queue.push_back(expansion);
            }
        }
    }

    items
}

pub(crate) fn construct(grammar: &Grammar, firsts: &FirstSets) -> Result<Vec<State>, GrammarError> {
    let start_item = Item::new(grammar.augmented(), 0);
    let mut start_lookaheads = Lookaheads::new();
    start_lookaheads.insert(start_item, BTreeSet::from([grammar.eof()]));

    let mut states = vec![State {
        kernel: vec![start_item],
        lookaheads: start_lookaheads,
        transitions: BTreeMap::new(),
        closure: Lookaheads::new(),
    }];
    let mut kernel_index: BTreeMap<Vec<Item>, StateId> = BTreeMap::new();
    kernel_index.insert(states[0].kernel.clone(), 0);

    let mut queue: VecDeque<StateId> = VecDeque::from([0]);
    let mut in_queue = vec![true];

    while let Some(sid) = queue.pop_front() {
        in_queue[sid] = false;
        let closure = closure_of(grammar, firsts, &states[sid].lookaheads);

        // Group advanced items by the symbol being read.
        let mut by_symbol: BTreeMap<SymbolId, Lookaheads> = BTreeMap::new();
        for (item, lookaheads) in &closure {
            if let Some(symbol) = item.next_symbol(grammar) {
                by_symbol
                    .entry(symbol)
                    .or_default()
                    .insert(item.advanced(), lookaheads.clone());
            }
        }

        for (symbol, kernel_map) in by_symbol {
            let kernel: Vec<Item> = kernel_map.keys().copied().collect();
            let target = match kernel_index.get(&kernel).copied() {
                Some(target) => {
                    // LALR merge: same kernel, union the lookaheads, and
                    // re-propagate if anything grew.
                    let mut grew = false;
                    for (item, lookaheads) in kernel_map {
                        let entry = states[target]
                            .lookaheads
                            .get_mut(&item)
                            .expect("INVARIANT: merged kernels have identical items");
                        let before = entry.len();
                        entry.extend(lookaheads);
                        grew |= entry.len() != before;
                    }
                    if grew && !in_queue[target] {
                        queue.push_back(target);
                        in_queue[target] = true;
                    }
                    target
                }
                None => {
                    let target = states.len();
                    if target >= MAX_STATES {
                        return Err(GrammarError::NonConvergence { limit: MAX_STATES });
                    }
                    kernel_index.insert(kernel.clone(), target);
                    states.push(State {
                        kernel,
                        lookaheads: kernel_map,
                        transitions: BTreeMap::new(),
                        closure: Lookaheads::new(),
                    });
                    in_queue.push(true);
                    queue.push_back(target);
                    target
                }
            };
            states[sid].transitions.insert(symbol, target);
        }
    }

    // Lookaheads are settled; record each state's final closure for action
    // derivation.
    for sid in 0..states.len() {
        states[sid].closure = closure_of(grammar, firsts, &states[sid].lookaheads);
    }

    Ok(states)
}
