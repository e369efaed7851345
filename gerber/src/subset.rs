//! Subset construction: NFA -> DFA.
//!
//! Each DFA state is the canonical set of NFA states the NFA could be in. The worklist visits
//! every materialized set once and computes its successor for every symbol, sending moves the
//! NFA does not define to the dead state, so the resulting transition function is total.

use std::collections::VecDeque;
use std::hash::Hash;

use log::{debug, trace};
use smallvec::SmallVec;

use crate::dfa::{Dfa, DfaStateId, StateSet};
use crate::nfa::{DEAD_STATE, Nfa, StateId};

/// Knobs for [`determinize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetConfig {
    /// Also seed the worklist with every single NFA state `{i}`, not just the start state.
    /// The extra states are usually unreachable, they do not change the language.
    pub seed_singletons: bool,
}

impl Default for SubsetConfig {
    fn default() -> Self {
        Self {
            seed_singletons: true,
        }
    }
}

/// Converts an NFA into an equivalent DFA. No minimization is done, the number of states may be
/// exponential in the number of NFA states.
pub fn determinize<Σ: Eq + Hash + Copy>(nfa: &Nfa<Σ>, config: &SubsetConfig) -> Dfa<Σ> {
    let mut dfa = Dfa::new(nfa.alphabet().to_vec());
    let mut queue = VecDeque::from([dfa.dead()]);

    let start = materialize(&mut dfa, nfa, &mut queue, nfa.epsilon_closure([nfa.start()]));
    dfa.set_start(start);

    if config.seed_singletons {
        for state in 1..=nfa.num_states() {
            materialize(&mut dfa, nfa, &mut queue, StateSet::from_states([state]));
        }
    }

    while let Some(current) = queue.pop_front() {
        let members = match dfa.state_set(current) {
            Some(set) => set.clone(),
            None => continue,
        };

        for &symbol in nfa.alphabet() {
            let mut moved: SmallVec<[StateId; 8]> = SmallVec::new();
            for state in members.iter() {
                match nfa.targets(state, Some(symbol)) {
                    [] => moved.push(DEAD_STATE),
                    targets => moved.extend_from_slice(targets),
                }
            }

            let destination = materialize(&mut dfa, nfa, &mut queue, nfa.epsilon_closure(moved));
            dfa.set_transition(current, symbol, destination);
        }
    }

    debug!(
        "subset construction: {} NFA states -> {} DFA states",
        nfa.num_states(),
        dfa.num_states()
    );
    dfa
}

/// Returns the DFA state for `set`, creating and enqueueing it on first sight.
fn materialize<Σ: Eq + Hash + Copy>(
    dfa: &mut Dfa<Σ>,
    nfa: &Nfa<Σ>,
    queue: &mut VecDeque<DfaStateId>,
    set: StateSet,
) -> DfaStateId {
    if let Some(existing) = dfa.state_id(&set) {
        return existing;
    }

    let accepting = set.iter().any(|state| nfa.is_accept(state));
    trace!("new DFA state {{{set}}} accepting={accepting}");
    let id = dfa.push_state(set, accepting);
    queue.push_back(id);
    id
}
