//! Total deterministic automata, with each state named by the set of NFA states it stands for.

use std::collections::VecDeque;
use std::fmt::{self, Display};
use std::hash::Hash;

use hashbrown::HashMap;
use smallvec::{SmallVec, smallvec};
use thiserror::Error;

use crate::nfa::{DEAD_STATE, StateId};

/// Index of a state inside a [`Dfa`].
pub type DfaStateId = usize;

// MARK: StateSet
/// The canonical identity of a DFA state: the NFA states it stands for, sorted and deduplicated.
///
/// The dead state is the singleton `{0}`. [`DEAD_STATE`] never shares a set with a real NFA
/// state, it is stripped as soon as anything else is present. Two sets holding the same NFA states
/// are always equal, whatever order the states were collected in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet(SmallVec<[StateId; 4]>);

impl StateSet {
    /// The set standing for "no match possible".
    pub fn dead() -> Self {
        Self(smallvec![DEAD_STATE])
    }

    /// Canonicalizes a collection of NFA states. An empty collection gives the dead state.
    pub fn from_states(states: impl IntoIterator<Item = StateId>) -> Self {
        let mut ids: SmallVec<[StateId; 4]> = states.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        if ids.len() > 1 && ids[0] == DEAD_STATE {
            ids.remove(0);
        }
        if ids.is_empty() {
            return Self::dead();
        }
        Self(ids)
    }

    /// Returns if this is the dead state.
    pub fn is_dead(&self) -> bool {
        self.0.as_slice() == [DEAD_STATE]
    }

    /// Returns if the NFA state is a member.
    pub fn contains(&self, state: StateId) -> bool {
        self.0.binary_search(&state).is_ok()
    }

    /// The member states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.0.iter().copied()
    }

    /// The member states in ascending order.
    pub fn as_slice(&self) -> &[StateId] {
        &self.0
    }
}

/// Comma joined member ids, e.g. `1,3,4`. The dead state prints as `0`.
impl Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids = self.iter();
        if let Some(first) = ids.next() {
            write!(f, "{first}")?;
        }
        for id in ids {
            write!(f, ",{id}")?;
        }
        Ok(())
    }
}

// MARK: Errors
/// Raised when a simulated input contains a symbol the automaton was not built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("symbol `{symbol}` at position {position} is not in the alphabet")]
pub struct UnknownSymbol<Σ> {
    /// The offending symbol.
    pub symbol: Σ,
    /// Index of the symbol in the input.
    pub position: usize,
}

// MARK: DFA
/// A deterministic finite automaton with a total transition function.
///
/// Every state has exactly one transition for every symbol of the alphabet, undefined moves
/// having been routed to the dead state during construction. State `0` is always the dead state.
/// Built by [`crate::determinize`], immutable afterwards.
#[derive(Debug, Clone)]
pub struct Dfa<Σ: Eq + Hash + Copy> {
    alphabet: Vec<Σ>,
    states: Vec<StateSet>,
    accepting: Vec<bool>,
    index: HashMap<StateSet, DfaStateId>,
    transitions: HashMap<(DfaStateId, Σ), DfaStateId>,
    start: DfaStateId,
}

impl<Σ: Eq + Hash + Copy> Dfa<Σ> {
    /// An automaton holding only the dead state, which is also its start.
    pub(crate) fn new(alphabet: Vec<Σ>) -> Self {
        let mut dfa = Self {
            alphabet,
            states: Vec::new(),
            accepting: Vec::new(),
            index: HashMap::new(),
            transitions: HashMap::new(),
            start: 0,
        };
        dfa.push_state(StateSet::dead(), false);
        dfa
    }

    /// Adds a state for `set`, which must not be present yet.
    pub(crate) fn push_state(&mut self, set: StateSet, accepting: bool) -> DfaStateId {
        let id = self.states.len();
        self.index.insert(set.clone(), id);
        self.states.push(set);
        self.accepting.push(accepting);
        id
    }

    pub(crate) fn set_transition(&mut self, from: DfaStateId, symbol: Σ, to: DfaStateId) {
        self.transitions.insert((from, symbol), to);
    }

    pub(crate) fn set_start(&mut self, start: DfaStateId) {
        self.start = start;
    }

    /// The start state.
    pub fn start(&self) -> DfaStateId {
        self.start
    }

    /// The dead state, which never accepts and loops to itself on every symbol.
    pub fn dead(&self) -> DfaStateId {
        0
    }

    /// The input symbols of the automaton.
    pub fn alphabet(&self) -> &[Σ] {
        &self.alphabet
    }

    /// Number of materialized states, the dead state included.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Returns if the state is accepting.
    pub fn is_accepting(&self, state: DfaStateId) -> bool {
        self.accepting.get(state).copied().unwrap_or(false)
    }

    /// The NFA states a DFA state stands for.
    pub fn state_set(&self, state: DfaStateId) -> Option<&StateSet> {
        self.states.get(state)
    }

    /// Looks a state up by its NFA state set.
    pub fn state_id(&self, set: &StateSet) -> Option<DfaStateId> {
        self.index.get(set).copied()
    }

    /// The next state on `symbol`, `None` only if the symbol is not in the alphabet (or the state
    /// does not exist).
    pub fn transition(&self, state: DfaStateId, symbol: Σ) -> Option<DfaStateId> {
        self.transitions.get(&(state, symbol)).copied()
    }

    /// States reachable from the start state, in ascending order.
    pub fn reachable_states(&self) -> Vec<DfaStateId> {
        let mut seen = vec![false; self.states.len()];
        let mut queue = VecDeque::from([self.start]);
        seen[self.start] = true;

        while let Some(state) = queue.pop_front() {
            for &symbol in &self.alphabet {
                if let Some(next) = self.transition(state, symbol) {
                    if !seen[next] {
                        seen[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        (0..self.states.len()).filter(|&state| seen[state]).collect()
    }

    /// Tests the provided input sequence, returning true if the DFA ends at an accept state.
    /// Fails on the first symbol that is not part of the alphabet.
    pub fn simulate(&self, input: impl IntoIterator<Item = Σ>) -> Result<bool, UnknownSymbol<Σ>> {
        let mut cur = self.start;
        for (position, symbol) in input.into_iter().enumerate() {
            cur = self
                .transition(cur, symbol)
                .ok_or(UnknownSymbol { symbol, position })?;
        }
        Ok(self.is_accepting(cur))
    }

    /// Tests the provided input sequence, returning true if the DFA ends at an accept state.
    pub fn simulate_slice(&self, input: &[Σ]) -> Result<bool, UnknownSymbol<Σ>> {
        self.simulate(input.iter().copied())
    }
}
