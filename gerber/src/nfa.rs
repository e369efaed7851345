//! Nondeterministic automata with epsilon moves.
//!
//! States are plain integer ids minted by [`NfaBuilder`]. Id `0` is reserved for the dead state,
//! so real states count up from `1`.

use std::hash::Hash;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::dfa::{Dfa, StateSet};
use crate::subset::{SubsetConfig, determinize};

/// Identifier of a state in an [`Nfa`]. Minted ids start at 1.
pub type StateId = u32;

/// Sentinel id standing for "no match possible". It is never minted by an [`NfaBuilder`], and
/// becomes the dead state of a determinized [`Dfa`].
pub const DEAD_STATE: StateId = 0;

/// Most (state, label) pairs in a Thompson style NFA lead to one or two targets, anything above
/// that spills to the heap.
type Targets = SmallVec<[StateId; 2]>;

// MARK: Builder
/// Collects the states and transitions of an NFA under construction.
///
/// States are plain indices handed out by [`NfaBuilder::fresh_state`], the builder is the only
/// owner of the id counter. Transition labels are `Option<Σ>`, with `None` being epsilon.
pub struct NfaBuilder<Σ: Eq + Hash + Copy> {
    num_states: StateId,
    transitions: HashMap<(StateId, Option<Σ>), Targets>,
}

impl<Σ: Eq + Hash + Copy> NfaBuilder<Σ> {
    /// Creates a builder with no states.
    pub fn new() -> Self {
        Self {
            num_states: 0,
            transitions: HashMap::new(),
        }
    }

    /// Mints a new state id, ids are handed out in increasing order starting at 1.
    pub fn fresh_state(&mut self) -> StateId {
        self.num_states += 1;
        self.num_states
    }

    /// Mints `N` consecutive state ids.
    pub fn fresh_states<const N: usize>(&mut self) -> [StateId; N] {
        std::array::from_fn(|_| self.fresh_state())
    }

    /// Number of states minted so far.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Adds `to` to the targets of `from` on `label`. Adding the same transition twice is a no-op.
    pub fn add_transition(&mut self, from: StateId, label: Option<Σ>, to: StateId) {
        let targets = self.transitions.entry((from, label)).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    /// Adds an epsilon transition from `from` to `to`.
    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.add_transition(from, None, to);
    }

    /// Finishes construction. The alphabet is deduplicated, keeping the first occurrence of each
    /// symbol so the order the caller picked is the order the determinizer walks.
    pub fn build(
        self,
        start: StateId,
        accept: impl IntoIterator<Item = StateId>,
        alphabet: impl IntoIterator<Item = Σ>,
    ) -> Nfa<Σ> {
        let mut seen = HashSet::new();
        let alphabet = alphabet
            .into_iter()
            .filter(|symbol| seen.insert(*symbol))
            .collect();

        Nfa {
            start,
            accept: accept.into_iter().collect(),
            num_states: self.num_states,
            alphabet,
            transitions: self.transitions,
        }
    }
}

impl<Σ: Eq + Hash + Copy> Default for NfaBuilder<Σ> {
    fn default() -> Self {
        Self::new()
    }
}

// MARK: NFA
/// A non-deterministic finite automaton with epsilon transitions.
///
/// Immutable once built. The alphabet never contains epsilon, which only exists as the `None`
/// label inside the transition relation.
#[derive(Debug, Clone)]
pub struct Nfa<Σ: Eq + Hash + Copy> {
    start: StateId,
    accept: HashSet<StateId>,
    num_states: StateId,
    alphabet: Vec<Σ>,
    transitions: HashMap<(StateId, Option<Σ>), Targets>,
}

impl<Σ: Eq + Hash + Copy> Nfa<Σ> {
    /// The start state.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Returns if `state` is an accepting state.
    pub fn is_accept(&self, state: StateId) -> bool {
        self.accept.contains(&state)
    }

    /// Total number of states, ids run from 1 to this value inclusive.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// The input symbols of the automaton.
    pub fn alphabet(&self) -> &[Σ] {
        &self.alphabet
    }

    /// Destinations of `state` on `label` (`None` for epsilon), empty if there are none.
    pub fn targets(&self, state: StateId, label: Option<Σ>) -> &[StateId] {
        self.transitions
            .get(&(state, label))
            .map(|targets| targets.as_slice())
            .unwrap_or(&[])
    }

    /// Every state reachable from `states` through epsilon transitions only, the given states
    /// included. Runs to a fixed point, so chains of any length are followed.
    pub fn epsilon_closure(&self, states: impl IntoIterator<Item = StateId>) -> StateSet {
        let mut closure = HashSet::new();
        let mut pending: SmallVec<[StateId; 16]> = SmallVec::new();

        for state in states {
            if closure.insert(state) {
                pending.push(state);
            }
        }

        while let Some(state) = pending.pop() {
            for &next in self.targets(state, None) {
                if closure.insert(next) {
                    pending.push(next);
                }
            }
        }

        StateSet::from_states(closure)
    }

    /// Simulates the NFA on the given input by tracking the set of live states, returning if the
    /// NFA accepts the input. Symbols outside the alphabet simply lead nowhere.
    pub fn simulate_iter(&self, input: impl IntoIterator<Item = Σ>) -> bool {
        let mut current = self.epsilon_closure([self.start]);

        for symbol in input {
            if current.is_dead() {
                return false;
            }
            let moved = current
                .iter()
                .flat_map(|state| self.targets(state, Some(symbol)).iter().copied());
            current = self.epsilon_closure(moved);
        }

        current.iter().any(|state| self.is_accept(state))
    }

    /// Simulates the NFA on the given input, returning if the NFA accepts the input.
    pub fn simulate_slice(&self, input: &[Σ]) -> bool {
        self.simulate_iter(input.iter().copied())
    }

    /// Determinizes with the default [`SubsetConfig`].
    pub fn to_dfa(&self) -> Dfa<Σ> {
        determinize(self, &SubsetConfig::default())
    }
}
