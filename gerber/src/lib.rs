#![warn(missing_docs)]

//! Finite state automata over an arbitrary symbol type `Σ`.
//!
//! NFAs are assembled through an [`NfaBuilder`], which hands out fresh integer state ids, so
//! construction code never shares a hidden counter. [`determinize`] turns an [`Nfa`] into a total
//! [`Dfa`] by subset construction, each DFA state being identified by its canonical [`StateSet`].
//! A finished [`Dfa`] is immutable and can be simulated from as many threads as needed.

pub mod dfa;
pub mod nfa;
pub mod subset;

pub use dfa::{Dfa, DfaStateId, StateSet, UnknownSymbol};
pub use nfa::{DEAD_STATE, Nfa, NfaBuilder, StateId};
pub use subset::{SubsetConfig, determinize};
