//! Thompson construction: syntax tree -> epsilon NFA.

use gerber::{Nfa, NfaBuilder, StateId};
use log::debug;

use crate::ast::SyntaxTree;
use crate::syntax::Alphabet;

/// Compiles `tree` into an NFA with a single start state `1` and a single accept state `2`.
///
/// Each node is wired between an entry and an exit state handed down by its parent, minting the
/// states it needs on the way. Nodes are taken off an explicit work stack, left child before
/// right child, so deep trees do not grow the call stack and ids come out in depth first order.
pub fn build_nfa(tree: SyntaxTree, alphabet: &Alphabet) -> Nfa<char> {
    let mut builder = NfaBuilder::new();
    let [start, accept] = builder.fresh_states();

    let mut pending: Vec<(SyntaxTree, StateId, StateId)> = vec![(tree, start, accept)];
    while let Some((mut node, entry, exit)) = pending.pop() {
        let children = node.take_children();
        match (&node, children) {
            (SyntaxTree::Literal(label), _) => builder.add_transition(entry, *label, exit),
            (SyntaxTree::Concat(..), (Some(left), Some(right))) => {
                let middle = builder.fresh_state();
                pending.push((right, middle, exit));
                pending.push((left, entry, middle));
            }
            (SyntaxTree::Union(..), (Some(left), Some(right))) => {
                let [left_start, left_end, right_start, right_end] = builder.fresh_states();
                builder.add_epsilon(entry, left_start);
                builder.add_epsilon(entry, right_start);
                builder.add_epsilon(left_end, exit);
                builder.add_epsilon(right_end, exit);
                pending.push((right, right_start, right_end));
                pending.push((left, left_start, left_end));
            }
            (SyntaxTree::Star(_), (Some(inner), None)) => {
                let [loop_start, loop_end] = builder.fresh_states();
                builder.add_epsilon(entry, loop_start);
                builder.add_epsilon(loop_end, loop_start);
                builder.add_epsilon(entry, exit);
                builder.add_epsilon(loop_end, exit);
                pending.push((inner, loop_start, loop_end));
            }
            // the empty language: no path from start to accept at all
            _ => {}
        }
    }

    debug!("thompson construction: {} NFA states", builder.num_states());
    builder.build(start, [accept], alphabet.iter())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::syntax::Syntax;
    use pretty_assertions::assert_eq;

    fn alphabet() -> Alphabet {
        Alphabet::new(['a', 'b'], &Syntax::default()).unwrap()
    }

    #[test]
    fn test_literal() {
        let nfa = build_nfa(SyntaxTree::symbol('a'), &alphabet());
        assert_eq!(nfa.num_states(), 2);
        assert_eq!(nfa.start(), 1);
        assert!(nfa.is_accept(2));
        assert_eq!(nfa.targets(1, Some('a')), &[2]);
        assert_eq!(nfa.alphabet(), &['a', 'b']);
    }

    #[test]
    fn test_concat_mints_one_state() {
        let tree = SyntaxTree::concat(SyntaxTree::symbol('a'), SyntaxTree::symbol('b'));
        let nfa = build_nfa(tree, &alphabet());
        assert_eq!(nfa.num_states(), 3);
        assert_eq!(nfa.targets(1, Some('a')), &[3]);
        assert_eq!(nfa.targets(3, Some('b')), &[2]);
    }

    #[test]
    fn test_union_wiring() {
        let tree = SyntaxTree::union(SyntaxTree::symbol('a'), SyntaxTree::symbol('b'));
        let nfa = build_nfa(tree, &alphabet());
        assert_eq!(nfa.num_states(), 6);
        assert_eq!(nfa.targets(1, None), &[3, 5]);
        assert_eq!(nfa.targets(3, Some('a')), &[4]);
        assert_eq!(nfa.targets(5, Some('b')), &[6]);
        assert_eq!(nfa.targets(4, None), &[2]);
        assert_eq!(nfa.targets(6, None), &[2]);
    }

    #[test]
    fn test_star_wiring() {
        let nfa = build_nfa(SyntaxTree::star(SyntaxTree::symbol('a')), &alphabet());
        assert_eq!(nfa.num_states(), 4);
        assert_eq!(nfa.targets(1, None), &[3, 2]);
        assert_eq!(nfa.targets(4, None), &[3, 2]);
        assert_eq!(nfa.targets(3, Some('a')), &[4]);
        assert!(nfa.simulate_slice(&[]));
        assert!(nfa.simulate_slice(&['a', 'a', 'a']));
        assert!(!nfa.simulate_slice(&['b']));
    }

    #[test]
    fn test_ids_follow_depth_first_order() {
        // (a|b)b: the union's four states are minted before the concat's right side is visited
        let tree = SyntaxTree::concat(
            SyntaxTree::union(SyntaxTree::symbol('a'), SyntaxTree::symbol('b')),
            SyntaxTree::symbol('b'),
        );
        let nfa = build_nfa(tree, &alphabet());
        assert_eq!(nfa.num_states(), 7);
        assert_eq!(nfa.targets(1, None), &[4, 6]);
        assert_eq!(nfa.targets(3, Some('b')), &[2]);
    }

    #[test]
    fn test_epsilon_literal() {
        let nfa = build_nfa(SyntaxTree::epsilon(), &alphabet());
        assert_eq!(nfa.targets(1, None), &[2]);
        assert!(nfa.simulate_slice(&[]));
    }

    #[test]
    fn test_empty_language() {
        let nfa = build_nfa(SyntaxTree::Empty, &alphabet());
        assert_eq!(nfa.num_states(), 2);
        assert_eq!(nfa.targets(1, None), &[] as &[StateId]);
        assert!(!nfa.simulate_slice(&[]));
        assert!(!nfa.simulate_slice(&['a']));
    }

    #[test]
    fn test_deep_tree() {
        let mut tree = SyntaxTree::symbol('a');
        for _ in 0..100_000 {
            tree = SyntaxTree::concat(tree, SyntaxTree::symbol('a'));
        }
        let nfa = build_nfa(tree, &alphabet());
        assert_eq!(nfa.num_states(), 100_002);
    }
}
