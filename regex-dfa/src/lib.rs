//! Regular expressions over a finite alphabet, compiled to a DFA.
//!
//! The pipeline runs validation, then two stack parsing into a [`SyntaxTree`], then Thompson
//! construction into an epsilon NFA, then subset construction into a total [`Dfa`]. Patterns
//! support union `|`, implicit concatenation, Kleene star `*`, grouping, the epsilon literal
//! (`e` by default) and the empty language sentinel (`N` by default).
//!
//! ```
//! let dfa = regex_dfa::compile(['a', 'b'], "a*b").unwrap();
//! assert_eq!(dfa.simulate("aab".chars()), Ok(true));
//! assert_eq!(dfa.simulate("ba".chars()), Ok(false));
//! ```

pub mod ast;
mod error;
mod parser;
pub mod syntax;
mod thompson;
mod validate;

pub use ast::SyntaxTree;
pub use error::{InvalidExpression, UnknownSymbol};
pub use gerber::{Dfa, Nfa, SubsetConfig};
pub use syntax::{Alphabet, Syntax};

use log::debug;

/// Compiles patterns with a chosen [`Syntax`] and [`SubsetConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compiler {
    syntax: Syntax,
    subset: SubsetConfig,
}

impl Compiler {
    /// A compiler with the default markers and subset construction settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the reserved pattern markers. They are checked with [`Syntax::check`] when a
    /// pattern is compiled.
    pub fn syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Replaces the subset construction settings.
    pub fn subset_config(mut self, subset: SubsetConfig) -> Self {
        self.subset = subset;
        self
    }

    /// Validates `pattern` and builds its syntax tree.
    pub fn parse(
        &self,
        alphabet: &Alphabet,
        pattern: &str,
    ) -> Result<SyntaxTree, InvalidExpression> {
        let pattern = validate::validate(alphabet, &self.syntax, pattern)?;
        parser::build_tree(alphabet, &self.syntax, &pattern)
    }

    /// Compiles `pattern` as far as the epsilon NFA.
    pub fn compile_nfa(
        &self,
        alphabet: impl IntoIterator<Item = char>,
        pattern: &str,
    ) -> Result<Nfa<char>, InvalidExpression> {
        let alphabet = Alphabet::new(alphabet, &self.syntax)?;
        let tree = self.parse(&alphabet, pattern)?;
        Ok(thompson::build_nfa(tree, &alphabet))
    }

    /// Compiles `pattern` into a DFA deciding membership in its language.
    pub fn compile(
        &self,
        alphabet: impl IntoIterator<Item = char>,
        pattern: &str,
    ) -> Result<Dfa<char>, InvalidExpression> {
        debug!("compiling pattern {pattern:?}");
        let nfa = self.compile_nfa(alphabet, pattern)?;
        Ok(gerber::determinize(&nfa, &self.subset))
    }
}

/// Compiles `pattern` over `alphabet` with the default [`Compiler`].
pub fn compile(
    alphabet: impl IntoIterator<Item = char>,
    pattern: &str,
) -> Result<Dfa<char>, InvalidExpression> {
    Compiler::default().compile(alphabet, pattern)
}

/// A compiled pattern, keeping its source text next to the DFA.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    dfa: Dfa<char>,
}

impl Regex {
    /// Compiles `pattern` over `alphabet` with the default [`Compiler`].
    pub fn new(
        alphabet: impl IntoIterator<Item = char>,
        pattern: &str,
    ) -> Result<Self, InvalidExpression> {
        Ok(Self {
            pattern: pattern.to_owned(),
            dfa: compile(alphabet, pattern)?,
        })
    }

    /// Returns if the whole of `input` is in the language of the pattern.
    pub fn is_match(&self, input: &str) -> Result<bool, UnknownSymbol<char>> {
        self.dfa.simulate(input.chars())
    }

    /// The pattern as it was given.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled automaton.
    pub fn dfa(&self) -> &Dfa<char> {
        &self.dfa
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_regex_wrapper() {
        let regex = Regex::new(['a', 'b'], "(a|b)*abb").unwrap();
        assert_eq!(regex.pattern(), "(a|b)*abb");
        assert_eq!(regex.is_match("babb"), Ok(true));
        assert_eq!(regex.is_match("abba"), Ok(false));
        assert!(regex.is_match("abc").is_err());
    }

    #[test]
    fn test_compiler_custom_syntax() {
        let compiler = Compiler::new().syntax(Syntax {
            epsilon: '_',
            empty_language: '!',
        });
        let dfa = compiler.compile(['e', 'N'], "e(N|_)").unwrap();
        assert_eq!(dfa.simulate("e".chars()), Ok(true));
        assert_eq!(dfa.simulate("eN".chars()), Ok(true));
        assert_eq!(dfa.simulate("N".chars()), Ok(false));

        let empty = compiler.compile(['e'], "!").unwrap();
        assert_eq!(empty.simulate("".chars()), Ok(false));
    }

    #[test]
    fn test_compiler_rejects_clashing_markers() {
        let star_epsilon = Compiler::new().syntax(Syntax {
            epsilon: '*',
            ..Syntax::default()
        });
        assert_eq!(
            star_epsilon.compile(['a'], "a*").unwrap_err(),
            InvalidExpression::InvalidMarker('*')
        );

        let union_epsilon = Compiler::new().syntax(Syntax {
            epsilon: '|',
            ..Syntax::default()
        });
        assert_eq!(
            union_epsilon.compile(['a', 'b'], "a|b").unwrap_err(),
            InvalidExpression::InvalidMarker('|')
        );

        // `parse` takes an alphabet built elsewhere, it checks the markers on its own
        let alphabet = Alphabet::new(['a'], &Syntax::default()).unwrap();
        let open_sentinel = Compiler::new().syntax(Syntax {
            empty_language: '(',
            ..Syntax::default()
        });
        assert_eq!(
            open_sentinel.parse(&alphabet, "a").unwrap_err(),
            InvalidExpression::InvalidMarker('(')
        );
    }

    #[test]
    fn test_deep_pattern_parses_and_drops() {
        let alphabet = Alphabet::new(['a'], &Syntax::default()).unwrap();
        let tree = Compiler::new().parse(&alphabet, &"a".repeat(200_000)).unwrap();
        assert!(matches!(tree, SyntaxTree::Concat(..)));
        drop(tree);
    }

    #[test]
    fn test_seeding_does_not_change_language() {
        let reachable_only = Compiler::new().subset_config(SubsetConfig {
            seed_singletons: false,
        });
        let seeded = compile(['a', 'b'], "(a|b)*a(a|b)").unwrap();
        let lean = reachable_only.compile(['a', 'b'], "(a|b)*a(a|b)").unwrap();

        assert!(lean.num_states() <= seeded.num_states());
        for input in ["", "a", "aa", "ab", "ba", "bab", "abbb", "bbaa"] {
            assert_eq!(
                lean.simulate(input.chars()),
                seeded.simulate(input.chars()),
                "input {input:?}"
            );
        }
    }
}
