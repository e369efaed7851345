//! Reserved pattern characters and the alphabet patterns are written over.

use std::collections::BTreeSet;

use crate::error::InvalidExpression;

/// Union operator.
pub const UNION: char = '|';
/// Kleene star, postfix.
pub const STAR: char = '*';
/// Opens a group.
pub const OPEN: char = '(';
/// Closes a group.
pub const CLOSE: char = ')';

/// The configurable markers of the pattern language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
    /// Stands for the empty string inside a pattern. Never an input symbol.
    pub epsilon: char,
    /// A pattern consisting of only this character denotes the empty language.
    pub empty_language: char,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            epsilon: 'e',
            empty_language: 'N',
        }
    }
}

impl Syntax {
    /// Checks that the markers can be told apart from the operators, the parentheses and each
    /// other. Whitespace is stripped from patterns, so it is not a usable marker either.
    pub fn check(&self) -> Result<(), InvalidExpression> {
        for marker in [self.epsilon, self.empty_language] {
            if is_operator(marker) || is_paren(marker) || marker.is_whitespace() {
                return Err(InvalidExpression::InvalidMarker(marker));
            }
        }
        if self.epsilon == self.empty_language {
            return Err(InvalidExpression::InvalidMarker(self.epsilon));
        }
        Ok(())
    }

    /// Characters that can never be alphabet symbols.
    pub fn is_reserved(&self, c: char) -> bool {
        c == self.epsilon || is_operator(c) || is_paren(c)
    }
}

/// `|` or `*`.
pub fn is_operator(c: char) -> bool {
    c == UNION || c == STAR
}

/// `(` or `)`.
pub fn is_paren(c: char) -> bool {
    c == OPEN || c == CLOSE
}

/// The input symbols a pattern is written over, kept sorted so every compile of the same
/// alphabet walks the symbols in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: BTreeSet<char>,
}

impl Alphabet {
    /// Collects the symbols, rejecting any that the syntax reserves. Fails first if the syntax
    /// itself is unusable.
    pub fn new(
        symbols: impl IntoIterator<Item = char>,
        syntax: &Syntax,
    ) -> Result<Self, InvalidExpression> {
        syntax.check()?;
        let symbols: BTreeSet<char> = symbols.into_iter().collect();
        if let Some(&reserved) = symbols.iter().find(|&&c| syntax.is_reserved(c)) {
            return Err(InvalidExpression::ReservedSymbol(reserved));
        }
        Ok(Self { symbols })
    }

    /// Returns if `c` is one of the symbols.
    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    /// The symbols in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns if there are no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_alphabet_sorted_and_deduplicated() {
        let alphabet = Alphabet::new("cabca".chars(), &Syntax::default()).unwrap();
        assert_eq!(alphabet.iter().collect::<String>(), "abc");
        assert_eq!(alphabet.len(), 3);
        assert!(alphabet.contains('b'));
        assert!(!alphabet.contains('d'));
    }

    #[test]
    fn test_reserved_symbols_rejected() {
        let syntax = Syntax::default();
        for reserved in ['e', '|', '*', '(', ')'] {
            assert_eq!(
                Alphabet::new(['a', reserved], &syntax),
                Err(InvalidExpression::ReservedSymbol(reserved))
            );
        }
        // the sentinel only means something as a whole pattern
        assert!(Alphabet::new(['N'], &syntax).is_ok());
    }

    #[test]
    fn test_custom_epsilon() {
        let syntax = Syntax {
            epsilon: '_',
            ..Syntax::default()
        };
        assert!(Alphabet::new(['e'], &syntax).is_ok());
        assert_eq!(
            Alphabet::new(['_'], &syntax),
            Err(InvalidExpression::ReservedSymbol('_'))
        );
    }

    #[test]
    fn test_markers_must_be_distinct() {
        assert_eq!(Syntax::default().check(), Ok(()));
        for marker in ['|', '*', '(', ')', ' '] {
            let epsilon = Syntax {
                epsilon: marker,
                ..Syntax::default()
            };
            assert_eq!(epsilon.check(), Err(InvalidExpression::InvalidMarker(marker)));
            assert_eq!(
                Alphabet::new(['a'], &epsilon),
                Err(InvalidExpression::InvalidMarker(marker))
            );

            let empty_language = Syntax {
                empty_language: marker,
                ..Syntax::default()
            };
            assert_eq!(empty_language.check(), Err(InvalidExpression::InvalidMarker(marker)));
        }

        let same = Syntax {
            epsilon: 'x',
            empty_language: 'x',
        };
        assert_eq!(same.check(), Err(InvalidExpression::InvalidMarker('x')));
    }
}
