//! Well-formedness checks, run before any parsing.

use crate::error::InvalidExpression;
use crate::syntax::{Alphabet, CLOSE, OPEN, STAR, Syntax, UNION, is_operator, is_paren};

/// A pattern that passed validation, whitespace already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// The empty language sentinel.
    EmptyLanguage,
    /// Any other well formed expression.
    Expression(Vec<char>),
}

/// Checks `raw` against `alphabet`. Whitespace is ignored. Checks run as separate passes, so when
/// a pattern has several problems the reported one is the first in this list:
/// leading operator, invalid character, unbalanced parentheses, operator sequence.
pub fn validate(
    alphabet: &Alphabet,
    syntax: &Syntax,
    raw: &str,
) -> Result<Pattern, InvalidExpression> {
    syntax.check()?;
    let symbols: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if symbols == [syntax.empty_language] {
        return Ok(Pattern::EmptyLanguage);
    }

    match symbols.first() {
        None => return Err(InvalidExpression::EmptyPattern),
        Some(&first) if is_operator(first) => return Err(InvalidExpression::LeadingOperator),
        Some(_) => {}
    }

    let is_known =
        |c: char| alphabet.contains(c) || c == syntax.epsilon || is_operator(c) || is_paren(c);
    if let Some(&invalid) = symbols.iter().find(|&&c| !is_known(c)) {
        return Err(InvalidExpression::InvalidCharacter(invalid));
    }

    check_parentheses(&symbols)?;
    check_operator_sequences(&symbols)?;

    Ok(Pattern::Expression(symbols))
}

fn check_parentheses(symbols: &[char]) -> Result<(), InvalidExpression> {
    let mut depth = 0usize;
    for &c in symbols {
        match c {
            OPEN => depth += 1,
            CLOSE => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(InvalidExpression::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(InvalidExpression::UnbalancedParentheses)
    }
}

fn check_operator_sequences(symbols: &[char]) -> Result<(), InvalidExpression> {
    for pair in symbols.windows(2) {
        match (pair[0], pair[1]) {
            (UNION, UNION | STAR | CLOSE) | (STAR, STAR) => {
                return Err(InvalidExpression::InvalidOperatorSequence);
            }
            (OPEN, UNION | STAR) => return Err(InvalidExpression::LeadingOperator),
            (OPEN, CLOSE) => return Err(InvalidExpression::EmptyGroup),
            _ => {}
        }
    }

    if symbols.last() == Some(&UNION) {
        return Err(InvalidExpression::InvalidOperatorSequence);
    }
    Ok(())
}
