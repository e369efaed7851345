use thiserror::Error;

pub use gerber::UnknownSymbol;

/// Why a pattern (or the alphabet it is written over) was rejected. Nothing is built for a
/// rejected pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidExpression {
    /// The pattern, or a group inside it, begins with `|` or `*`.
    #[error("expression cannot start with an operator")]
    LeadingOperator,
    /// A character that is not an alphabet symbol, epsilon, an operator or a parenthesis.
    #[error("invalid character `{0}` within expression")]
    InvalidCharacter(char),
    /// A `)` without an open group, or a group left open at the end of the pattern.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// `||`, `|*`, `|)`, `**`, or a pattern ending on `|`.
    #[error("invalid sequence of operators")]
    InvalidOperatorSequence,
    /// `()`, a group with nothing inside.
    #[error("empty group")]
    EmptyGroup,
    /// Nothing left once whitespace is stripped.
    #[error("empty expression")]
    EmptyPattern,
    /// The alphabet contains epsilon, an operator or a parenthesis.
    #[error("alphabet symbol `{0}` is reserved")]
    ReservedSymbol(char),
    /// A [`crate::Syntax`] marker is an operator, a parenthesis or whitespace, or both markers
    /// are the same character.
    #[error("syntax marker `{0}` clashes with an operator, a parenthesis or the other marker")]
    InvalidMarker(char),
    /// An operator ran out of operands while building the syntax tree.
    #[error("missing operand")]
    MissingOperand,
}
