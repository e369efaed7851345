//! Two stack operator precedence parsing of a validated pattern.
//!
//! Precedence from high to low: `*`, concatenation, `|`. Concatenation has no token of its own,
//! it is pushed whenever two adjacent characters denote sequencing.

use log::trace;
use smallvec::SmallVec;

use crate::ast::SyntaxTree;
use crate::error::InvalidExpression;
use crate::syntax::{Alphabet, CLOSE, OPEN, STAR, Syntax, UNION};
use crate::validate::Pattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Open,
    Union,
    Concat,
    Star,
}

/// Builds the syntax tree of a pattern returned by [`crate::validate::validate`].
pub fn build_tree(
    alphabet: &Alphabet,
    syntax: &Syntax,
    pattern: &Pattern,
) -> Result<SyntaxTree, InvalidExpression> {
    match pattern {
        Pattern::EmptyLanguage => Ok(SyntaxTree::Empty),
        Pattern::Expression(symbols) => TreeBuilder::new(alphabet, syntax).run(symbols),
    }
}

struct TreeBuilder<'a> {
    alphabet: &'a Alphabet,
    syntax: &'a Syntax,
    operands: Vec<SyntaxTree>,
    operators: SmallVec<[Operator; 16]>,
}

impl<'a> TreeBuilder<'a> {
    fn new(alphabet: &'a Alphabet, syntax: &'a Syntax) -> Self {
        Self {
            alphabet,
            syntax,
            operands: Vec::new(),
            operators: SmallVec::new(),
        }
    }

    fn run(mut self, symbols: &[char]) -> Result<SyntaxTree, InvalidExpression> {
        let mut prev = None;

        for &c in symbols {
            if self.implies_concat(prev, c) {
                while matches!(self.operators.last(), Some(Operator::Star | Operator::Concat)) {
                    self.reduce()?;
                }
                self.operators.push(Operator::Concat);
            }

            match c {
                OPEN => self.operators.push(Operator::Open),
                STAR => {
                    if self.operators.last() == Some(&Operator::Star) {
                        self.reduce()?;
                        self.operators.push(Operator::Star);
                    } else {
                        let operand = self.pop_operand()?;
                        self.operands.push(SyntaxTree::star(operand));
                    }
                }
                UNION => {
                    while matches!(self.operators.last(), Some(op) if *op != Operator::Open) {
                        self.reduce()?;
                    }
                    self.operators.push(Operator::Union);
                }
                CLOSE => loop {
                    match self.operators.last() {
                        Some(Operator::Open) => {
                            self.operators.pop();
                            break;
                        }
                        Some(_) => self.reduce()?,
                        None => return Err(InvalidExpression::UnbalancedParentheses),
                    }
                },
                _ => {
                    let leaf = self.leaf(c);
                    self.operands.push(leaf);
                }
            }

            prev = Some(c);
        }

        while !self.operators.is_empty() {
            self.reduce()?;
        }

        let root = self.pop_operand()?;
        debug_assert!(self.operands.is_empty(), "operands left over: {:?}", self.operands);
        Ok(root)
    }

    fn is_symbol(&self, c: char) -> bool {
        self.alphabet.contains(c) || c == self.syntax.epsilon
    }

    /// Sequencing is implied between a symbol, `*` or `)` and a following symbol or `(`.
    fn implies_concat(&self, prev: Option<char>, cur: char) -> bool {
        let Some(prev) = prev else {
            return false;
        };
        let ends_operand = self.is_symbol(prev) || prev == STAR || prev == CLOSE;
        ends_operand && (self.is_symbol(cur) || cur == OPEN)
    }

    fn leaf(&self, c: char) -> SyntaxTree {
        if c == self.syntax.epsilon {
            SyntaxTree::epsilon()
        } else {
            SyntaxTree::symbol(c)
        }
    }

    fn pop_operand(&mut self) -> Result<SyntaxTree, InvalidExpression> {
        self.operands.pop().ok_or(InvalidExpression::MissingOperand)
    }

    /// Pops the top operator and folds it, with its operands, into a new operand.
    fn reduce(&mut self) -> Result<(), InvalidExpression> {
        let operator = self.operators.pop().ok_or(InvalidExpression::MissingOperand)?;
        trace!("reducing {operator:?}, {} operands on the stack", self.operands.len());

        let node = match operator {
            Operator::Star => SyntaxTree::star(self.pop_operand()?),
            Operator::Concat => {
                let right = self.pop_operand()?;
                SyntaxTree::concat(self.pop_operand()?, right)
            }
            Operator::Union => {
                let right = self.pop_operand()?;
                SyntaxTree::union(self.pop_operand()?, right)
            }
            Operator::Open => return Err(InvalidExpression::UnbalancedParentheses),
        };

        self.operands.push(node);
        Ok(())
    }
}
