use std::fmt;
use std::mem;

/// A node of the pattern's syntax tree. Every node owns its children outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxTree {
    /// A single alphabet symbol, `None` for the epsilon literal.
    Literal(Option<char>),
    /// Left then right.
    Concat(Box<SyntaxTree>, Box<SyntaxTree>),
    /// Left or right.
    Union(Box<SyntaxTree>, Box<SyntaxTree>),
    /// Zero or more repetitions.
    Star(Box<SyntaxTree>),
    /// The empty language, only ever the root.
    Empty,
}

impl SyntaxTree {
    /// A literal matching exactly `c`.
    pub fn symbol(c: char) -> Self {
        Self::Literal(Some(c))
    }

    /// A literal matching the empty string.
    pub fn epsilon() -> Self {
        Self::Literal(None)
    }

    /// `left` followed by `right`.
    pub fn concat(left: SyntaxTree, right: SyntaxTree) -> Self {
        Self::Concat(Box::new(left), Box::new(right))
    }

    /// Either `left` or `right`.
    pub fn union(left: SyntaxTree, right: SyntaxTree) -> Self {
        Self::Union(Box::new(left), Box::new(right))
    }

    /// Any number of repetitions of `inner`, including none.
    pub fn star(inner: SyntaxTree) -> Self {
        Self::Star(Box::new(inner))
    }

    /// Moves the children out, leaving [`SyntaxTree::Empty`] in their slots. The operator
    /// itself is kept, so callers can still match on the node afterwards.
    pub(crate) fn take_children(&mut self) -> (Option<SyntaxTree>, Option<SyntaxTree>) {
        let take = |slot: &mut Box<SyntaxTree>| mem::replace(&mut **slot, SyntaxTree::Empty);
        match self {
            SyntaxTree::Concat(left, right) | SyntaxTree::Union(left, right) => {
                (Some(take(left)), Some(take(right)))
            }
            SyntaxTree::Star(inner) => (Some(take(inner)), None),
            SyntaxTree::Literal(_) | SyntaxTree::Empty => (None, None),
        }
    }

    fn is_leaf(&self) -> bool {
        matches!(self, SyntaxTree::Literal(_) | SyntaxTree::Empty)
    }
}

// The derived drop glue recurses once per level, which overflows on long patterns.
impl Drop for SyntaxTree {
    fn drop(&mut self) {
        if self.is_leaf() {
            return;
        }
        let mut pending = Vec::new();
        let (first, second) = self.take_children();
        pending.extend(first.into_iter().chain(second).filter(|node| !node.is_leaf()));
        while let Some(mut node) = pending.pop() {
            let (first, second) = node.take_children();
            pending.extend(first.into_iter().chain(second).filter(|node| !node.is_leaf()));
        }
    }
}

/// Fully parenthesized, `ε` for epsilon and `∅` for the empty language.
impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxTree::Literal(Some(c)) => write!(f, "{c}"),
            SyntaxTree::Literal(None) => write!(f, "ε"),
            SyntaxTree::Concat(left, right) => write!(f, "({left}{right})"),
            SyntaxTree::Union(left, right) => write!(f, "({left}|{right})"),
            SyntaxTree::Star(inner) => write!(f, "{inner}*"),
            SyntaxTree::Empty => write!(f, "∅"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_take_children_keeps_operator() {
        let mut tree = SyntaxTree::union(SyntaxTree::symbol('a'), SyntaxTree::epsilon());
        let (left, right) = tree.take_children();
        assert_eq!(left, Some(SyntaxTree::symbol('a')));
        assert_eq!(right, Some(SyntaxTree::epsilon()));
        assert_eq!(tree.to_string(), "(∅|∅)");

        let mut leaf = SyntaxTree::symbol('b');
        assert_eq!(leaf.take_children(), (None, None));
        assert_eq!(leaf, SyntaxTree::symbol('b'));
    }

    #[test]
    fn test_deep_tree_drops() {
        let mut tree = SyntaxTree::symbol('a');
        for _ in 0..200_000 {
            tree = SyntaxTree::star(SyntaxTree::concat(tree, SyntaxTree::symbol('a')));
        }
        drop(tree);
    }
}
