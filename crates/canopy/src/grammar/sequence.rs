use crate::error::GrammarError;
use crate::grammar::expr::{Expr, ExprId};
use crate::grammar::extension::NodeType;
use crate::parser::{FailureInfo, ParseOutcome, Parser};
use crate::syntax::{SyntaxNode, TextRange, TextSize};
use compact_str::CompactString;
use std::sync::Arc;

/// Composite expression matching its children back-to-back, in order.
///
/// A sequence succeeds only when every child matches contiguously, each
/// starting where the previous one ended. The first failing child aborts the
/// whole sequence; later children are never attempted. A sequence of one
/// child still produces a sequence node wrapping a single element rather
/// than collapsing to the child's own node.
#[derive(Debug)]
pub struct Sequence {
    id: ExprId,
    children: Vec<Expr>,
    node_type: Arc<NodeType>,
}

impl Sequence {
    /// Build a sequence from an ordered, non-empty list of children.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptySequence`] when `children` is empty.
    pub fn new(children: Vec<Expr>) -> Result<Self, GrammarError> {
        if children.is_empty() {
            return Err(GrammarError::EmptySequence);
        }
        Ok(Self {
            id: ExprId::next(),
            children,
            node_type: Arc::new(NodeType::default()),
        })
    }

    #[must_use]
    pub fn children(&self) -> &[Expr] {
        &self.children
    }

    pub(crate) const fn id(&self) -> ExprId {
        self.id
    }

    pub(crate) const fn node_type(&self) -> &Arc<NodeType> {
        &self.node_type
    }

    pub(crate) fn evaluate(&self, index: usize, parser: &mut Parser<'_>) -> ParseOutcome {
        let mut cursor = index;
        let mut elements = Vec::with_capacity(self.children.len());

        // Children evaluate strictly left-to-right, always through the
        // parser so every step hits the memoization cache.
        for (ordinal, child) in self.children.iter().enumerate() {
            match parser.evaluate_expression_at(child, cursor) {
                ParseOutcome::Success(node) => {
                    cursor = node.span().end().as_usize();
                    elements.push(node);
                }
                ParseOutcome::Failure(failure) => {
                    return ParseOutcome::Failure(FailureInfo::in_child(ordinal, failure));
                }
            }
        }

        let span = TextRange::new(TextSize::from_usize(index), TextSize::from_usize(cursor));
        let text: CompactString = parser.input().get(index..cursor).unwrap_or_default().into();
        ParseOutcome::Success(Arc::new(SyntaxNode::composite(
            span,
            text,
            elements,
            Arc::clone(&self.node_type),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_child_list() {
        let err = Sequence::new(Vec::new()).unwrap_err();
        assert!(matches!(err, GrammarError::EmptySequence));
    }

    #[test]
    fn test_single_child_still_wraps() {
        let sequence = Sequence::new(vec![Expr::terminal("foo")]).unwrap();
        let mut parser = Parser::new("foo");
        let outcome = sequence.evaluate(0, &mut parser);

        let node = outcome.node().expect("should match");
        assert!(!node.is_leaf(), "one-child sequence must not collapse");
        assert_eq!(node.elements().len(), 1);
        assert_eq!(node.elements()[0].text(), "foo");
    }

    #[test]
    fn test_children_accessor_preserves_order() {
        let sequence =
            Sequence::new(vec![Expr::terminal("a"), Expr::terminal("b")]).unwrap();
        let rendered: Vec<_> = sequence.children().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["\"a\"", "\"b\""]);
    }
}
