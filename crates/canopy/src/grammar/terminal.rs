use crate::grammar::expr::ExprId;
use crate::grammar::extension::NodeType;
use crate::parser::{FailureInfo, ParseOutcome};
use crate::syntax::{SyntaxNode, TextRange, TextSize};
use compact_str::CompactString;
use std::sync::Arc;

/// Leaf expression matching a fixed literal at an index.
///
/// Matching is case-sensitive and byte-exact; there are no partial matches.
/// A literal that would extend past the end of the input fails like any
/// other mismatch.
#[derive(Debug)]
pub struct TerminalSymbol {
    id: ExprId,
    literal: CompactString,
    node_type: Arc<NodeType>,
}

impl TerminalSymbol {
    #[must_use]
    pub fn new(literal: impl Into<CompactString>) -> Self {
        Self {
            id: ExprId::next(),
            literal: literal.into(),
            node_type: Arc::new(NodeType::default()),
        }
    }

    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub(crate) const fn id(&self) -> ExprId {
        self.id
    }

    pub(crate) const fn node_type(&self) -> &Arc<NodeType> {
        &self.node_type
    }

    pub(crate) fn evaluate(&self, input: &str, index: usize) -> ParseOutcome {
        let end = index + self.literal.len();
        // `get` turns out-of-range and non-boundary slices into plain failures.
        match input.get(index..end) {
            Some(slice) if slice == self.literal => {
                let span = TextRange::new(TextSize::from_usize(index), TextSize::from_usize(end));
                ParseOutcome::Success(Arc::new(SyntaxNode::leaf(
                    span,
                    self.literal.clone(),
                    Arc::clone(&self.node_type),
                )))
            }
            _ => ParseOutcome::Failure(FailureInfo::at(index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_literal_at_index() {
        let terminal = TerminalSymbol::new("foo");
        let outcome = terminal.evaluate("xxfooyy", 2);

        let node = outcome.node().expect("should match");
        assert_eq!(node.span(), TextRange::new(TextSize::from(2), TextSize::from(5)));
        assert_eq!(node.text(), "foo");
        assert!(node.is_leaf());
    }

    #[test]
    fn test_fails_on_mismatch() {
        let terminal = TerminalSymbol::new("foo");
        let outcome = terminal.evaluate("xxfob", 2);

        let failure = outcome.failure().expect("should fail");
        assert_eq!(failure.index(), 2);
        assert!(failure.paths().is_empty());
    }

    #[test]
    fn test_fails_past_end_of_input_without_panicking() {
        let terminal = TerminalSymbol::new("foo");
        let outcome = terminal.evaluate("fo", 0);
        assert!(outcome.is_failure());

        let outcome = terminal.evaluate("foo", 1);
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_fails_on_non_char_boundary() {
        let terminal = TerminalSymbol::new("é");
        // Index 1 falls inside the two-byte encoding of 'é'.
        assert!(terminal.evaluate("é", 1).is_failure());
        assert!(terminal.evaluate("é", 0).is_success());
    }

    #[test]
    fn test_empty_literal_matches_empty_span() {
        let terminal = TerminalSymbol::new("");
        let outcome = terminal.evaluate("abc", 1);
        let node = outcome.node().expect("should match");
        assert_eq!(node.span(), TextRange::new(TextSize::from(1), TextSize::from(1)));
        assert_eq!(node.text(), "");
    }
}
