use crate::grammar::extension::{MethodValue, NodeType};
use crate::syntax::TextRange;
use compact_str::CompactString;
use std::sync::Arc;

/// Immutable record of a successful match.
///
/// A node remembers the half-open byte span it consumed, the matched text,
/// and, for composite expressions, one child node per child expression in
/// grammar order. Nodes are shared via [`Arc`]: the memoization cache and an
/// enclosing tree may both hold the same node, so a node lives as long as its
/// longest holder.
///
/// Every node is bound to the [`NodeType`] descriptor of the expression that
/// produced it, which carries the named behaviors registered on that
/// expression (see [`Expr::extend_node_type`](crate::grammar::Expr::extend_node_type)).
#[derive(Debug)]
pub struct SyntaxNode {
    span: TextRange,
    text: CompactString,
    elements: Vec<Arc<SyntaxNode>>,
    node_type: Arc<NodeType>,
}

impl SyntaxNode {
    /// Node for a leaf match with no sub-structure.
    pub(crate) fn leaf(span: TextRange, text: CompactString, node_type: Arc<NodeType>) -> Self {
        Self {
            span,
            text,
            elements: Vec::new(),
            node_type,
        }
    }

    /// Node for a composite match, one element per child expression.
    pub(crate) fn composite(
        span: TextRange,
        text: CompactString,
        elements: Vec<Arc<SyntaxNode>>,
        node_type: Arc<NodeType>,
    ) -> Self {
        Self {
            span,
            text,
            elements,
            node_type,
        }
    }

    /// The half-open byte range this node consumed.
    #[must_use]
    pub const fn span(&self) -> TextRange {
        self.span
    }

    /// The matched substring.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child nodes in grammar order. Empty for leaf matches.
    #[must_use]
    pub fn elements(&self) -> &[Arc<SyntaxNode>] {
        &self.elements
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether a named behavior is registered on this node's type.
    #[must_use]
    pub fn responds_to(&self, name: &str) -> bool {
        self.node_type.has_method(name)
    }

    /// Run a registered behavior against this node.
    ///
    /// Returns `None` when no behavior with that name has been registered.
    #[must_use]
    pub fn invoke(&self, name: &str) -> Option<MethodValue> {
        self.node_type.method(name).map(|method| method(self))
    }
}

// Structural equality: two nodes are equal when they matched the same span
// with the same text and sub-structure. The node type descriptor is identity
// of the producing expression and does not participate.
impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span && self.text == other.text && self.elements == other.elements
    }
}

impl Eq for SyntaxNode {}
