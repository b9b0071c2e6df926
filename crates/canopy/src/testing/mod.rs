//! # Testing Utilities
//!
//! Scripted stand-in expressions for exercising composite expressions
//! without real grammars. A [`ScriptedExpr`] either consumes a fixed number
//! of bytes or always fails, and counts how many times it was evaluated, so
//! tests can assert on short-circuiting and cache behavior.

use crate::grammar::extension::NodeType;
use crate::grammar::ExprId;
use crate::parser::{FailureInfo, ParseOutcome};
use crate::syntax::{SyntaxNode, TextRange, TextSize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
enum ScriptedBehavior {
    /// Succeed, consuming exactly `len` bytes from the evaluation index.
    Match { len: usize },
    /// Fail at the evaluation index.
    Fail,
}

/// An expression with scripted behavior and an observable call count.
#[derive(Debug)]
pub struct ScriptedExpr {
    id: ExprId,
    behavior: ScriptedBehavior,
    calls: Arc<AtomicUsize>,
    node_type: Arc<NodeType>,
}

/// Shared handle onto a scripted expression's call count, usable after the
/// expression has been moved into a parent.
#[derive(Debug, Clone)]
pub struct CallCount(Arc<AtomicUsize>);

impl CallCount {
    #[must_use]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

impl ScriptedExpr {
    /// A scripted expression that succeeds, consuming `len` bytes.
    #[must_use]
    pub fn matching(len: usize) -> Self {
        Self::new(ScriptedBehavior::Match { len })
    }

    /// A scripted expression that always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self::new(ScriptedBehavior::Fail)
    }

    fn new(behavior: ScriptedBehavior) -> Self {
        Self {
            id: ExprId::next(),
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            node_type: Arc::new(NodeType::default()),
        }
    }

    /// Handle for asserting on this expression's evaluation count.
    #[must_use]
    pub fn call_count(&self) -> CallCount {
        CallCount(Arc::clone(&self.calls))
    }

    pub(crate) const fn id(&self) -> ExprId {
        self.id
    }

    pub(crate) const fn node_type(&self) -> &Arc<NodeType> {
        &self.node_type
    }

    pub(crate) fn evaluate(&self, input: &str, index: usize) -> ParseOutcome {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match self.behavior {
            ScriptedBehavior::Match { len } => {
                let end = index + len;
                let span = TextRange::new(TextSize::from_usize(index), TextSize::from_usize(end));
                let text = input.get(index..end).unwrap_or_default().into();
                ParseOutcome::Success(Arc::new(SyntaxNode::leaf(
                    span,
                    text,
                    Arc::clone(&self.node_type),
                )))
            }
            ScriptedBehavior::Fail => ParseOutcome::Failure(FailureInfo::at(index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_consumes_scripted_length() {
        let scripted = ScriptedExpr::matching(3);
        let outcome = scripted.evaluate("abcdef", 1);

        let node = outcome.node().expect("should match");
        assert_eq!(node.span(), TextRange::new(TextSize::from(1), TextSize::from(4)));
        assert_eq!(node.text(), "bcd");
    }

    #[test]
    fn test_failing_fails_at_index() {
        let scripted = ScriptedExpr::failing();
        let outcome = scripted.evaluate("abc", 2);
        assert_eq!(outcome.failure().map(FailureInfo::index), Some(2));
    }

    #[test]
    fn test_call_count_survives_moves() {
        let scripted = ScriptedExpr::matching(1);
        let calls = scripted.call_count();
        assert_eq!(calls.get(), 0);

        scripted.evaluate("ab", 0);
        scripted.evaluate("ab", 1);
        assert_eq!(calls.get(), 2);
    }
}
