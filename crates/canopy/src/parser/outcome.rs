use crate::syntax::SyntaxNode;
use smallvec::SmallVec;
use std::sync::Arc;

/// Result of evaluating an expression at an index.
///
/// Failures are data, never thrown control signals: a parent expression must
/// inspect the outcome kind before proceeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The expression matched; the node records the consumed span.
    Success(Arc<SyntaxNode>),
    /// The expression did not match.
    Failure(FailureInfo),
}

impl ParseOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The matched node, when this outcome is a success.
    #[must_use]
    pub const fn node(&self) -> Option<&Arc<SyntaxNode>> {
        match self {
            Self::Success(node) => Some(node),
            Self::Failure(_) => None,
        }
    }

    /// The failure record, when this outcome is a failure.
    #[must_use]
    pub const fn failure(&self) -> Option<&FailureInfo> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

/// Diagnostic record of a failed match.
///
/// Carries the index where matching stopped and, for composite expressions,
/// nested records locating the failing child by its ordinal position within
/// the parent. The reporting layer picks the failure with the greatest index
/// as the most informative error location; this type only preserves the
/// structure that selection needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureInfo {
    index: usize,
    paths: SmallVec<[FailurePath; 1]>,
}

/// One step in a failure path: which child failed, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailurePath {
    child_ordinal: usize,
    failure: Box<FailureInfo>,
}

impl FailureInfo {
    /// A leaf failure at `index`, with no nested paths.
    #[must_use]
    pub fn at(index: usize) -> Self {
        Self {
            index,
            paths: SmallVec::new(),
        }
    }

    /// A composite failure wrapping a failing child's record.
    ///
    /// The parent's index is the index at which matching stopped, which is
    /// the child's own failure index.
    pub(crate) fn in_child(child_ordinal: usize, failure: FailureInfo) -> Self {
        let index = failure.index;
        let mut paths = SmallVec::new();
        paths.push(FailurePath {
            child_ordinal,
            failure: Box::new(failure),
        });
        Self { index, paths }
    }

    /// The index at which matching stopped.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Nested failure records, one per failing child.
    #[must_use]
    pub fn paths(&self) -> &[FailurePath] {
        &self.paths
    }

    /// The greatest failure index anywhere in this record's tree.
    #[must_use]
    pub fn furthest_index(&self) -> usize {
        self.paths
            .iter()
            .map(|path| path.failure.furthest_index())
            .max()
            .map_or(self.index, |nested| nested.max(self.index))
    }
}

impl FailurePath {
    /// Position of the failing child within its parent expression.
    #[must_use]
    pub const fn child_ordinal(&self) -> usize {
        self.child_ordinal
    }

    /// The child's own failure record.
    #[must_use]
    pub fn failure(&self) -> &FailureInfo {
        &self.failure
    }
}
