use crate::error::{GrammarError, MethodCompileError};
use crate::grammar::extension::{MethodCompiler, MethodDef, NodeType, ScriptCompiler};
use crate::grammar::{Sequence, TerminalSymbol};
use crate::parser::{ParseOutcome, Parser};
use compact_str::CompactString;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

static NEXT_EXPR_ID: AtomicU32 = AtomicU32::new(0);

/// Stable identity of an expression, used as the memoization cache key.
///
/// Identity is assigned at construction and never reused, so two
/// structurally identical expressions are still distinct cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(u32);

impl ExprId {
    pub(crate) fn next() -> Self {
        Self(NEXT_EXPR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A parsing expression.
///
/// Expressions form the grammar: each variant knows how to match a prefix of
/// the input at an index, producing a [`ParseOutcome`]. Composite variants
/// never invoke their children directly; every recursive step goes through
/// [`Parser::evaluate_expression_at`] so the memoization cache applies
/// uniformly.
///
/// Extend the grammar by adding variants here, not by modifying the existing
/// ones.
#[derive(Debug)]
pub enum Expr {
    /// Fixed-literal leaf match.
    Terminal(TerminalSymbol),
    /// Ordered, contiguous composition of child expressions.
    Sequence(Sequence),
    /// Scripted stand-in for tests.
    #[cfg(feature = "testing")]
    Scripted(crate::testing::ScriptedExpr),
}

impl Expr {
    /// Build a terminal-literal expression.
    #[must_use]
    pub fn terminal(literal: impl Into<CompactString>) -> Self {
        Self::Terminal(TerminalSymbol::new(literal))
    }

    /// Build a sequence expression from an ordered, non-empty child list.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::EmptySequence`] when `children` is empty.
    pub fn sequence(children: Vec<Expr>) -> Result<Self, GrammarError> {
        Ok(Self::Sequence(Sequence::new(children)?))
    }

    /// The cache identity of this expression.
    #[must_use]
    pub fn id(&self) -> ExprId {
        match self {
            Self::Terminal(terminal) => terminal.id(),
            Self::Sequence(sequence) => sequence.id(),
            #[cfg(feature = "testing")]
            Self::Scripted(scripted) => scripted.id(),
        }
    }

    /// The node type descriptor bound to nodes this expression produces.
    #[must_use]
    pub fn node_type(&self) -> &Arc<NodeType> {
        match self {
            Self::Terminal(terminal) => terminal.node_type(),
            Self::Sequence(sequence) => sequence.node_type(),
            #[cfg(feature = "testing")]
            Self::Scripted(scripted) => scripted.node_type(),
        }
    }

    /// Register a named behavior on the node type this expression produces,
    /// compiling source-text definitions with the built-in [`ScriptCompiler`].
    ///
    /// # Errors
    ///
    /// Returns [`MethodCompileError`] when the source does not compile, the
    /// declared name does not match `name`, or `name` is already registered.
    pub fn extend_node_type(&self, name: &str, def: MethodDef) -> Result<(), MethodCompileError> {
        self.extend_node_type_with(&ScriptCompiler, name, def)
    }

    /// Register a named behavior, compiling source-text definitions with the
    /// supplied compiler.
    ///
    /// # Errors
    ///
    /// See [`Expr::extend_node_type`].
    pub fn extend_node_type_with(
        &self,
        compiler: &dyn MethodCompiler,
        name: &str,
        def: MethodDef,
    ) -> Result<(), MethodCompileError> {
        let method = match def {
            MethodDef::Callable(method) => method,
            MethodDef::Source(source) => compiler.compile(name, &source)?,
        };
        self.node_type().register(name, method)
    }

    pub(crate) fn evaluate(&self, index: usize, parser: &mut Parser<'_>) -> ParseOutcome {
        match self {
            Self::Terminal(terminal) => terminal.evaluate(parser.input(), index),
            Self::Sequence(sequence) => sequence.evaluate(index, parser),
            #[cfg(feature = "testing")]
            Self::Scripted(scripted) => scripted.evaluate(parser.input(), index),
        }
    }
}

#[cfg(feature = "testing")]
impl From<crate::testing::ScriptedExpr> for Expr {
    fn from(scripted: crate::testing::ScriptedExpr) -> Self {
        Self::Scripted(scripted)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(terminal) => write!(f, "\"{}\"", terminal.literal()),
            Self::Sequence(sequence) => {
                f.write_str("(")?;
                for (i, child) in sequence.children().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
            #[cfg(feature = "testing")]
            Self::Scripted(_) => f.write_str("<scripted>"),
        }
    }
}
