//! # Canopy
//!
//! Packrat evaluation core for parsing expression grammars (PEGs).
//!
//! ## Overview
//!
//! A grammar is a tree of [`Expr`] values: terminal literals at the leaves
//! and composite expressions above them. A [`Parser`] evaluates an
//! expression against an immutable input starting at a byte index and
//! returns a [`ParseOutcome`]: either a successful match carrying a
//! [`SyntaxNode`] with the consumed span, or a structured [`FailureInfo`]
//! locating where and in which child matching stopped.
//!
//! Every recursive evaluation step goes through the parser, so results are
//! memoized per `(expression, index)` pair (packrat parsing): revisiting the
//! same pair under backtracking costs a cache lookup, and re-evaluation is
//! guaranteed to yield a structurally identical outcome.
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy::{Expr, Parser};
//!
//! let greeting = Expr::sequence(vec![
//!     Expr::terminal("foo"),
//!     Expr::terminal("bar"),
//! ])?;
//!
//! let mut parser = Parser::new("foobar");
//! let outcome = parser.evaluate_expression_at(&greeting, 0);
//!
//! let node = outcome.node().expect("input matches the grammar");
//! assert_eq!(node.text(), "foobar");
//! assert_eq!(node.elements().len(), 2);
//! assert_eq!(node.elements()[1].text(), "bar");
//! # Ok::<(), canopy::GrammarError>(())
//! ```
//!
//! ## Modules
//!
//! - [`grammar`] - Expression types and the node-type extension registry
//! - [`parser`] - Evaluation sessions with packrat memoization
//! - [`syntax`] - Text positions and immutable match nodes
//! - [`error`] - Construction and registration errors
//! - [`testing`] - Scripted stand-in expressions for tests

pub mod error;
pub mod grammar;
pub mod parser;
pub mod syntax;

#[cfg(feature = "testing")]
pub mod testing;

// Re-export commonly used types
pub use error::{GrammarError, MethodCompileError};
pub use grammar::{
    Expr, ExprId, MethodCompiler, MethodDef, MethodFn, MethodValue, NodeType, ScriptCompiler,
    Sequence, TerminalSymbol,
};
pub use parser::{FailureInfo, FailurePath, ParseMetrics, ParseOutcome, Parser};
pub use syntax::{SyntaxNode, TextRange, TextSize};
