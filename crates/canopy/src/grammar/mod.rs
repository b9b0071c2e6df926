//! # Grammar Module
//!
//! Parsing-expression types and the node-type extension registry.
//!
//! A grammar is a tree of [`Expr`] values: terminal literals at the leaves
//! and composite expressions (currently [`Sequence`]) above them. Expressions
//! are immutable after construction, with one exception: the node type an
//! expression produces can be extended with named behaviors at
//! grammar-definition time (see [`extension`]).

mod expr;
pub mod extension;
mod sequence;
mod terminal;

pub use expr::{Expr, ExprId};
pub use extension::{MethodCompiler, MethodDef, MethodFn, MethodValue, NodeType, ScriptCompiler};
pub use sequence::Sequence;
pub use terminal::TerminalSymbol;
