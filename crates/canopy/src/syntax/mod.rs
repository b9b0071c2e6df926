//! Syntax tree types: text positions and immutable match nodes.

mod node;
mod text;

pub use node::SyntaxNode;
pub use text::{TextRange, TextSize};
