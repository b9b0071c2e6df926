//! Late-bound extension of the node types expressions produce.
//!
//! Each expression owns a [`NodeType`] descriptor: an append-only registry of
//! named behaviors. Constructing a node binds the descriptor, so every node
//! an expression produces exposes the behaviors registered on it. Behaviors
//! are supplied either as ready-made callables or as source text compiled
//! once at registration time by a [`MethodCompiler`].

use crate::error::MethodCompileError;
use crate::syntax::SyntaxNode;
use compact_str::CompactString;
use hashbrown::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Value produced by invoking a registered node behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodValue {
    Unit,
    Bool(bool),
    Int(i64),
    Text(CompactString),
}

/// A compiled node behavior.
pub type MethodFn = Arc<dyn Fn(&SyntaxNode) -> MethodValue + Send + Sync>;

/// A behavior definition as supplied by the grammar author.
pub enum MethodDef {
    /// A ready-made callable.
    Callable(MethodFn),
    /// Source text, compiled into a callable at registration time.
    Source(String),
}

impl MethodDef {
    /// Convenience constructor wrapping a closure.
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&SyntaxNode) -> MethodValue + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(f))
    }

    /// Convenience constructor for source text.
    pub fn source(source: impl Into<String>) -> Self {
        Self::Source(source.into())
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("MethodDef::Callable(..)"),
            Self::Source(source) => f.debug_tuple("MethodDef::Source").field(source).finish(),
        }
    }
}

/// Compiles behavior source text into a callable.
///
/// The parsing algorithm never interprets behavior sources itself; callers
/// with richer method languages plug in their own compiler via
/// [`Expr::extend_node_type_with`](crate::grammar::Expr::extend_node_type_with).
pub trait MethodCompiler {
    /// Compile `source` into the behavior registered as `name`.
    fn compile(&self, name: &str, source: &str) -> Result<MethodFn, MethodCompileError>;
}

/// Built-in compiler for declarative method bodies.
///
/// Accepts definitions of the form `fn name() { <literal> }` where the body
/// literal is a double-quoted string, an integer, `true`/`false`, or empty
/// (yielding [`MethodValue::Unit`]). The declared name must match the name
/// the behavior is registered under.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptCompiler;

impl MethodCompiler for ScriptCompiler {
    fn compile(&self, name: &str, source: &str) -> Result<MethodFn, MethodCompileError> {
        let src = source.trim();
        let rest = src
            .strip_prefix("fn")
            .ok_or_else(|| MethodCompileError::InvalidSignature {
                found: src.to_string(),
            })?
            .trim_start();

        let paren = rest
            .find('(')
            .ok_or_else(|| MethodCompileError::InvalidSignature {
                found: src.to_string(),
            })?;
        let declared = rest[..paren].trim_end();
        if !is_identifier(declared) {
            return Err(MethodCompileError::InvalidSignature {
                found: src.to_string(),
            });
        }
        if declared != name {
            return Err(MethodCompileError::NameMismatch {
                declared: declared.to_string(),
                expected: name.to_string(),
            });
        }

        // Only nullary signatures are supported.
        let rest = rest[paren + 1..]
            .trim_start()
            .strip_prefix(')')
            .ok_or_else(|| MethodCompileError::InvalidSignature {
                found: src.to_string(),
            })?
            .trim_start();

        let body = rest
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .map(str::trim)
            .ok_or_else(|| MethodCompileError::InvalidSignature {
                found: src.to_string(),
            })?;

        let value = parse_body_literal(body)?;
        Ok(Arc::new(move |_node: &SyntaxNode| value.clone()))
    }
}

fn parse_body_literal(body: &str) -> Result<MethodValue, MethodCompileError> {
    if body.is_empty() {
        return Ok(MethodValue::Unit);
    }
    if body == "true" {
        return Ok(MethodValue::Bool(true));
    }
    if body == "false" {
        return Ok(MethodValue::Bool(false));
    }
    if let Some(text) = body.strip_prefix('"').and_then(|b| b.strip_suffix('"')) {
        return Ok(MethodValue::Text(text.into()));
    }
    if let Ok(n) = body.parse::<i64>() {
        return Ok(MethodValue::Int(n));
    }
    Err(MethodCompileError::UnsupportedBody {
        body: body.to_string(),
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Append-only registry of named behaviors for the nodes an expression
/// produces.
///
/// Registration happens at grammar-definition time; nodes hold an `Arc` to
/// their descriptor and look behaviors up through it.
#[derive(Default)]
pub struct NodeType {
    methods: RwLock<HashMap<CompactString, MethodFn, ahash::RandomState>>,
}

impl NodeType {
    pub(crate) fn register(&self, name: &str, method: MethodFn) -> Result<(), MethodCompileError> {
        let mut methods = self
            .methods
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if methods.contains_key(name) {
            return Err(MethodCompileError::DuplicateMethod {
                name: name.to_string(),
            });
        }
        methods.insert(name.into(), method);
        Ok(())
    }

    #[must_use]
    pub fn has_method(&self, name: &str) -> bool {
        self.methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<MethodFn> {
        self.methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods = self.methods.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<_> = methods.keys().collect();
        names.sort();
        f.debug_struct("NodeType").field("methods", &names).finish()
    }
}
