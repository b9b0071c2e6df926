//! Error types for grammar construction and node-type extension.
//!
//! Match failures are not errors: evaluation always returns a
//! [`ParseOutcome`](crate::parser::ParseOutcome) value, and a failed match is
//! ordinary data. The enums here cover the operations that can genuinely be
//! misused, building expressions and registering node behaviors.

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Errors constructing expressions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum GrammarError {
    #[error("a sequence expression requires at least one child")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::empty_sequence)))]
    EmptySequence,
}

/// Errors registering a named behavior on a node type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum MethodCompileError {
    #[error("method source must be of the form `fn name() {{ ... }}`, got: {found}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(extension::invalid_signature)))]
    InvalidSignature { found: String },

    #[error("method source declares `{declared}` but was registered as `{expected}`")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(extension::name_mismatch)))]
    NameMismatch { declared: String, expected: String },

    #[error("unsupported method body: {body}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(extension::unsupported_body)))]
    UnsupportedBody { body: String },

    #[error("method `{name}` is already defined for this node type")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(extension::duplicate_method)))]
    DuplicateMethod { name: String },
}
