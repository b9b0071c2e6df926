//! Evaluation sessions with packrat memoization.
//!
//! A [`Parser`] is one parse session over one immutable input: it owns the
//! memoization cache mapping `(expression identity, index)` to a previously
//! computed outcome. Expressions never invoke each other directly; every
//! recursive step goes through [`Parser::evaluate_expression_at`], so caching
//! applies uniformly. Re-evaluating the same pair is guaranteed to yield a
//! structurally identical outcome.
//!
//! Parsing a different input requires a fresh `Parser`; cache entries are
//! never shared across inputs or threads.

mod outcome;

pub use outcome::{FailureInfo, FailurePath, ParseOutcome};

use crate::grammar::{Expr, ExprId};
use hashbrown::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemoKey {
    expr: ExprId,
    index: usize,
}

/// Counters for one parse session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseMetrics {
    /// Expression evaluations actually performed (cache misses).
    pub evaluations: usize,
    /// Outcomes served from the memoization cache.
    pub cache_hits: usize,
    /// Successful matches, and therefore nodes constructed.
    pub nodes_created: usize,
}

/// One parse session: an immutable input plus its memoization cache.
pub struct Parser<'i> {
    input: &'i str,
    memo: HashMap<MemoKey, ParseOutcome, ahash::RandomState>,
    metrics: ParseMetrics,
}

impl<'i> Parser<'i> {
    #[must_use]
    pub fn new(input: &'i str) -> Self {
        Self {
            input,
            memo: HashMap::with_hasher(ahash::RandomState::new()),
            metrics: ParseMetrics::default(),
        }
    }

    /// The input this session parses.
    #[must_use]
    pub const fn input(&self) -> &'i str {
        self.input
    }

    /// Counters accumulated so far in this session.
    #[must_use]
    pub const fn metrics(&self) -> &ParseMetrics {
        &self.metrics
    }

    /// Evaluate `expr` against the session input starting at byte `index`.
    ///
    /// This is the single entry point for evaluation, used by external
    /// callers and by composite expressions for their children alike. On a
    /// cache hit the stored outcome is returned unchanged; on a miss the
    /// expression is evaluated once and the outcome stored under
    /// `(expr.id(), index)`.
    pub fn evaluate_expression_at(&mut self, expr: &Expr, index: usize) -> ParseOutcome {
        let key = MemoKey {
            expr: expr.id(),
            index,
        };
        if let Some(outcome) = self.memo.get(&key) {
            self.metrics.cache_hits += 1;
            return outcome.clone();
        }

        self.metrics.evaluations += 1;
        let outcome = expr.evaluate(index, self);
        if outcome.is_success() {
            self.metrics.nodes_created += 1;
        }
        self.memo.insert(key, outcome.clone());
        outcome
    }
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("input_len", &self.input.len())
            .field("memo_entries", &self.memo.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_then_hit() {
        let expr = Expr::terminal("foo");
        let mut parser = Parser::new("foo");

        let first = parser.evaluate_expression_at(&expr, 0);
        assert_eq!(parser.metrics().evaluations, 1);
        assert_eq!(parser.metrics().cache_hits, 0);

        let second = parser.evaluate_expression_at(&expr, 0);
        assert_eq!(parser.metrics().evaluations, 1);
        assert_eq!(parser.metrics().cache_hits, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_indices_are_distinct_entries() {
        let expr = Expr::terminal("o");
        let mut parser = Parser::new("oo");

        assert!(parser.evaluate_expression_at(&expr, 0).is_success());
        assert!(parser.evaluate_expression_at(&expr, 1).is_success());
        assert_eq!(parser.metrics().evaluations, 2);
        assert_eq!(parser.metrics().cache_hits, 0);
    }

    #[test]
    fn test_failures_are_memoized_too() {
        let expr = Expr::terminal("foo");
        let mut parser = Parser::new("bar");

        let first = parser.evaluate_expression_at(&expr, 0);
        let second = parser.evaluate_expression_at(&expr, 0);
        assert!(first.is_failure());
        assert_eq!(first, second);
        assert_eq!(parser.metrics().evaluations, 1);
        assert_eq!(parser.metrics().cache_hits, 1);
    }
}
