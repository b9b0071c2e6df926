//! Tests for the evaluation session and packrat memoization

use canopy::testing::ScriptedExpr;
use canopy::{Expr, ParseOutcome, Parser};

fn brace_pair() -> Expr {
    Expr::sequence(vec![Expr::terminal("{"), Expr::terminal("}")]).unwrap()
}

#[test]
fn test_empty_and_populated_caches_agree() {
    let sequence = brace_pair();

    let mut fresh = Parser::new("{}");
    let from_fresh = fresh.evaluate_expression_at(&sequence, 0);

    let mut warmed = Parser::new("{}");
    // Pre-populate by evaluating a child first, then the whole sequence.
    if let Expr::Sequence(seq) = &sequence {
        warmed.evaluate_expression_at(&seq.children()[0], 0);
    }
    let from_warmed = warmed.evaluate_expression_at(&sequence, 0);

    assert_eq!(from_fresh, from_warmed);
    assert!(from_fresh.is_success());
}

#[test]
fn test_repeated_evaluation_is_idempotent() {
    let sequence = brace_pair();
    let mut parser = Parser::new("{}");

    let first = parser.evaluate_expression_at(&sequence, 0);
    let second = parser.evaluate_expression_at(&sequence, 0);

    assert_eq!(first, second);
    match (&first, &second) {
        (ParseOutcome::Success(a), ParseOutcome::Success(b)) => {
            assert_eq!(a.span(), b.span());
            assert_eq!(a.text(), b.text());
            assert_eq!(a.elements().len(), b.elements().len());
        }
        _ => panic!("both evaluations should succeed"),
    }
}

#[test]
fn test_cached_children_are_not_reevaluated() {
    let element = ScriptedExpr::matching(2);
    let calls = element.call_count();
    let element: Expr = element.into();

    let mut parser = Parser::new("abab");
    parser.evaluate_expression_at(&element, 0);
    parser.evaluate_expression_at(&element, 0);
    parser.evaluate_expression_at(&element, 0);

    assert_eq!(calls.get(), 1, "repeat evaluations must come from the cache");
    assert_eq!(parser.metrics().evaluations, 1);
    assert_eq!(parser.metrics().cache_hits, 2);
}

#[test]
fn test_failed_outcomes_are_cached() {
    let element = ScriptedExpr::failing();
    let calls = element.call_count();
    let element: Expr = element.into();

    let mut parser = Parser::new("ab");
    let first = parser.evaluate_expression_at(&element, 1);
    let second = parser.evaluate_expression_at(&element, 1);

    assert!(first.is_failure());
    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_cache_distinguishes_positions() {
    let element = ScriptedExpr::matching(1);
    let calls = element.call_count();
    let element: Expr = element.into();

    let mut parser = Parser::new("abc");
    parser.evaluate_expression_at(&element, 0);
    parser.evaluate_expression_at(&element, 1);
    parser.evaluate_expression_at(&element, 2);

    assert_eq!(calls.get(), 3);
}

#[test]
fn test_cache_distinguishes_structurally_identical_expressions() {
    let a = Expr::terminal("x");
    let b = Expr::terminal("x");
    assert_ne!(a.id(), b.id());

    let mut parser = Parser::new("x");
    parser.evaluate_expression_at(&a, 0);
    parser.evaluate_expression_at(&b, 0);

    // Same literal, same index, but two cache entries: identity is the key.
    assert_eq!(parser.metrics().evaluations, 2);
    assert_eq!(parser.metrics().cache_hits, 0);
}

#[test]
fn test_sessions_do_not_share_cache_across_inputs() {
    let terminal = Expr::terminal("foo");

    let mut first = Parser::new("foo");
    assert!(first.evaluate_expression_at(&terminal, 0).is_success());

    // A different input gets its own session; no stale entries leak over.
    let mut second = Parser::new("bar");
    assert!(second.evaluate_expression_at(&terminal, 0).is_failure());
    assert_eq!(second.metrics().cache_hits, 0);
}

#[test]
fn test_metrics_track_nodes_created() {
    let sequence = brace_pair();
    let mut parser = Parser::new("{}");
    parser.evaluate_expression_at(&sequence, 0);

    // Two terminals plus the sequence node itself.
    assert_eq!(parser.metrics().nodes_created, 3);
    assert_eq!(parser.metrics().evaluations, 3);
}
