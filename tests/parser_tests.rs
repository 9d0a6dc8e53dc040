// tests/parser_tests.rs

use searchbox::cst::{AtomicQuery, Comparator, Query, Term};
use searchbox::lexer::Lexer;
use searchbox::parser::{Parser, SyntaxError};

fn parse(input: &str) -> Result<Query, SyntaxError> {
    let (tokens, errors) = Lexer::new(input).tokenize();
    assert!(errors.is_empty(), "unexpected lex errors: {errors:?}");
    Parser::new(tokens).parse()
}

fn parse_ok(input: &str) -> Query {
    parse(input).unwrap_or_else(|e| panic!("failed to parse {input:?}: {e}"))
}

/// The single atomic query of a query with no connectives.
fn only_atomic(query: &Query) -> &AtomicQuery {
    assert_eq!(query.or_query.and_queries.len(), 1);
    let and_query = &query.or_query.and_queries[0];
    assert_eq!(and_query.atomic_queries.len(), 1);
    &and_query.atomic_queries[0]
}

// ============================================================================
// Terms
// ============================================================================

#[test]
fn test_equal_field_term() {
    let query = parse_ok("status:active");
    match only_atomic(&query) {
        AtomicQuery::Term(Term::EqualField(term)) => {
            assert_eq!(term.field.path(), "status");
            assert_eq!(term.values.len(), 1);
            assert_eq!(term.values[0].raw(), "active");
        }
        other => panic!("Expected equality term, got {other:?}"),
    }
}

#[test]
fn test_multi_value_equal_field_term() {
    let query = parse_ok("id : 1, 2 ,3");
    match only_atomic(&query) {
        AtomicQuery::Term(Term::EqualField(term)) => {
            let raw: Vec<&str> = term.values.iter().map(|v| v.raw()).collect();
            assert_eq!(raw, vec!["1", "2", "3"]);
        }
        other => panic!("Expected equality term, got {other:?}"),
    }
}

#[test]
fn test_comparison_terms() {
    let test_cases = vec![
        ("n:<1", Comparator::LessThan),
        ("n:<=1", Comparator::LessEqual),
        ("n:>1", Comparator::GreaterThan),
        ("n:>=1", Comparator::GreaterEqual),
    ];

    for (input, expected) in test_cases {
        let query = parse_ok(input);
        match only_atomic(&query) {
            AtomicQuery::Term(Term::OtherField(term)) => {
                assert_eq!(term.comparator, expected, "input: {input}");
                assert_eq!(term.value.raw(), "1");
            }
            other => panic!("Expected comparison term for {input}, got {other:?}"),
        }
    }
}

#[test]
fn test_nested_field_term() {
    let query = parse_ok("user.address.city:Paris");
    match only_atomic(&query) {
        AtomicQuery::Term(Term::EqualField(term)) => {
            assert_eq!(term.field.path(), "user.address.city");
        }
        other => panic!("Expected equality term, got {other:?}"),
    }
}

#[test]
fn test_global_terms() {
    for input in ["hello", "\"hello world\"", "42", "2024-01-01", "null", "abc*"] {
        let query = parse_ok(input);
        assert!(
            matches!(only_atomic(&query), AtomicQuery::Term(Term::Global(_))),
            "input: {input}"
        );
    }
}

// ============================================================================
// Connectives
// ============================================================================

#[test]
fn test_implicit_and() {
    let query = parse_ok("a:1 b:2 c");
    let and_query = &query.or_query.and_queries[0];
    assert_eq!(and_query.atomic_queries.len(), 3);
    assert!(and_query.connectives.is_empty());
}

#[test]
fn test_explicit_and_is_recorded() {
    let query = parse_ok("a:1 AND b:2 and c:3");
    let and_query = &query.or_query.and_queries[0];
    assert_eq!(and_query.atomic_queries.len(), 3);
    assert_eq!(and_query.connectives.len(), 2);
}

#[test]
fn test_and_binds_tighter_than_or() {
    // a:1 OR (b:2 AND c:3)
    let query = parse_ok("a:1 OR b:2 c:3");
    let branches = &query.or_query.and_queries;
    assert_eq!(branches.len(), 2);
    assert_eq!(branches[0].atomic_queries.len(), 1);
    assert_eq!(branches[1].atomic_queries.len(), 2);
    assert_eq!(query.or_query.connectives.len(), 1);
}

#[test]
fn test_not_forms() {
    for input in ["-a:1", "NOT a:1", "not a:1"] {
        let query = parse_ok(input);
        match only_atomic(&query) {
            AtomicQuery::Not(not) => {
                assert!(matches!(*not.atomic_query, AtomicQuery::Term(Term::EqualField(_))));
            }
            other => panic!("Expected negation for {input}, got {other:?}"),
        }
    }
}

#[test]
fn test_double_negation() {
    let query = parse_ok("NOT -a:1");
    match only_atomic(&query) {
        AtomicQuery::Not(outer) => assert!(matches!(*outer.atomic_query, AtomicQuery::Not(_))),
        other => panic!("Expected negation, got {other:?}"),
    }
}

#[test]
fn test_sub_query() {
    let query = parse_ok("(a:1 OR b:2) c:3");
    let and_query = &query.or_query.and_queries[0];
    assert_eq!(and_query.atomic_queries.len(), 2);
    match &and_query.atomic_queries[0] {
        AtomicQuery::Sub(sub) => assert_eq!(sub.query.or_query.and_queries.len(), 2),
        other => panic!("Expected sub-query, got {other:?}"),
    }
}

#[test]
fn test_keyword_lookalikes_are_values() {
    let query = parse_ok("os:android");
    match only_atomic(&query) {
        AtomicQuery::Term(Term::EqualField(term)) => assert_eq!(term.values[0].raw(), "android"),
        other => panic!("Expected equality term, got {other:?}"),
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unbalanced_parentheses() {
    assert!(matches!(
        parse("(a:1 OR b:2"),
        Err(SyntaxError::UnexpectedEnd { expected: "')'" })
    ));
    assert!(matches!(parse("a:1)"), Err(SyntaxError::RedundantInput { .. })));
}

#[test]
fn test_dangling_connectives() {
    for input in ["a:1 OR", "a:1 AND", "OR a:1", "AND a:1", "a:1 OR OR b:2"] {
        assert!(parse(input).is_err(), "input: {input}");
    }
}

#[test]
fn test_missing_value() {
    assert!(matches!(
        parse("a:"),
        Err(SyntaxError::UnexpectedEnd { expected: "a value" })
    ));
    assert!(parse("a:1,").is_err());
    assert!(parse("count:>").is_err());
}

#[test]
fn test_comparison_takes_one_value() {
    assert!(matches!(parse("n:>1,2"), Err(SyntaxError::RedundantInput { .. })));
}

#[test]
fn test_lone_nested_field_needs_comparator() {
    let err = parse("user.name").unwrap_err();
    assert!(err.to_string().contains("a comparator after the field"), "{err}");
}

#[test]
fn test_empty_group() {
    let err = parse("()").unwrap_err();
    match err {
        SyntaxError::Unexpected { found, column, .. } => {
            assert_eq!(found, "')'");
            assert_eq!(column, 2);
        }
        other => panic!("Expected unexpected token, got {other:?}"),
    }
}

#[test]
fn test_error_message_has_position() {
    let err = parse("a:1 OR )").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expecting a search term but found ')' at line 1, column 8"
    );
}

#[test]
fn test_max_depth() {
    let (tokens, _) = Lexer::new("((a:1))").tokenize();
    assert!(Parser::new(tokens.clone()).with_max_depth(Some(2)).parse().is_ok());

    let err = Parser::new(tokens).with_max_depth(Some(1)).parse().unwrap_err();
    assert!(matches!(err, SyntaxError::TooDeep { max_depth: 1, .. }));

    let (tokens, _) = Lexer::new("NOT NOT a:1").tokenize();
    assert!(Parser::new(tokens).with_max_depth(Some(1)).parse().is_err());
}
