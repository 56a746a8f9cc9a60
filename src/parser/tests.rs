//! Unit tests for the parser module.
//!
//! This module contains tests for:
//! - Precedence and associativity
//! - Prefix, postfix and mixed-arity operators
//! - Calls, indexing, the conditional and comma sequences
//! - Error kinds and their positions
//! - Custom operator tables and the depth limit

use std::sync::Arc;

use rstest::rstest;

use super::{
    lookups::{cexp_table, LeftHandler, NullHandler, OperatorTable, TokenKey, MAX_BP},
    parser::{parse, Parser, ParserConfig},
};
use crate::errors::errors::{Error, ErrorImpl};

fn sexp(source: &str) -> String {
    match parse(source) {
        Ok(node) => node.to_string(),
        Err(error) => panic!("failed to parse {:?}: {}", source, error),
    }
}

fn parse_error(source: &str) -> Error {
    match parse(source) {
        Ok(node) => panic!("{:?} parsed as {}", source, node),
        Err(error) => error,
    }
}

#[rstest]
#[case("a+b+c", "(+ (+ a b) c)")]
#[case("a-b+c", "(+ (- a b) c)")]
#[case("2**3**2", "(** 2 (** 3 2))")]
#[case("a+b*c", "(+ a (* b c))")]
#[case("(a+b)*c", "(* (+ a b) c)")]
#[case("a<<b+c", "(<< a (+ b c))")]
#[case("a==b<c", "(== a (< b c))")]
#[case("a||b&&c|d^e&f", "(|| a (&& b (| c (^ d (& e f)))))")]
#[case("-x**2", "(** (- x) 2)")]
#[case("42", "42")]
#[case("(x)", "x")]
fn test_parse_precedence(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(sexp(source), expected);
}

#[rstest]
#[case("++x", "(++ x)")]
#[case("x++", "(post++ x)")]
#[case("--x", "(-- x)")]
#[case("x--", "(post-- x)")]
#[case("-x", "(- x)")]
#[case("a - -b", "(- a (- b))")]
#[case("+a + +b", "(+ (+ a) (+ b))")]
#[case("!a", "(! a)")]
#[case("a!", "(post! a)")]
#[case("!a!", "(! (post! a))")]
#[case("- ++x", "(- (++ x))")]
#[case("++(x)", "(++ x)")]
fn test_parse_mixed_arity(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(sexp(source), expected);
}

#[rstest]
#[case("f(a,b)", "(call f a b)")]
#[case("f()", "(call f)")]
#[case("f(a,)", "(call f a)")]
#[case("f((a,b))", "(call f (, a b))")]
#[case("f(a=1, b ? c, d : e)", "(call f (= a 1) (? b (, c d) e))")]
#[case("f(a)(b)", "(call (call f a) b)")]
#[case("a[i]", "(get a i)")]
#[case("a[i][j]", "(get (get a i) j)")]
#[case("f(x)[1]", "(get (call f x) 1)")]
#[case("(a+b)[0]", "(get (+ a b) 0)")]
#[case("a.b.c", "(. (. a b) c)")]
#[case("p->next->value", "(-> (-> p next) value)")]
#[case("a.b(c)", "(call (. a b) c)")]
fn test_parse_calls_and_indexing(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(sexp(source), expected);
}

#[rstest]
#[case("1?a:2?b:c", "(? 1 a (? 2 b c))")]
#[case("a ? b = 1 : c", "(? a (= b 1) c)")]
#[case("a = b ? c : d", "(= a (? b c d))")]
#[case("a,b,c", "(, a b c)")]
#[case("(a,b),c", "(, (, a b) c)")]
#[case("a,(b,c)", "(, a (, b c))")]
#[case("((a,b)),c", "(, (, a b) c)")]
#[case("a=b=1", "(= a (= b 1))")]
#[case("a[i] = b[j] -= 2", "(= (get a i) (-= (get b j) 2))")]
#[case("x <<= 1", "(<<= x 1)")]
fn test_parse_ternary_comma_assignment(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(sexp(source), expected);
}

#[rstest]
#[case("1=a", "InvalidAssignTarget", 0)]
#[case("a+b=c", "InvalidAssignTarget", 0)]
#[case("f(x) += 1", "InvalidAssignTarget", 0)]
#[case("++1", "InvalidAssignTarget", 2)]
#[case("--(a+b)", "InvalidAssignTarget", 3)]
#[case("(a+b", "UnmatchedDelimiter", 4)]
#[case("a+b)", "UnmatchedDelimiter", 3)]
#[case("a]", "UnmatchedDelimiter", 1)]
#[case("f(a", "UnmatchedDelimiter", 3)]
#[case("f(a b)", "UnmatchedDelimiter", 4)]
#[case("x[1", "UnmatchedDelimiter", 3)]
#[case("(a]", "UnmatchedDelimiter", 2)]
#[case("a+", "UnexpectedToken", 2)]
#[case("", "UnexpectedToken", 0)]
#[case("()", "UnexpectedToken", 1)]
#[case("x[]", "UnexpectedToken", 2)]
#[case("@a", "UnexpectedToken", 0)]
#[case("*a", "NotAPrefixOperator", 0)]
#[case("a ? b", "MalformedTernary", 5)]
#[case("a ? b , c", "MalformedTernary", 9)]
#[case("a b", "TrailingInput", 2)]
#[case("a @ b", "TrailingInput", 2)]
#[case("a ~ b", "NotAnInfixOrPostfixOperator", 2)]
#[case("a : b", "NotAnInfixOrPostfixOperator", 2)]
#[case("(a ~ b)", "NotAnInfixOrPostfixOperator", 3)]
#[case("f(a ~ b)", "NotAnInfixOrPostfixOperator", 4)]
#[case("a[b ~ c]", "NotAnInfixOrPostfixOperator", 4)]
#[case("a ? b ~ c : d", "NotAnInfixOrPostfixOperator", 6)]
#[case("(a : b)", "NotAnInfixOrPostfixOperator", 3)]
#[case("a[b)", "UnmatchedDelimiter", 3)]
#[case(": b", "NotAPrefixOperator", 0)]
#[case("a + $", "LexicalError", 4)]
fn test_parse_errors(#[case] source: &str, #[case] name: &str, #[case] position: u32) {
    let error = parse_error(source);

    assert_eq!(error.get_error_name(), name, "{:?}: {}", source, error);
    assert_eq!(error.get_position().0, position, "{:?}: {}", source, error);
}

#[test]
fn test_parse_error_payloads() {
    assert_eq!(
        parse_error("(a+b").kind(),
        &ErrorImpl::UnmatchedDelimiter {
            expected: Some(")".to_string()),
            found: "EOF".to_string()
        }
    );
    assert_eq!(
        parse_error("1=a").kind(),
        &ErrorImpl::InvalidAssignTarget {
            target: "1".to_string()
        }
    );
    assert_eq!(
        parse_error("f(a ~ b)").kind(),
        &ErrorImpl::NotAnInfixOrPostfixOperator {
            token: "~".to_string()
        }
    );
    assert_eq!(
        parse_error("a b c").kind(),
        &ErrorImpl::TrailingInput {
            token: "b".to_string()
        }
    );
}

#[test]
fn test_parse_is_not_truncated() {
    // an error anywhere discards the whole parse
    assert!(parse("a + b; c").is_err());
    assert!(parse("f(a, b").is_err());
    assert!(parse("a ? b :").is_err());
}

#[test]
fn test_parenthesized_flag() {
    let grouped = parse("(a, b)").unwrap();
    let bare = parse("a, b").unwrap();
    let leaf = parse("(a)").unwrap();

    assert!(grouped.is_parenthesized());
    assert!(!bare.is_parenthesized());
    assert!(!leaf.is_parenthesized());
    assert_eq!(grouped.to_string(), bare.to_string());
}

#[test]
fn test_node_spans() {
    let node = parse("  f(a, b) + 1").unwrap();

    assert_eq!(node.span().start.0, 2);
    assert_eq!(node.span().end.0, 13);
    assert_eq!(node.children()[0].span().end.0, 9);
    assert_eq!(node.children()[0].operator(), Some("call"));
}

#[test]
fn test_parser_is_reusable() {
    let parser = Parser::cexp();

    assert!(parser.parse("(a").is_err());
    assert_eq!(parser.parse("a+b").unwrap().to_string(), "(+ a b)");
    assert_eq!(parser.parse("f(x)").unwrap().to_string(), "(call f x)");
}

#[test]
fn test_depth_limit() {
    let parser = Parser::cexp().with_config(ParserConfig::default().with_max_depth(16));

    let shallow = format!("{}a{}", "(".repeat(10), ")".repeat(10));
    assert_eq!(parser.parse(&shallow).unwrap().to_string(), "a");

    let deep = format!("{}a{}", "(".repeat(40), ")".repeat(40));
    let error = parser.parse(&deep).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::ExpressionTooDeep { limit: 16 });

    let chain = format!("{}x", "- ".repeat(40));
    assert_eq!(parser.parse(&chain).unwrap_err().get_error_name(), "ExpressionTooDeep");
}

#[test]
fn test_depth_limit_ignores_long_flat_chains() {
    let parser = Parser::cexp().with_config(ParserConfig::default().with_max_depth(8));
    let source = vec!["a"; 500].join(" + ");

    assert!(parser.parse(&source).is_ok());
}

#[test]
fn test_table_installs_error_entries() {
    let table = cexp_table();
    let null = table.get_null_lookup();
    let left = table.get_left_lookup();

    // `*` is infix only, `~` prefix only, `-` both
    assert_eq!(null[&TokenKey::from("*")].handler, NullHandler::Error);
    assert_eq!(left[&TokenKey::from("~")].handler, LeftHandler::Error);
    assert_eq!(null[&TokenKey::from("-")].handler, NullHandler::Prefix);
    assert_eq!(left[&TokenKey::from("-")].handler, LeftHandler::Binary);
    assert_eq!(null[&TokenKey::from("++")].handler, NullHandler::PrefixIncDec);
    assert_eq!(left[&TokenKey::from("++")].handler, LeftHandler::Postfix);
    assert!(!null.contains_key(&TokenKey::from("@")));
}

#[test]
fn test_table_binding_power_shapes() {
    let table = cexp_table();
    let left = table.get_left_lookup();

    let plus = left[&TokenKey::from("+")];
    assert_eq!((plus.left_bp, plus.right_bp, plus.next_bp), (230, 230, 231));

    let power = left[&TokenKey::from("**")];
    assert_eq!((power.left_bp, power.right_bp, power.next_bp), (270, 269, 271));

    let postfix = left[&TokenKey::from("++")];
    assert_eq!((postfix.left_bp, postfix.next_bp), (310, MAX_BP));

    // `(` as a call binds at least as tightly as any binary operator
    let call = left[&TokenKey::from("(")];
    assert!(left.values().filter(|spec| spec.handler == LeftHandler::Binary).all(|spec| spec.left_bp <= call.left_bp));
}

#[test]
#[should_panic(expected = "must be above")]
fn test_builder_rejects_unbindable_infix() {
    OperatorTable::builder().infix_right(0, LeftHandler::Binary, &["^"]);
}

#[test]
#[should_panic(expected = "must be above")]
fn test_builder_rejects_unbindable_suffix() {
    OperatorTable::builder().suffix(-5, LeftHandler::Postfix, &["!"]);
}

#[test]
fn test_builder_accepts_lowest_binding_infix() {
    let table = OperatorTable::builder()
        .literal()
        .infix_right(1, LeftHandler::Binary, &["^"])
        .build();
    let parser = Parser::new(Arc::new(table));

    assert_eq!(parser.parse("a ^ b ^ c").unwrap().to_string(), "(^ a (^ b c))");
}

fn relational_table() -> OperatorTable {
    OperatorTable::builder()
        .literal()
        .grouping("(")
        .infix_non_assoc(10, LeftHandler::Binary, &["<", "=="])
        .infix_left(20, LeftHandler::Binary, &["+"])
        .infix_right(30, LeftHandler::Binary, &["^"])
        .prefix(40, NullHandler::Prefix, &["-"])
        .build()
}

#[test]
fn test_custom_table_non_associative() {
    let parser = Parser::new(Arc::new(relational_table()));

    assert_eq!(parser.parse("a < b + c").unwrap().to_string(), "(< a (+ b c))");
    assert_eq!(parser.parse("(a < b) == c").unwrap().to_string(), "(== (< a b) c)");
    assert_eq!(parser.parse("a ^ b ^ c").unwrap().to_string(), "(^ a (^ b c))");
    assert_eq!(parser.parse("-a ^ b").unwrap().to_string(), "(^ (- a) b)");

    let error = parser.parse("a < b < c").unwrap_err();
    assert_eq!(error.get_error_name(), "TrailingInput");
    assert_eq!(error.get_position().0, 6);

    assert_eq!(parser.parse("a < b == c").unwrap_err().get_error_name(), "TrailingInput");
}

#[test]
fn test_custom_table_without_comma() {
    let table = OperatorTable::builder()
        .literal()
        .grouping("(")
        .infix_left(50, LeftHandler::Call, &["("])
        .infix_left(10, LeftHandler::Binary, &["+"])
        .build();
    let parser = Parser::new(Arc::new(table));

    assert_eq!(parser.parse("f(a + b)").unwrap().to_string(), "(call f (+ a b))");
    assert_eq!(parser.parse("f(a, b)").unwrap().to_string(), "(call f a b)");
    assert_eq!(parser.parse("a, b").unwrap_err().get_error_name(), "TrailingInput");
    assert_eq!(parser.parse("a - b").unwrap_err().get_error_name(), "TrailingInput");
    assert_eq!(parser.parse("-b").unwrap_err().get_error_name(), "UnexpectedToken");
}

#[test]
fn test_shared_table_across_threads() {
    let table = Arc::new(cexp_table());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let parser = Parser::new(Arc::clone(&table));
            std::thread::spawn(move || parser.parse(&format!("x{} = f(a, b) * {}", i, i)).map(|n| n.to_string()))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let rendered = handle.join().unwrap().unwrap();
        assert_eq!(rendered, format!("(= x{} (* (call f a b) {}))", i, i));
    }
}
