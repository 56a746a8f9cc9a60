//! Built-in regression suite for the C expression grammar.
//!
//! Run by the command-line driver when it is given no expressions.

use log::info;

use crate::parser::parser::Parser;

/// `(input, expected s-expression)` pairs.
pub const CASES: &[(&str, &str)] = &[
    // arithmetic
    ("1+2+3", "(+ (+ 1 2) 3)"),
    ("1+2*3", "(+ 1 (* 2 3))"),
    ("4*(2+3)", "(* 4 (+ 2 3))"),
    ("(2+3)*4", "(* (+ 2 3) 4)"),
    ("1<2", "(< 1 2)"),
    ("x=3", "(= x 3)"),
    ("x = 2*3", "(= x (* 2 3))"),
    ("x*y - y*z", "(- (* x y) (* y z))"),
    ("x/y - y%z", "(- (/ x y) (% y z))"),
    ("2 ** 3 ** 2", "(** 2 (** 3 2))"),
    ("a = b = 10", "(= a (= b 10))"),
    ("x = ((y*4)-2)", "(= x (- (* y 4) 2))"),
    ("x - -y", "(- x (- y))"),
    ("-1 * -2", "(* (- 1) (- 2))"),
    ("x += y += 3", "(+= x (+= y 3))"),
    ("x[1,2]", "(get x (, 1 2))"),
    ("+1 - +2", "(- (+ 1) (+ 2))"),
    ("f[x] += 1", "(+= (get f x) 1)"),
    // bitwise
    ("~1 | ~2", "(| (~ 1) (~ 2))"),
    ("x & y | a & b", "(| (& x y) (& a b))"),
    ("~x ^ y", "(^ (~ x) y)"),
    ("x << y | y << z", "(| (<< x y) (<< y z))"),
    ("a ^= b-1", "(^= a (- b 1))"),
    // logical and conditional
    ("a && b || c && d", "(|| (&& a b) (&& c d))"),
    ("!a && !b", "(&& (! a) (! b))"),
    ("a != b && c == d", "(&& (!= a b) (== c d))"),
    ("a > b ? x+1 : y+1", "(? (> a b) (+ x 1) (+ y 1))"),
    ("1 ? true1 : 2 ? true2 : false", "(? 1 true1 (? 2 true2 false))"),
    ("1 ? 2 ? true : false1 : false2", "(? 1 (? 2 true false1) false2)"),
    ("x ? 1 : 2, y ? 3 : 4", "(, (? x 1 2) (? y 3 4))"),
    ("a , b ? c, d : e, f", "(, a (? b (, c d) e) f)"),
    // unary
    ("!x", "(! x)"),
    ("x--", "(post-- x)"),
    ("x[1]--", "(post-- (get x 1))"),
    ("--x", "(-- x)"),
    ("++x[1]", "(++ (get x 1))"),
    ("!x--", "(! (post-- x))"),
    ("~x++", "(~ (post++ x))"),
    ("x++ - y++", "(- (post++ x) (post++ y))"),
    ("++x - ++y", "(- (++ x) (++ y))"),
    ("3!", "(post! 3)"),
    // calls, indexing, members
    ("x = y(2)*3 + y(4)*5", "(= x (+ (* (call y 2) 3) (* (call y 4) 5)))"),
    ("x(1,2)+y(3,4)", "(+ (call x 1 2) (call y 3 4))"),
    ("x(a,b,c[d])", "(call x a b (get c d))"),
    ("print(test(2,3))", "(call print (call test 2 3))"),
    ("min(255,n*2)", "(call min 255 (* n 2))"),
    ("c = pal[i*8]", "(= c (get pal (* i 8)))"),
    ("f(x)[1]++", "(post++ (get (call f x) 1))"),
    ("a.b->c", "(-> (. a b) c)"),
    // commas and grouping
    ("x=1,y=2,z=3", "(, (= x 1) (= y 2) (= z 3))"),
    ("a()", "(call a)"),
    ("a(+1)", "(call a (+ 1))"),
    ("a()+1", "(+ (call a) 1)"),
    ("a, b, c", "(, a b c)"),
    ("(a, b, c)", "(, a b c)"),
    ("f(a, b, c)", "(call f a b c)"),
    ("f(a, b, c), d", "(, (call f a b c) d)"),
    ("(a, b, c), d", "(, (, a b c) d)"),
];

/// A regression case whose outcome differed from the expected rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub input: &'static str,
    pub expected: &'static str,
    /// The rendered tree, or the error message when parsing failed.
    pub actual: String,
}

/// Runs every case through `parser` and returns the failures.
pub fn run(parser: &Parser) -> Vec<Mismatch> {
    let mismatches: Vec<Mismatch> = CASES
        .iter()
        .filter_map(|&(input, expected)| {
            let actual = match parser.parse(input) {
                Ok(node) => node.to_string(),
                Err(error) => format!("error: {}", error),
            };

            (actual != expected).then(|| Mismatch { input, expected, actual })
        })
        .collect();

    info!("self-test: {} cases, {} mismatches", CASES.len(), mismatches.len());
    mismatches
}
