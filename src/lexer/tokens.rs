use std::fmt::Display;

use crate::Span;

/// Operator symbols understood by the lexer, longest first so that the
/// alternation built from them always takes the longest match.
pub const OPERATORS: &[&str] = &[
    "<<=", ">>=",
    "**", "++", "--", "->", "<<", ">>", "<=", ">=", "==", "!=", "&&", "||",
    "+=", "-=", "*=", "/=", "%=", "&=", "^=", "|=",
    "+", "-", "*", "/", "%", "=", "<", ">", "?", "!", ":", "~", "&", "^", "|", "@",
];

/// Single characters that only ever delimit: grouping, indexing, sequencing and
/// member access.
pub const SYNTAX: &[&str] = &["(", ")", "[", "]", ",", "."];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,
    Operator,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Token {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }

    /// True when the token is the operator or syntax character `symbol`.
    pub fn is(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Operator && self.value == symbol
    }
}
