use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_TOKEN};

use super::tokens::{Token, TokenKind, OPERATORS, SYNTAX};

pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn alternation(symbols: &[&str]) -> String {
    let escaped: Vec<String> = symbols.iter().map(|s| regex::escape(s)).collect();
    format!("^(?:{})", escaped.join("|"))
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[ \\t\\r\\n]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[0-9]+(\\.[0-9]*)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(&alternation(SYNTAX)).unwrap(), handler: operator_handler },
        RegexPattern { regex: Regex::new(&alternation(OPERATORS)).unwrap(), handler: operator_handler },
    ];
}

/// Lazy token source over a borrowed string.
///
/// Yields tokens in source order, then exactly one `EOF` token, then `None`.
/// A lexical error ends the stream.
#[derive(Clone)]
pub struct Lexer<'s> {
    source: &'s str,
    pos: usize,
    finished: bool,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Lexer<'s> {
        Lexer {
            source,
            pos: 0,
            finished: false,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &'s str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32),
            end: Position((self.pos + len) as u32),
        }
    }

    fn make(&mut self, kind: TokenKind, value: &str) -> Token {
        let token = MK_TOKEN!(kind, String::from(value), self.span_of(value.len()));
        self.advance_n(value.len());
        token
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while !self.at_eof() {
            let remainder = self.remainder();
            let mut matched = false;

            for pattern in PATTERNS.iter() {
                if let Some(found) = pattern.regex.find(remainder) {
                    matched = true;
                    if let Some(token) = (pattern.handler)(self, found.as_str()) {
                        trace!("lexed {:?} `{}` at {}", token.kind, token.value, token.span.start.0);
                        return Some(Ok(token));
                    }
                    break;
                }
            }

            if !matched {
                self.finished = true;
                return Some(Err(Error::new(
                    ErrorImpl::LexicalError { character: self.at() },
                    Position(self.pos as u32),
                )));
            }
        }

        self.finished = true;
        Some(Ok(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span_of(0))))
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_n(matched.len());
    None
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    Some(lexer.make(TokenKind::Number, matched))
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    Some(lexer.make(TokenKind::Identifier, matched))
}

fn operator_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    Some(lexer.make(TokenKind::Operator, matched))
}

/// Eagerly collects every token of `source`, including the trailing `EOF`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    Lexer::new(source).collect()
}
