//! Parser implementation.
//!
//! `Parser` pairs a shared, immutable operator table with its configuration.
//! Every call to [`Parser::parse`] builds a fresh `ParseContext` owning the
//! lexer and the cursor, so a parser can be reused freely.

use std::sync::Arc;

use log::debug;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span, MK_TOKEN,
};

use super::{
    expr::parse_expr,
    lookups::{LeftHandler, OperatorTable, CEXP_TABLE, MIN_BP},
};

/// Which construct the innermost open delimiter belongs to.
///
/// Commas between call arguments separate operands, while commas inside
/// `( ... )` or `[ ... ]` build a sequence node.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum CommaMode {
    TupleOrGroup,
    CallArgs,
    IndexArgs,
}

impl CommaMode {
    pub fn closing(&self) -> &'static str {
        match self {
            CommaMode::TupleOrGroup | CommaMode::CallArgs => ")",
            CommaMode::IndexArgs => "]",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest operand nesting accepted before failing with `ExpressionTooDeep`.
    pub max_depth: usize,
}

impl ParserConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Mutable state of a single parse.
pub struct ParseContext<'p, 's> {
    /// The operator table driving the parse
    table: &'p OperatorTable,
    config: &'p ParserConfig,
    /// Token source, pulled one token at a time
    lexer: Lexer<'s>,
    /// Current token, `EOF` once the source is exhausted
    token: Token,
    /// Current operand nesting
    depth: usize,
    /// Open delimiters, innermost last
    delimiters: Vec<CommaMode>,
}

impl<'p, 's> ParseContext<'p, 's> {
    pub fn new(table: &'p OperatorTable, config: &'p ParserConfig, source: &'s str) -> Result<Self, Error> {
        let mut lexer = Lexer::new(source);
        let token = match lexer.next() {
            Some(token) => token?,
            None => eof_token(source.len()),
        };

        Ok(ParseContext {
            table,
            config,
            lexer,
            token,
            depth: 0,
            delimiters: vec![],
        })
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.token
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = match self.lexer.next() {
            Some(token) => token?,
            None => self.token.clone(),
        };

        Ok(std::mem::replace(&mut self.token, next))
    }

    /// Checks whether the current token is the operator `symbol`.
    pub fn at(&self, symbol: &str) -> bool {
        self.token.is(symbol)
    }

    pub fn at_eof(&self) -> bool {
        self.token.is_eof()
    }

    pub fn get_table(&self) -> &'p OperatorTable {
        self.table
    }

    pub fn get_position(&self) -> Position {
        self.token.span.start
    }

    /// Innermost open delimiter, `None` at the top level.
    pub fn mode(&self) -> Option<CommaMode> {
        self.delimiters.last().copied()
    }

    /// Binding power elements of the innermost delimiter are parsed at.
    ///
    /// Call arguments stop before the comma, everything else may contain one.
    pub fn element_bound(&self) -> i32 {
        match self.mode() {
            Some(CommaMode::CallArgs) => self.table.lookup_left_symbol(",").left_bp,
            _ => MIN_BP,
        }
    }

    /// Runs `parse` with `mode` as the innermost open delimiter.
    pub fn delimited<T>(
        &mut self,
        mode: CommaMode,
        parse: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.delimiters.push(mode);
        let result = parse(self);
        self.delimiters.pop();
        result
    }

    /// Consumes the delimiter closing `mode`.
    pub fn expect_closing(&mut self, mode: CommaMode) -> Result<Token, Error> {
        if self.at(mode.closing()) {
            return self.advance();
        }

        Err(self.misplaced_operator().unwrap_or_else(|| self.unmatched(Some(mode))))
    }

    pub fn unmatched(&self, mode: Option<CommaMode>) -> Error {
        Error::new(
            ErrorImpl::UnmatchedDelimiter {
                expected: mode.map(|mode| String::from(mode.closing())),
                found: self.token.value.clone(),
            },
            self.get_position(),
        )
    }

    /// Enters one level of operand nesting.
    pub fn descend(&mut self) -> Result<(), Error> {
        if self.depth >= self.config.max_depth {
            return Err(Error::new(
                ErrorImpl::ExpressionTooDeep {
                    limit: self.config.max_depth,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth -= 1;
    }

    /// Fails unless the whole source has been consumed.
    pub fn finish(&self) -> Result<(), Error> {
        if self.at_eof() {
            return Ok(());
        }

        if self.at(")") || self.at("]") {
            return Err(self.unmatched(None));
        }

        Err(self.misplaced_operator().unwrap_or_else(|| {
            Error::new(
                ErrorImpl::TrailingInput { token: self.token.value.clone() },
                self.get_position(),
            )
        }))
    }

    /// Error for a current token that is registered, but not after an operand.
    ///
    /// `~` in `a ~ b` or `(a ~ b)` stops the operand loop the same way a
    /// closing delimiter does; closers are left to the caller.
    pub fn misplaced_operator(&self) -> Option<Error> {
        if self.token.kind != TokenKind::Operator || self.at(")") || self.at("]") {
            return None;
        }

        if self.table.lookup_left(&self.token).handler != LeftHandler::Error {
            return None;
        }

        Some(Error::new(
            ErrorImpl::NotAnInfixOrPostfixOperator { token: self.token.value.clone() },
            self.get_position(),
        ))
    }
}

fn eof_token(pos: usize) -> Token {
    let position = Position(pos as u32);
    MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span { start: position, end: position })
}

/// Expression parser over a shared operator table.
#[derive(Debug, Clone)]
pub struct Parser {
    table: Arc<OperatorTable>,
    config: ParserConfig,
}

impl Parser {
    pub fn new(table: Arc<OperatorTable>) -> Self {
        Parser {
            table,
            config: ParserConfig::default(),
        }
    }

    /// Parser for the C expression grammar.
    pub fn cexp() -> Self {
        Parser::new(Arc::clone(&CEXP_TABLE))
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses `source` as a single expression.
    ///
    /// Any error aborts the whole parse, no partial tree is returned.
    pub fn parse(&self, source: &str) -> Result<Node, Error> {
        debug!("parsing {:?}", source);

        let mut context = ParseContext::new(&self.table, &self.config, source)?;
        let node = parse_expr(&mut context, MIN_BP)?;
        context.finish()?;

        debug!("parsed {:?} -> {}", source, node);
        Ok(node)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::cexp()
    }
}

/// Parses `source` with the C expression grammar.
pub fn parse(source: &str) -> Result<Node, Error> {
    Parser::cexp().parse(source)
}
