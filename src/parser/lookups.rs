use std::{collections::HashMap, sync::Arc};

use lazy_static::lazy_static;
use log::debug;

use crate::lexer::tokens::{Token, TokenKind};

pub const MIN_BP: i32 = 0;
pub const MAX_BP: i32 = 10000;

/// Precedence levels of the C expression grammar, loosest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default = 0,
    Comma = 10,
    Assignment = 30,
    Ternary = 50,
    LogicalOr = 70,
    LogicalAnd = 90,
    BitwiseOr = 110,
    BitwiseXor = 130,
    BitwiseAnd = 150,
    Equality = 170,
    Relational = 190,
    Shift = 210,
    Additive = 230,
    Multiplicative = 250,
    Exponent = 270,
    Unary = 290,
    Factorial = 300,
    Postfix = 310,
}

impl From<BindingPower> for i32 {
    fn from(bp: BindingPower) -> i32 {
        bp as i32
    }
}

/// Rule applied to a token met where an operand is expected.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NullHandler {
    /// Never registered in this position.
    Unregistered,
    /// Registered only for the left position.
    Error,
    /// `)` or `]` where an operand should start.
    Closing,
    Literal,
    Grouping,
    Prefix,
    PrefixIncDec,
}

/// Rule applied to a token met after a complete operand.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum LeftHandler {
    /// Never registered in this position.
    Unregistered,
    /// Registered only for the null position.
    Error,
    Binary,
    Assignment,
    Ternary,
    Comma,
    Call,
    Index,
    Postfix,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct OperatorSpec<H> {
    pub left_bp: i32,
    pub right_bp: i32,
    pub next_bp: i32,
    pub handler: H,
}

pub type NullSpec = OperatorSpec<NullHandler>;
pub type LeftSpec = OperatorSpec<LeftHandler>;

const UNREGISTERED_NULL: NullSpec = OperatorSpec {
    left_bp: MIN_BP,
    right_bp: MIN_BP,
    next_bp: MIN_BP,
    handler: NullHandler::Unregistered,
};

const UNREGISTERED_LEFT: LeftSpec = OperatorSpec {
    left_bp: MIN_BP,
    right_bp: MIN_BP,
    next_bp: MIN_BP,
    handler: LeftHandler::Unregistered,
};

const ERROR_NULL: NullSpec = OperatorSpec {
    handler: NullHandler::Error,
    ..UNREGISTERED_NULL
};

const ERROR_LEFT: LeftSpec = OperatorSpec {
    handler: LeftHandler::Error,
    ..UNREGISTERED_LEFT
};

/// Key a token is looked up by: its kind for literals, its text otherwise.
#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub enum TokenKey {
    Identifier,
    Number,
    EOF,
    Symbol(String),
}

impl From<&Token> for TokenKey {
    fn from(token: &Token) -> Self {
        match token.kind {
            TokenKind::Identifier => TokenKey::Identifier,
            TokenKind::Number => TokenKey::Number,
            TokenKind::EOF => TokenKey::EOF,
            TokenKind::Operator => TokenKey::Symbol(token.value.clone()),
        }
    }
}

impl From<&str> for TokenKey {
    fn from(symbol: &str) -> Self {
        TokenKey::Symbol(String::from(symbol))
    }
}

pub type NullLookup = HashMap<TokenKey, NullSpec>;
pub type LeftLookup = HashMap<TokenKey, LeftSpec>;

/// Immutable registry of null and left denotations.
///
/// Every lookup succeeds: keys that were never registered resolve to error
/// entries with a binding power of zero.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    null_lookup: NullLookup,
    left_lookup: LeftLookup,
}

impl OperatorTable {
    pub fn builder() -> OperatorTableBuilder {
        OperatorTableBuilder::default()
    }

    pub fn lookup_null(&self, token: &Token) -> &NullSpec {
        self.null_lookup.get(&TokenKey::from(token)).unwrap_or(&UNREGISTERED_NULL)
    }

    pub fn lookup_left(&self, token: &Token) -> &LeftSpec {
        self.left_lookup.get(&TokenKey::from(token)).unwrap_or(&UNREGISTERED_LEFT)
    }

    pub fn lookup_left_symbol(&self, symbol: &str) -> &LeftSpec {
        self.left_lookup.get(&TokenKey::from(symbol)).unwrap_or(&UNREGISTERED_LEFT)
    }

    pub fn get_null_lookup(&self) -> &NullLookup {
        &self.null_lookup
    }

    pub fn get_left_lookup(&self) -> &LeftLookup {
        &self.left_lookup
    }
}

/// Operators taking a left operand must bind above `MIN_BP`.
///
/// Panics otherwise: at `MIN_BP` or below the operator never binds, and a
/// right-associative one would get a negative right binding power.
fn left_binding(bp: impl Into<i32>) -> i32 {
    let bp = bp.into();
    assert!(bp > MIN_BP, "binding power {} of an infix or suffix operator must be above {}", bp, MIN_BP);
    bp
}

/// Collects registrations, then freezes them into an [`OperatorTable`].
///
/// Each helper encodes one associativity shape from a single precedence:
///
/// | shape       | left  | right  | next   |
/// |-------------|-------|--------|--------|
/// | prefix      | -     | bp     | MAX    |
/// | suffix      | bp    | -      | MAX    |
/// | infix left  | bp    | bp     | bp + 1 |
/// | infix right | bp    | bp - 1 | bp + 1 |
/// | infix none  | bp    | bp     | bp     |
#[derive(Debug, Default)]
pub struct OperatorTableBuilder {
    table: OperatorTable,
}

impl OperatorTableBuilder {
    fn register_null<K: Into<TokenKey> + Clone>(&mut self, spec: NullSpec, keys: &[K]) {
        for key in keys {
            let key: TokenKey = key.clone().into();
            self.table.left_lookup.entry(key.clone()).or_insert(ERROR_LEFT);
            self.table.null_lookup.insert(key, spec);
        }
    }

    fn register_left<K: Into<TokenKey> + Clone>(&mut self, spec: LeftSpec, keys: &[K]) {
        for key in keys {
            let key: TokenKey = key.clone().into();
            self.table.null_lookup.entry(key.clone()).or_insert(ERROR_NULL);
            self.table.left_lookup.insert(key, spec);
        }
    }

    /// Operand-like tokens that take nothing on either side.
    pub fn nilfix<K: Into<TokenKey> + Clone>(mut self, handler: NullHandler, keys: &[K]) -> Self {
        let spec = OperatorSpec { left_bp: MIN_BP, right_bp: MIN_BP, next_bp: MAX_BP, handler };
        self.register_null(spec, keys);
        self
    }

    pub fn prefix(mut self, bp: impl Into<i32>, handler: NullHandler, symbols: &[&str]) -> Self {
        let spec = OperatorSpec { left_bp: MIN_BP, right_bp: bp.into(), next_bp: MAX_BP, handler };
        self.register_null(spec, symbols);
        self
    }

    pub fn suffix(mut self, bp: impl Into<i32>, handler: LeftHandler, symbols: &[&str]) -> Self {
        let spec = OperatorSpec { left_bp: left_binding(bp), right_bp: MIN_BP, next_bp: MAX_BP, handler };
        self.register_left(spec, symbols);
        self
    }

    pub fn infix_left(mut self, bp: impl Into<i32>, handler: LeftHandler, symbols: &[&str]) -> Self {
        let bp = left_binding(bp);
        self.register_left(OperatorSpec { left_bp: bp, right_bp: bp, next_bp: bp + 1, handler }, symbols);
        self
    }

    pub fn infix_right(mut self, bp: impl Into<i32>, handler: LeftHandler, symbols: &[&str]) -> Self {
        let bp = left_binding(bp);
        self.register_left(OperatorSpec { left_bp: bp, right_bp: bp - 1, next_bp: bp + 1, handler }, symbols);
        self
    }

    pub fn infix_non_assoc(mut self, bp: impl Into<i32>, handler: LeftHandler, symbols: &[&str]) -> Self {
        let bp = left_binding(bp);
        self.register_left(OperatorSpec { left_bp: bp, right_bp: bp, next_bp: bp, handler }, symbols);
        self
    }

    /// Identifiers and numbers become leaves.
    pub fn literal(self) -> Self {
        self.nilfix(NullHandler::Literal, &[TokenKey::Identifier, TokenKey::Number])
    }

    /// `open` groups a sub-expression up to its matching `)`.
    pub fn grouping(self, open: &str) -> Self {
        self.prefix(MIN_BP, NullHandler::Grouping, &[open])
    }

    pub fn build(self) -> OperatorTable {
        debug!(
            "operator table built: {} null entries, {} left entries",
            self.table.null_lookup.len(),
            self.table.left_lookup.len()
        );
        self.table
    }
}

/// The C expression grammar.
///
/// Compare with the C operator precedence table: postfix operators, calls,
/// indexing and member access bind tightest, the comma loosest.
pub fn cexp_table() -> OperatorTable {
    OperatorTable::builder()
        .suffix(BindingPower::Postfix, LeftHandler::Postfix, &["++", "--"])
        .infix_left(BindingPower::Postfix, LeftHandler::Call, &["("])
        .infix_left(BindingPower::Postfix, LeftHandler::Index, &["["])
        .infix_left(BindingPower::Postfix, LeftHandler::Binary, &[".", "->"])
        .suffix(BindingPower::Factorial, LeftHandler::Postfix, &["!"])
        // binds to everything except calls, indexing and postfix operators
        .prefix(BindingPower::Unary, NullHandler::PrefixIncDec, &["++", "--"])
        .prefix(BindingPower::Unary, NullHandler::Prefix, &["+", "!", "~", "-"])
        // 2 ** 3 ** 2 == 2 ** (3 ** 2)
        .infix_right(BindingPower::Exponent, LeftHandler::Binary, &["**"])
        .infix_left(BindingPower::Multiplicative, LeftHandler::Binary, &["*", "/", "%"])
        .infix_left(BindingPower::Additive, LeftHandler::Binary, &["+", "-"])
        .infix_left(BindingPower::Shift, LeftHandler::Binary, &["<<", ">>"])
        .infix_left(BindingPower::Relational, LeftHandler::Binary, &["<", ">", "<=", ">="])
        .infix_left(BindingPower::Equality, LeftHandler::Binary, &["!=", "=="])
        .infix_left(BindingPower::BitwiseAnd, LeftHandler::Binary, &["&"])
        .infix_left(BindingPower::BitwiseXor, LeftHandler::Binary, &["^"])
        .infix_left(BindingPower::BitwiseOr, LeftHandler::Binary, &["|"])
        .infix_left(BindingPower::LogicalAnd, LeftHandler::Binary, &["&&"])
        .infix_left(BindingPower::LogicalOr, LeftHandler::Binary, &["||"])
        .infix_right(BindingPower::Ternary, LeftHandler::Ternary, &["?"])
        // a = b = 2 is a = (b = 2)
        .infix_right(
            BindingPower::Assignment,
            LeftHandler::Assignment,
            &["=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", "&=", "^=", "|="],
        )
        .infix_left(BindingPower::Comma, LeftHandler::Comma, &[","])
        .grouping("(")
        .literal()
        .nilfix(NullHandler::Closing, &[")", "]"])
        .nilfix(NullHandler::Error, &[":"])
        .build()
}

lazy_static! {
    pub static ref CEXP_TABLE: Arc<OperatorTable> = Arc::new(cexp_table());
}
