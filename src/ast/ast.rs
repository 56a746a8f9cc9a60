use std::fmt::Display;

use crate::{
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

/// Expression tree node.
///
/// A leaf wraps the identifier or number token it was built from. A composite
/// carries an operator tag (a registered symbol, or one of the synthetic tags
/// `call`, `get`, `post<op>`) and its operands in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Token),
    Composite(CompositeNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeNode {
    pub operator: String,
    pub children: Vec<Node>,
    /// Set when the node was written inside `( ... )`. Stops comma flattening.
    pub parenthesized: bool,
    pub span: Span,
}

impl Node {
    pub fn leaf(token: Token) -> Self {
        Node::Leaf(token)
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Leaf(token) => token.span,
            Node::Composite(composite) => composite.span,
        }
    }

    /// Operator tag of a composite, `None` for leaves.
    pub fn operator(&self) -> Option<&str> {
        match self {
            Node::Leaf(_) => None,
            Node::Composite(composite) => Some(&composite.operator),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Composite(composite) => &composite.children,
        }
    }

    pub fn is_parenthesized(&self) -> bool {
        matches!(self, Node::Composite(composite) if composite.parenthesized)
    }

    /// Records that the node was written inside `( ... )`.
    ///
    /// Leaves are unaffected, grouping a single operand changes nothing.
    pub fn mark_parenthesized(&mut self) {
        if let Node::Composite(composite) = self {
            composite.parenthesized = true;
        }
    }

    /// True for nodes that may appear on the left of `=` or under `++`/`--`:
    /// identifiers and index expressions.
    pub fn is_assignable(&self) -> bool {
        match self {
            Node::Leaf(token) => token.kind == TokenKind::Identifier,
            Node::Composite(composite) => composite.operator == "get",
        }
    }
}

/// Span covering the first through the last node.
pub fn span_of(nodes: &[Node]) -> Span {
    match (nodes.first(), nodes.last()) {
        (Some(first), Some(last)) => first.span().to(&last.span()),
        _ => Span {
            start: Position::null(),
            end: Position::null(),
        },
    }
}

/// Canonical s-expression form: `a+b*c` renders as `(+ a (* b c))`.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Leaf(token) => write!(f, "{}", token.value),
            Node::Composite(composite) => write!(f, "{}", composite),
        }
    }
}

impl Display for CompositeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}", self.operator)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}
