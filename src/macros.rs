//! Utility macros for the parser.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_COMPOSITE!` - Creates an unparenthesized composite node
//!
//! These macros reduce boilerplate in the lexer and in the expression handlers.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a composite node from an operator tag and its children.
///
/// Without an explicit span, the span is taken from the first and last child,
/// so the children must be in source order.
///
/// # Example
///
/// ```ignore
/// let node = MK_COMPOSITE!("+", vec![left, right]);
/// ```
#[macro_export]
macro_rules! MK_COMPOSITE {
    ($operator:expr, $children:expr) => {{
        let children: Vec<$crate::ast::ast::Node> = $children;
        let span = $crate::ast::ast::span_of(&children);
        $crate::ast::ast::Node::Composite($crate::ast::ast::CompositeNode {
            operator: String::from($operator),
            children,
            parenthesized: false,
            span,
        })
    }};
    ($operator:expr, $children:expr, $span:expr) => {
        $crate::ast::ast::Node::Composite($crate::ast::ast::CompositeNode {
            operator: String::from($operator),
            children: $children,
            parenthesized: false,
            span: $span,
        })
    };
}
