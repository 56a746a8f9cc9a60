//! Infix rendering.
//!
//! Turns a tree back into source text for the C expression grammar. Every
//! composite is wrapped in parentheses, so re-parsing the output reproduces
//! the same s-expression; grouping also keeps nested comma sequences apart.

use super::ast::Node;

impl Node {
    pub fn to_infix(&self) -> String {
        let (operator, children) = match self {
            Node::Leaf(token) => return token.value.clone(),
            Node::Composite(composite) => (composite.operator.as_str(), &composite.children),
        };

        let parts: Vec<String> = children.iter().map(Node::to_infix).collect();

        let body = match (operator, parts.as_slice()) {
            ("call", [callee, args @ ..]) => format!("{}({})", callee, args.join(", ")),
            ("get", [target, index]) => format!("{}[{}]", target, index),
            ("?", [condition, then, otherwise]) => {
                format!("{} ? {} : {}", condition, then, otherwise)
            }
            (postfix, [operand]) if postfix.starts_with("post") => {
                format!("{} {}", operand, &postfix["post".len()..])
            }
            (prefix, [operand]) => format!("{} {}", prefix, operand),
            (infix, operands) => operands.join(&format!(" {} ", infix)),
        };

        format!("({})", body)
    }
}
