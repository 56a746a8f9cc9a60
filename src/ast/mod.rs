/// AST (Abstract Syntax Tree) module
/// Contains the node model produced by the expression parser
///
/// Submodules:
/// - ast: Leaf and composite nodes, s-expression rendering
/// - render: Fully parenthesized infix rendering
pub mod ast;
pub mod render;
