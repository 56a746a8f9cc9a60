//! Lexical analysis for C-like expressions.
//!
//! The lexer turns source text into a lazy stream of tokens:
//!
//! - Identifiers and numbers
//! - Operators, matched longest first (`<<=` before `<<` before `<`)
//! - Syntax characters `( ) [ ] , .`
//! - Whitespace is skipped
//!
//! The stream always ends with a single `EOF` token.

pub mod lexer;
pub mod tokens;
