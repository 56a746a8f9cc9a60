//! Parser module for building expression trees.
//!
//! This module contains a top-down operator precedence (Pratt) parser. The
//! grammar lives entirely in an operator table:
//!
//! - NUD (null denotation) entries for tokens that start an operand
//! - LED (left denotation) entries for tokens that follow one
//! - Binding powers that encode precedence and associativity
//!
//! The core procedure consults the table and never knows any operator by name.

pub mod expr;
pub mod lookups;
pub mod parser;

#[cfg(test)]
mod tests;
