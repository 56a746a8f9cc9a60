//! Error types and error handling for the parser.
//!
//! This module defines the error types shared by the lexer and the parser:
//!
//! - Error structures with source position information
//! - One variant per failure kind
//! - Error names and suggestions for diagnostics

pub mod errors;
