#![allow(clippy::module_inception)]

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod selftest;

extern crate regex;

pub use ast::ast::{CompositeNode, Node};
pub use errors::errors::ErrorImpl;
pub use parser::lookups::{OperatorTable, OperatorTableBuilder};
pub use parser::parser::{parse, Parser, ParserConfig};

/// Byte offset into the parsed source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position(pub u32);

impl Position {
    pub fn null() -> Self {
        Position(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Finds the line holding `position`.
///
/// Returns the 1-based line number, the line text and the column of the
/// position inside that line. A position at the very end of the source maps
/// to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    if source.is_empty() || source.ends_with('\n') {
        return (line_number, String::new(), 0);
    }

    let last_line = source.rsplit('\n').next().unwrap_or_default();
    (line_number - 1, last_line.to_string(), last_line.len())
}


/// Renders a caret diagnostic for `error` against the source it came from.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: UnexpectedToken (message)
        -> <input>
          |
        1 | a + )
          | ----^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str("-> <input>\n");
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

pub fn display_error(error: &Error, source: &str) {
    print!("{}", render_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
