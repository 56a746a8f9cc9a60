use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A failure raised while lexing or parsing, anchored at a source position.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::LexicalError { .. } => "LexicalError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NotAPrefixOperator { .. } => "NotAPrefixOperator",
            ErrorImpl::NotAnInfixOrPostfixOperator { .. } => "NotAnInfixOrPostfixOperator",
            ErrorImpl::UnmatchedDelimiter { .. } => "UnmatchedDelimiter",
            ErrorImpl::InvalidAssignTarget { .. } => "InvalidAssignTarget",
            ErrorImpl::MalformedTernary { .. } => "MalformedTernary",
            ErrorImpl::TrailingInput { .. } => "TrailingInput",
            ErrorImpl::ExpressionTooDeep { .. } => "ExpressionTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::LexicalError { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected an operand",
                token
            )),
            ErrorImpl::NotAPrefixOperator { token } => ErrorTip::Suggestion(format!(
                "`{}` needs an operand on its left",
                token
            )),
            ErrorImpl::NotAnInfixOrPostfixOperator { token } => ErrorTip::Suggestion(format!(
                "`{}` can only start an operand, did you miss an operator?",
                token
            )),
            ErrorImpl::UnmatchedDelimiter { expected: Some(expected), found } => {
                ErrorTip::Suggestion(format!("Expected `{}`, found `{}`", expected, found))
            }
            ErrorImpl::UnmatchedDelimiter { expected: None, found } => {
                ErrorTip::Suggestion(format!("`{}` closes nothing", found))
            }
            ErrorImpl::InvalidAssignTarget { target } => ErrorTip::Suggestion(format!(
                "`{}` is not a variable or an indexed element",
                target
            )),
            ErrorImpl::MalformedTernary { found } => ErrorTip::Suggestion(format!(
                "Expected `:` of the conditional, found `{}`",
                found
            )),
            ErrorImpl::TrailingInput { token } => ErrorTip::Suggestion(format!(
                "Unparsed input starting at `{}`",
                token
            )),
            ErrorImpl::ExpressionTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Nesting is limited to {} levels",
                limit
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("{character:?} unexpected")]
    LexicalError { character: char },
    #[error("unexpected token {token:?}")]
    UnexpectedToken { token: String },
    #[error("{token} can't be used in prefix position")]
    NotAPrefixOperator { token: String },
    #[error("{token} can't be used in infix position")]
    NotAnInfixOrPostfixOperator { token: String },
    #[error("{}", unmatched_message(.expected, .found))]
    UnmatchedDelimiter { expected: Option<String>, found: String },
    #[error("can't assign to {target}")]
    InvalidAssignTarget { target: String },
    #[error("expected : in conditional expression, got {found}")]
    MalformedTernary { found: String },
    #[error("there are unparsed tokens: {token:?}")]
    TrailingInput { token: String },
    #[error("expression nested deeper than {limit} levels")]
    ExpressionTooDeep { limit: usize },
}

fn unmatched_message(expected: &Option<String>, found: &str) -> String {
    match expected {
        Some(expected) => format!("expected {}, got {}", expected, found),
        None => format!("unmatched {}", found),
    }
}
