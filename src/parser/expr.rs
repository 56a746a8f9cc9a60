use log::trace;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Token,
    MK_COMPOSITE,
};

use super::{
    lookups::{LeftHandler, LeftSpec, NullHandler, NullSpec, MIN_BP},
    parser::{CommaMode, ParseContext},
};

/// Parses to the right, consuming tokens until one binds no tighter than `rbp`.
///
/// If we see 1*2+ , rbp = 250 and lbp = 230, so stop.
/// If we see 1+2+ , rbp = 230 and lbp = 230, so stop.
/// If we see 1**2**, rbp = 269 and lbp = 270, so keep going.
pub fn parse_expr(parser: &mut ParseContext, rbp: i32) -> Result<Node, Error> {
    parser.descend()?;
    let result = parse_expr_bounded(parser, rbp);
    parser.ascend();
    result
}

fn parse_expr_bounded(parser: &mut ParseContext, rbp: i32) -> Result<Node, Error> {
    if parser.at_eof() {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() },
            parser.get_position(),
        ));
    }

    // First parse NUD
    let token = parser.advance()?;
    let null_spec = *parser.get_table().lookup_null(&token);
    trace!("nud {:?} for `{}` (rbp {})", null_spec.handler, token.value, null_spec.right_bp);

    let mut left = nud(parser, &null_spec, token)?;
    let mut next_bp = null_spec.next_bp;

    // While the next operator binds tighter than rbp, and may follow the previous one, extend lhs
    loop {
        let left_spec = *parser.get_table().lookup_left(parser.current_token());
        if !(rbp < left_spec.left_bp && left_spec.left_bp < next_bp) {
            break;
        }

        let token = parser.advance()?;
        trace!("led {:?} for `{}` (rbp {})", left_spec.handler, token.value, left_spec.right_bp);

        left = led(parser, &left_spec, token, left)?;
        next_bp = left_spec.next_bp;
    }

    Ok(left)
}

fn nud(parser: &mut ParseContext, spec: &NullSpec, token: Token) -> Result<Node, Error> {
    match spec.handler {
        NullHandler::Unregistered => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            token.span.start,
        )),
        NullHandler::Error => Err(Error::new(
            ErrorImpl::NotAPrefixOperator { token: token.value },
            token.span.start,
        )),
        NullHandler::Closing => parse_closing_expr(parser, token),
        NullHandler::Literal => Ok(Node::leaf(token)),
        NullHandler::Grouping => parse_grouping_expr(parser, spec.right_bp),
        NullHandler::Prefix => parse_prefix_expr(parser, token, spec.right_bp),
        NullHandler::PrefixIncDec => parse_prefix_inc_dec_expr(parser, token, spec.right_bp),
    }
}

fn led(parser: &mut ParseContext, spec: &LeftSpec, token: Token, left: Node) -> Result<Node, Error> {
    match spec.handler {
        LeftHandler::Unregistered | LeftHandler::Error => Err(Error::new(
            ErrorImpl::NotAnInfixOrPostfixOperator { token: token.value },
            token.span.start,
        )),
        LeftHandler::Binary => parse_binary_expr(parser, token, left, spec.right_bp),
        LeftHandler::Assignment => parse_assignment_expr(parser, token, left, spec.right_bp),
        LeftHandler::Ternary => parse_ternary_expr(parser, left, spec.right_bp),
        LeftHandler::Comma => parse_comma_expr(parser, left, spec.right_bp),
        LeftHandler::Call => parse_call_expr(parser, left),
        LeftHandler::Index => parse_index_expr(parser, left),
        LeftHandler::Postfix => Ok(parse_postfix_expr(token, left)),
    }
}

/// `)` or `]` where an operand should start: `()` lacks an operand, `a + )` has no opener.
pub fn parse_closing_expr(parser: &mut ParseContext, token: Token) -> Result<Node, Error> {
    let error = match parser.mode() {
        Some(mode) if mode.closing() == token.value => ErrorImpl::UnexpectedToken { token: token.value },
        mode => ErrorImpl::UnmatchedDelimiter {
            expected: mode.map(|mode| String::from(mode.closing())),
            found: token.value,
        },
    };

    Err(Error::new(error, token.span.start))
}

pub fn parse_grouping_expr(parser: &mut ParseContext, rbp: i32) -> Result<Node, Error> {
    let mut expr = parser.delimited(CommaMode::TupleOrGroup, |parser| {
        let expr = parse_expr(parser, rbp)?;
        parser.expect_closing(CommaMode::TupleOrGroup)?;
        Ok(expr)
    })?;

    expr.mark_parenthesized();
    Ok(expr)
}

pub fn parse_prefix_expr(parser: &mut ParseContext, operator: Token, rbp: i32) -> Result<Node, Error> {
    let rhs = parse_expr(parser, rbp)?;
    let span = operator.span.to(&rhs.span());

    Ok(MK_COMPOSITE!(operator.value, vec![rhs], span))
}

/// `++x` or `++x[1]`
pub fn parse_prefix_inc_dec_expr(parser: &mut ParseContext, operator: Token, rbp: i32) -> Result<Node, Error> {
    let rhs = parse_expr(parser, rbp)?;
    ensure_assignable(&rhs)?;
    let span = operator.span.to(&rhs.span());

    Ok(MK_COMPOSITE!(operator.value, vec![rhs], span))
}

/// `x++`, `x--` and `x!`
pub fn parse_postfix_expr(operator: Token, left: Node) -> Node {
    let span = left.span().to(&operator.span);

    MK_COMPOSITE!(format!("post{}", operator.value), vec![left], span)
}

pub fn parse_binary_expr(parser: &mut ParseContext, operator: Token, left: Node, rbp: i32) -> Result<Node, Error> {
    let right = parse_expr(parser, rbp)?;

    Ok(MK_COMPOSITE!(operator.value, vec![left, right]))
}

/// `x = 1`, `a[i] += 1`
pub fn parse_assignment_expr(parser: &mut ParseContext, operator: Token, left: Node, rbp: i32) -> Result<Node, Error> {
    ensure_assignable(&left)?;
    let right = parse_expr(parser, rbp)?;

    Ok(MK_COMPOSITE!(operator.value, vec![left, right]))
}

/// `a > 1 ? x : y`
///
/// The middle operand is parsed as if parenthesized, so any operator is
/// allowed up to the `:`.
pub fn parse_ternary_expr(parser: &mut ParseContext, condition: Node, rbp: i32) -> Result<Node, Error> {
    let then = parse_expr(parser, MIN_BP)?;

    if !parser.at(":") {
        if let Some(error) = parser.misplaced_operator() {
            return Err(error);
        }

        return Err(Error::new(
            ErrorImpl::MalformedTernary { found: parser.current_token().value.clone() },
            parser.get_position(),
        ));
    }
    parser.advance()?;

    let otherwise = parse_expr(parser, rbp)?;

    Ok(MK_COMPOSITE!("?", vec![condition, then, otherwise]))
}

/// `a, b, c` as a single sequence, unless the left side was written in parentheses.
pub fn parse_comma_expr(parser: &mut ParseContext, left: Node, rbp: i32) -> Result<Node, Error> {
    let right = parse_expr(parser, rbp)?;

    match left {
        Node::Composite(mut sequence) if sequence.operator == "," && !sequence.parenthesized => {
            sequence.span = sequence.span.to(&right.span());
            sequence.children.push(right);
            Ok(Node::Composite(sequence))
        }
        left => Ok(MK_COMPOSITE!(",", vec![left, right])),
    }
}

/// `f(a, b)`; the arguments are parsed tightly enough to leave the commas alone.
pub fn parse_call_expr(parser: &mut ParseContext, callee: Node) -> Result<Node, Error> {
    let start = callee.span();
    let mut children = vec![callee];

    let closing = parser.delimited(CommaMode::CallArgs, |parser| {
        let bound = parser.element_bound();

        while !parser.at(")") {
            if parser.at_eof() {
                return Err(parser.unmatched(Some(CommaMode::CallArgs)));
            }

            children.push(parse_expr(parser, bound)?);

            if parser.at(",") {
                parser.advance()?;
            } else {
                break;
            }
        }

        parser.expect_closing(CommaMode::CallArgs)
    })?;

    Ok(MK_COMPOSITE!("call", children, start.to(&closing.span)))
}

/// `f[x+1]` or `f[x][y]`
pub fn parse_index_expr(parser: &mut ParseContext, target: Node) -> Result<Node, Error> {
    let (index, closing) = parser.delimited(CommaMode::IndexArgs, |parser| {
        let bound = parser.element_bound();
        let index = parse_expr(parser, bound)?;
        let closing = parser.expect_closing(CommaMode::IndexArgs)?;
        Ok((index, closing))
    })?;
    let span = target.span().to(&closing.span);

    Ok(MK_COMPOSITE!("get", vec![target, index], span))
}

fn ensure_assignable(target: &Node) -> Result<(), Error> {
    if target.is_assignable() {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::InvalidAssignTarget { target: target.to_string() },
            target.span().start,
        ))
    }
}
