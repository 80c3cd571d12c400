//! Template and expression parsers.
//!
//! Both scanners are explicit state machines over the input bytes. A state
//! consumes a byte only when it accepts it; otherwise control moves to the
//! next state with the byte left in place.

use alloc::vec::Vec;

use crate::ast::{Expression, Literal, Part, Template, Variable};
use crate::chars;
use crate::error::{Error, ErrorKind};
use crate::modifier::Modifier;
use crate::operator::Operator;

/// Template scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemplateState {
    /// Accumulating literal text.
    Literal,
    /// Accumulating the interior of a `{...}` expression.
    Expression,
}

/// Parses a template string into its parts.
pub(crate) fn parse_template(input: &str) -> Result<Template, Error> {
    let bytes = input.as_bytes();
    let mut parts = Vec::new();
    let mut seg_start = 0;
    let mut state = TemplateState::Literal;

    for (pos, &b) in bytes.iter().enumerate() {
        match state {
            TemplateState::Literal => {
                if b == b'{' {
                    if pos > seg_start {
                        parts.push(Part::Literal(Literal::new(input[seg_start..pos].into())));
                    }
                    seg_start = pos + 1;
                    state = TemplateState::Expression;
                } else if b == b'%' {
                    // a literal `%` must open a pct-encoded triplet
                    if !(pos + 2 < bytes.len()
                        && chars::is_hexdig(bytes[pos + 1])
                        && chars::is_hexdig(bytes[pos + 2]))
                    {
                        return Err(Error::new(ErrorKind::CharNotAllowed, pos));
                    }
                } else if chars::is_literal_disallowed(b) {
                    return Err(Error::new(ErrorKind::CharNotAllowed, pos));
                }
            }
            TemplateState::Expression => {
                if b == b'}' {
                    let expression = parse_expression(&input[seg_start..pos])
                        .map_err(|e| e.offset(seg_start))?;
                    parts.push(Part::Expression(expression));
                    seg_start = pos + 1;
                    state = TemplateState::Literal;
                }
            }
        }
    }

    match state {
        TemplateState::Literal => {
            if input.len() > seg_start {
                parts.push(Part::Literal(Literal::new(input[seg_start..].into())));
            }
        }
        TemplateState::Expression => {
            return Err(Error::new(ErrorKind::UnclosedExpression, input.len()));
        }
    }
    Ok(Template::new(parts))
}

/// Expression scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExprState {
    /// Looking at the optional leading operator character.
    Operator,
    /// Accumulating a variable name.
    VarName,
    /// Looking at the optional modifier character.
    Modifier,
    /// Behind the modifier: prefix digits, or the `,` variable terminator.
    Length,
}

/// Parses the interior of one `{...}` block, without the braces.
pub(crate) fn parse_expression(input: &str) -> Result<Expression, Error> {
    let bytes = input.as_bytes();
    let mut operator = Operator::String;
    let mut variables = Vec::new();

    let mut name_start = 0;
    let mut name_end = 0;
    let mut modifier = Modifier::None;
    let mut len_digits = 0u32;

    let mut pos = 0;
    let mut state = ExprState::Operator;
    while pos < bytes.len() {
        let b = bytes[pos];
        match state {
            ExprState::Operator => {
                state = ExprState::VarName;
                name_start = pos;
                if let Some(op) = Operator::from_byte(b) {
                    operator = op;
                    name_start = pos + 1;
                    pos += 1;
                }
            }
            ExprState::VarName => {
                if chars::is_name_char(b) {
                    pos += 1;
                } else {
                    if pos == name_start {
                        return Err(Error::new(ErrorKind::EmptyVarName, pos));
                    }
                    name_end = pos;
                    state = ExprState::Modifier;
                }
            }
            ExprState::Modifier => {
                state = ExprState::Length;
                if let Some(m) = Modifier::from_byte(b) {
                    modifier = m;
                    pos += 1;
                }
            }
            ExprState::Length => {
                if let (Modifier::MaxLen(n), true) = (modifier, chars::is_digit(b)) {
                    if len_digits == 9 {
                        return Err(Error::new(ErrorKind::MaxLengthOverflow, pos));
                    }
                    len_digits += 1;
                    modifier = Modifier::MaxLen(n * 10 + u32::from(b - b'0'));
                    pos += 1;
                } else if b == b',' {
                    variables.push(Variable::new(&input[name_start..name_end], modifier));
                    modifier = Modifier::None;
                    len_digits = 0;
                    name_start = pos + 1;
                    state = ExprState::VarName;
                    pos += 1;
                } else {
                    return Err(Error::new(ErrorKind::CharNotAllowed, pos));
                }
            }
        }
    }

    // flush the trailing variable; a trailing `,` leaves nothing to flush
    match state {
        ExprState::Operator => {}
        ExprState::VarName => {
            if pos > name_start {
                variables.push(Variable::new(&input[name_start..], Modifier::None));
            }
        }
        ExprState::Modifier | ExprState::Length => {
            variables.push(Variable::new(&input[name_start..name_end], modifier));
        }
    }

    Expression::new(operator, variables)
}
