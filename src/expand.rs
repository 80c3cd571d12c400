//! Template expansion.

use core::mem;

use alloc::string::String;

use crate::ast::{Expression, Part, Template};
use crate::operator::Operator;
use crate::percent_encode::pct_encode;
use crate::value::{Context, Value};

/// Expands a whole template.
pub(crate) fn expand_template(template: &Template, context: &Context) -> String {
    let mut out = String::new();
    for part in template.parts() {
        match part {
            Part::Literal(literal) => out.push_str(literal.as_str()),
            Part::Expression(expression) => expand_expression(&mut out, expression, context),
        }
    }
    out
}

/// Expands one expression into `out`.
///
/// Variables expand in template order; undefined ones emit nothing and do
/// not consume a first/separator slot.
///
/// # Panics
///
/// Panics when the expression has no variables. [`Expression`] construction
/// rejects that shape, so reaching the panic means a bug in the caller.
pub(crate) fn expand_expression(out: &mut String, expression: &Expression, context: &Context) {
    assert!(
        !expression.variables().is_empty(),
        "expression must define at least one variable"
    );
    let oper = expression.operator();

    let mut first = true;
    for variable in expression.variables() {
        let value = context.get(variable.name()).unwrap_or(&Value::Undefined);
        match value {
            Value::Undefined => {}
            Value::String(s) => {
                let max_len = variable.modifier().max_len().map(|n| n as usize);
                emit(out, oper, &mut first, variable.name(), s, max_len, oper.is_named(), true);
            }
            Value::List(items) => {
                if variable.is_exploded() {
                    for item in items {
                        emit(out, oper, &mut first, variable.name(), item, None, oper.is_named(), true);
                    }
                } else {
                    let mut joined = String::new();
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            joined.push(',');
                        }
                        pct_encode(&mut joined, item, oper.allows_reserved(), None);
                    }
                    emit(out, oper, &mut first, variable.name(), &joined, None, oper.is_named(), false);
                }
            }
            Value::Assoc(pairs) => {
                if variable.is_exploded() {
                    for (key, val) in pairs {
                        let mut name = String::new();
                        pct_encode(&mut name, key, oper.allows_reserved(), None);
                        // exploded pairs are always emitted as name=value
                        emit(out, oper, &mut first, &name, val, None, true, true);
                    }
                } else {
                    let mut joined = String::new();
                    for (i, (key, val)) in pairs.iter().enumerate() {
                        if i > 0 {
                            joined.push(',');
                        }
                        pct_encode(&mut joined, key, oper.allows_reserved(), None);
                        joined.push(',');
                        pct_encode(&mut joined, val, oper.allows_reserved(), None);
                    }
                    emit(out, oper, &mut first, variable.name(), &joined, None, oper.is_named(), false);
                }
            }
        }
    }
}

/// Emits one variable expansion: the first/separator character, the `name=`
/// prefix for named emissions, then the (possibly encoded and truncated)
/// value.
#[allow(clippy::too_many_arguments)]
fn emit(
    out: &mut String,
    oper: Operator,
    first: &mut bool,
    name: &str,
    value: &str,
    max_len: Option<usize>,
    named: bool,
    encode: bool,
) {
    if mem::replace(first, false) {
        if let Some(b) = oper.first() {
            out.push(char::from(b));
        }
    } else {
        out.push(char::from(oper.separator()));
    }

    if named {
        out.push_str(name);
        if !value.is_empty() || oper.empty_eq() {
            out.push('=');
        }
    }

    if encode {
        pct_encode(out, value, oper.allows_reserved(), max_len);
    } else {
        out.push_str(value);
    }
}
