//! Matching a concrete URI back against a template.
//!
//! Matching is the inverse of expansion: recover bindings that, expanded
//! again, would reproduce the observed string. Literal parts are anchored
//! first; expressions are then fitted into the spans between the anchors.
//! Inside an expression the scan has to resolve where one variable's text
//! ends and the next begins, and whether a capture is a scalar, a list or an
//! associative array.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use crate::ast::{Expression, Literal, Part, Template, Variable};
use crate::chars;
use crate::operator::Operator;
use crate::value::{Context, Value};

/// A matched span, `[start, end)` in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Match {
    /// Start of the span.
    start: usize,
    /// End of the span, exclusive.
    end: usize,
}

impl Match {
    /// Creates a span.
    #[inline]
    #[must_use]
    fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the start of the span.
    #[inline]
    #[must_use]
    pub(crate) fn start(&self) -> usize {
        self.start
    }

    /// Returns the end of the span.
    #[inline]
    #[must_use]
    pub(crate) fn end(&self) -> usize {
        self.end
    }
}

/// Finds `needle` in `haystack` at or after `start`.
#[cfg(feature = "memchr")]
#[inline]
fn find_from(haystack: &str, needle: &str, start: usize) -> Option<usize> {
    memchr::memmem::find(&haystack.as_bytes()[start..], needle.as_bytes()).map(|i| start + i)
}

/// Finds `needle` in `haystack` at or after `start`.
#[cfg(not(feature = "memchr"))]
#[inline]
fn find_from(haystack: &str, needle: &str, start: usize) -> Option<usize> {
    haystack[start..].find(needle).map(|i| start + i)
}

/// Matches a literal at or after `start`.
///
/// With `exact_start` the literal must appear exactly at `start`; otherwise
/// its first occurrence at or after `start` is taken.
pub(crate) fn match_literal(
    literal: &Literal,
    text: &str,
    start: usize,
    exact_start: bool,
) -> Option<Match> {
    let lit = literal.as_str();
    if start + lit.len() > text.len() {
        return None;
    }
    if exact_start {
        if !text[start..].starts_with(lit) {
            return None;
        }
        return Some(Match::new(start, start + lit.len()));
    }
    let found = find_from(text, lit, start)?;
    Some(Match::new(found, found + lit.len()))
}

/// Scanner mode inside a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VarScan {
    /// Reading a name.
    Name,
    /// Reading a value.
    Value,
}

/// Structural shape inferred for a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// A single scalar value.
    String,
    /// A list of values.
    List,
    /// Name/value pairs.
    Assoc,
}

/// Reconstructs a variable value from its captured text.
///
/// A `None` capture means the variable consumed no text at all; that is an
/// empty list for exploded variables (composite semantics model absence as
/// emptiness) and undefined otherwise.
pub(crate) fn match_var_value(
    variable: &Variable,
    oper: Operator,
    capture: Option<&str>,
) -> Option<Value> {
    let text = match capture {
        Some(text) => text,
        None => {
            return Some(if variable.is_exploded() {
                Value::List(Vec::new())
            } else {
                Value::Undefined
            });
        }
    };

    if oper.allows_reserved() {
        // every character was legal, so the structure is not recoverable;
        // take the capture verbatim
        return Some(Value::String(text.to_string()));
    }

    let bytes = text.as_bytes();
    let sep = oper.separator();
    let mut names: Vec<&str> = Vec::new();
    let mut values: Vec<&str> = Vec::new();
    let mut shape = Shape::String;
    let mut piece_start = 0;
    let mut pos = 0;
    let mut mode = if oper.is_named() {
        VarScan::Name
    } else {
        VarScan::Value
    };

    while pos < bytes.len() {
        let b = bytes[pos];
        match mode {
            VarScan::Name => {
                if b == b'=' {
                    if variable.is_exploded() {
                        shape = Shape::Assoc;
                    } else if !oper.is_named() {
                        // '=' needs a named or exploded context
                        return None;
                    }
                    names.push(&text[piece_start..pos]);
                    piece_start = pos + 1;
                    mode = VarScan::Value;
                }
            }
            VarScan::Value => {
                if b == b'=' {
                    // re-examine the '=' in name mode: the piece read so far
                    // was the next pair's name, not a value
                    mode = VarScan::Name;
                    continue;
                } else if b == b',' {
                    shape = Shape::List;
                    values.push(&text[piece_start..pos]);
                    piece_start = pos + 1;
                } else if b == sep {
                    if b == b'.' && pos + 1 < bytes.len() && (bytes[pos + 1] == b'.' || bytes[pos + 1] == b',') {
                        // a run of '.' or '.,' under the label operator is
                        // value content, not a boundary
                    } else {
                        if variable.is_exploded() && shape == Shape::String {
                            shape = Shape::List;
                        }
                        values.push(&text[piece_start..pos]);
                        piece_start = pos + 1;
                    }
                }
            }
        }
        pos += 1;
    }
    match mode {
        VarScan::Name => {
            names.push(&text[piece_start..]);
            if !oper.empty_eq() {
                values.push("");
            }
        }
        VarScan::Value => values.push(&text[piece_start..]),
    }

    match shape {
        Shape::String => {
            if oper.is_named() && (names.len() != 1 || names[0] != variable.name()) {
                // a named scalar starts with its own name
                return None;
            }
            if values.len() != 1 {
                return None;
            }
            Some(Value::String(values[0].to_string()))
        }
        Shape::List => Some(Value::List(values.iter().map(|v| v.to_string()).collect())),
        Shape::Assoc => {
            if names.len() != values.len() {
                return None;
            }
            let distinct: BTreeSet<&str> = names.iter().copied().collect();
            if distinct.len() == 1 && names[0] == variable.name() {
                // repeated occurrences of the variable itself, as produced
                // by exploded list expansion under a named operator
                Some(Value::List(values.iter().map(|v| v.to_string()).collect()))
            } else if distinct.len() == values.len() {
                let pairs: BTreeMap<_, _> = names
                    .iter()
                    .zip(&values)
                    .map(|(n, v)| (n.to_string(), v.to_string()))
                    .collect();
                Some(Value::Assoc(pairs))
            } else {
                None
            }
        }
    }
}

/// Grows `capture` to include the byte at `pos`, seeding it when absent.
#[inline]
fn extend(capture: &mut Option<(usize, usize)>, pos: usize) {
    *capture = Some(match *capture {
        Some((start, _)) => (start, pos + 1),
        None => (pos, pos + 1),
    });
}

/// Reconstructs the value for the variable owning `capture` and stores it.
///
/// Named operators look ahead: when the capture does not begin with the name
/// of the variable expected next, intermediate variables are skipped and
/// recorded as undefined until one matching by name (or the first exploded
/// variable) is found. Returns the variable index to continue from.
fn dispatch(
    expression: &Expression,
    text: &str,
    capture: Option<(usize, usize)>,
    var_idx: usize,
    values: &mut Option<&mut Context>,
) -> Option<usize> {
    let oper = expression.operator();
    let vars = expression.variables();
    let raw = capture.map(|(start, end)| &text[start..end]);

    let mut idx = var_idx;
    if let Some(raw) = raw.filter(|_| oper.is_named() && var_idx != vars.len() - 1) {
        let mut found = None;
        for (probe, variable) in vars.iter().enumerate().skip(idx) {
            if variable.is_exploded() || raw.starts_with(variable.name()) {
                found = Some(probe);
                break;
            }
            if let Some(context) = values.as_deref_mut() {
                if context.get(variable.name()).is_none() {
                    context.insert(variable.name(), Value::Undefined);
                }
            }
        }
        if let Some(probe) = found {
            idx = probe;
        }
    }

    let variable = &vars[idx];
    let value = match_var_value(variable, oper, raw)?;
    if let Some(context) = values.as_deref_mut() {
        context.insert(variable.name(), value);
    }
    Some(idx + 1)
}

/// Expression scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExprScan {
    /// Expecting the operator start character, where it is part of the text.
    Operator,
    /// Capturing variable text.
    Variable,
}

/// Matches one expression over `text[start..end]`.
///
/// `terminator` stops the scan in front of an adjacent expression's start
/// character. The returned span may stop early; the caller decides whether
/// the stop position is acceptable. Recovered values go into `values`;
/// variables that captured nothing are recorded as undefined.
pub(crate) fn match_expression(
    expression: &Expression,
    text: &str,
    start: usize,
    end: usize,
    terminator: Option<u8>,
    mut values: Option<&mut Context>,
) -> Option<Match> {
    if start > end || start > text.len() {
        return None;
    }

    let bytes = text.as_bytes();
    let oper = expression.operator();
    let vars = expression.variables();

    let mut var_idx = 0;
    let mut capture: Option<(usize, usize)> = None;
    let mut pos = start;
    let mut state = ExprScan::Operator;

    while pos < bytes.len() && pos < end {
        let b = bytes[pos];

        if state == ExprScan::Operator {
            if oper.start_expanded() {
                if b != oper.start() {
                    // the start character is absent, which only happens when
                    // every variable is undefined
                    break;
                }
                state = ExprScan::Variable;
                // text behind the start character belongs to the first
                // variable, even when it turns out empty
                capture = Some((pos + 1, pos + 1));
                pos += 1;
                continue;
            }
            state = ExprScan::Variable;
        }

        let char_allowed = oper.allows_reserved()
            || chars::is_value_char(b)
            || (b == b'=' && (oper.is_named() || vars[var_idx].is_exploded()));

        if terminator == Some(b) {
            // the last variable before the adjacent expression
            var_idx = dispatch(expression, text, capture.take(), var_idx, &mut values)?;
            break;
        } else if char_allowed && var_idx == vars.len() - 1 {
            // the last variable captures greedily
            extend(&mut capture, pos);
        } else if b == oper.separator() {
            if vars[var_idx].is_exploded() {
                // separators inside an exploded capture are content
                extend(&mut capture, pos);
            } else {
                if capture.is_none() {
                    capture = Some((pos, pos));
                }
                var_idx = dispatch(expression, text, capture.take(), var_idx, &mut values)?;
                if var_idx == vars.len() {
                    break;
                }
                capture = Some((pos + 1, pos + 1));
            }
        } else if char_allowed {
            extend(&mut capture, pos);
        } else {
            // a foreign character stops the scan without failing; the
            // caller validates where the span ended
            break;
        }

        pos += 1;
    }

    // dispatch the capture left in progress
    if capture.is_some() && var_idx < vars.len() {
        var_idx = dispatch(expression, text, capture, var_idx, &mut values)?;
    }
    // variables never visited stay undefined
    if let Some(context) = values.as_deref_mut() {
        for variable in &vars[var_idx..] {
            if context.get(variable.name()).is_none() {
                context.insert(variable.name(), Value::Undefined);
            }
        }
    }
    Some(Match::new(start, pos))
}

/// Matches a whole URI against a template.
pub(crate) fn match_uri(template: &Template, uri: &str, mut values: Option<&mut Context>) -> bool {
    let parts = template.parts();
    if parts.is_empty() {
        return uri.is_empty();
    }

    let mut matches: Vec<Option<Match>> = vec![None; parts.len()];

    // anchor every literal first, each behind the previous anchor
    let mut pos = 0;
    for (i, part) in parts.iter().enumerate() {
        let literal = match part {
            Part::Literal(literal) => literal,
            Part::Expression(_) => continue,
        };
        let matched = match match_literal(literal, uri, pos, i == 0) {
            Some(matched) => matched,
            None => return false,
        };
        pos = matched.end();
        matches[i] = Some(matched);
    }

    // fit expressions into the spans between the anchors
    let mut pos = 0;
    for i in 0..parts.len() {
        if let Some(matched) = matches[i] {
            pos = matched.end();
            continue;
        }
        let expression = match &parts[i] {
            Part::Expression(expression) => expression,
            Part::Literal(_) => unreachable!("[consistency] literals are anchored in the first pass"),
        };

        // the nearest anchored part bounds this expression; an adjacent
        // unanchored expression contributes a terminator character instead,
        // unless that character could be mistaken for our own separator
        let mut end = usize::MAX;
        let mut next_anchored = false;
        let mut terminator = None;
        for j in (i + 1)..parts.len() {
            if let Some(matched) = matches[j] {
                end = matched.start();
                next_anchored = j == i + 1;
                break;
            }
            let next_oper = match &parts[j] {
                Part::Expression(expression) => expression.operator(),
                Part::Literal(_) => {
                    unreachable!("[consistency] literals are anchored in the first pass")
                }
            };
            if !next_oper.start_expanded() {
                continue;
            }
            if next_oper.start() == expression.operator().separator() {
                continue;
            }
            terminator = Some(next_oper.start());
            break;
        }

        let matched = match match_expression(expression, uri, pos, end, terminator, values.as_deref_mut()) {
            Some(matched) => matched,
            None => return false,
        };
        if next_anchored && matched.end() != end {
            // the expression did not reach the following literal
            return false;
        }
        if i == parts.len() - 1 && matched.end() != uri.len() {
            // the last part must consume the rest of the URI
            return false;
        }
        pos = matched.end();
        matches[i] = Some(matched);
    }

    true
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::modifier::Modifier;

    use super::*;

    fn literal(s: &str) -> Literal {
        Literal::new(String::from(s))
    }

    fn variable(name: &str, modifier: Modifier) -> Variable {
        Variable::new(name, modifier)
    }

    #[test]
    fn literal_exact_start() {
        let m = match_literal(&literal("/users"), "/users/42", 0, true).unwrap();
        assert_eq!((m.start(), m.end()), (0, 6));

        assert!(match_literal(&literal("users"), "/users/42", 0, true).is_none());
        assert!(match_literal(&literal("/users/42/posts"), "/users/42", 0, true).is_none());
    }

    #[test]
    fn literal_searches_forward() {
        let m = match_literal(&literal("index"), "http%3A%2F%2Fhost%2Findex", 0, false).unwrap();
        assert_eq!((m.start(), m.end()), (20, 25));

        let m = match_literal(&literal("/here"), "up/foo/barvalue/here", 2, false).unwrap();
        assert_eq!(m.start(), 15);

        assert!(match_literal(&literal("gone"), "abc", 0, false).is_none());
    }

    #[test]
    fn var_value_absent_capture() {
        let plain = variable("x", Modifier::None);
        let exploded = variable("x", Modifier::Explode);

        assert_eq!(
            match_var_value(&plain, Operator::String, None),
            Some(Value::Undefined)
        );
        assert_eq!(
            match_var_value(&exploded, Operator::String, None),
            Some(Value::List(Vec::new()))
        );
    }

    #[test]
    fn var_value_reserved_is_verbatim() {
        let var = variable("path", Modifier::None);
        assert_eq!(
            match_var_value(&var, Operator::Reserved, Some("/a/b,c=d;e")),
            Some(Value::String("/a/b,c=d;e".into()))
        );
    }

    #[test]
    fn var_value_scalar_and_list() {
        let var = variable("x", Modifier::None);
        assert_eq!(
            match_var_value(&var, Operator::String, Some("1024")),
            Some(Value::String("1024".into()))
        );
        assert_eq!(
            match_var_value(&var, Operator::String, Some("red,green,blue")),
            Some(Value::from_list(["red", "green", "blue"]))
        );
        // '=' is not legal in a plain simple-string capture
        assert_eq!(match_var_value(&var, Operator::String, Some("a=b")), None);
    }

    #[test]
    fn var_value_named_scalar_requires_own_name() {
        let var = variable("who", Modifier::None);
        assert_eq!(
            match_var_value(&var, Operator::PathParams, Some("who=fred")),
            Some(Value::String("fred".into()))
        );
        assert_eq!(
            match_var_value(&var, Operator::PathParams, Some("other=fred")),
            None
        );
        // empty_eq decides whether a bare name carries an empty value
        assert_eq!(
            match_var_value(&var, Operator::PathParams, Some("who")),
            Some(Value::String("".into()))
        );
        assert_eq!(match_var_value(&var, Operator::FormQuery, Some("who")), None);
    }

    #[test]
    fn var_value_exploded_classification() {
        let var = variable("keys", Modifier::Explode);

        // repeated occurrences of the variable name form a list
        assert_eq!(
            match_var_value(&var, Operator::PathParams, Some("keys=a;keys=b")),
            Some(Value::from_list(["a", "b"]))
        );
        // distinct names with matching counts form an associative array
        assert_eq!(
            match_var_value(&var, Operator::PathParams, Some("semi=%3B;dot=.;comma=%2C")),
            Some(Value::from_assoc([
                ("semi", "%3B"),
                ("dot", "."),
                ("comma", "%2C"),
            ]))
        );
        // mixed duplicate and distinct names match nothing
        assert_eq!(
            match_var_value(&var, Operator::PathParams, Some("a=1;a=2;b=3")),
            None
        );
    }

    #[test]
    fn var_value_label_dots_are_greedy() {
        let var = variable("keys", Modifier::None);
        assert_eq!(
            match_var_value(&var, Operator::Label, Some("semi,%3B,dot,.,comma,%2C")),
            Some(Value::from_list(["semi", "%3B", "dot", ".", "comma", "%2C"]))
        );
    }

    #[test]
    fn expression_spans() {
        let expression = Expression::parse("x,y").unwrap();
        let mut values = Context::new();
        let m = match_expression(&expression, "1024,768", 0, usize::MAX, None, Some(&mut values))
            .unwrap();
        assert_eq!((m.start(), m.end()), (0, 8));
        assert_eq!(values.get("x"), Some(&Value::String("1024".into())));
        assert_eq!(values.get("y"), Some(&Value::String("768".into())));
    }

    #[test]
    fn expression_stops_at_terminator() {
        let expression = Expression::parse("/id*").unwrap();
        let mut values = Context::new();
        let m = match_expression(
            &expression,
            "/person/albums?fields=id",
            0,
            usize::MAX,
            Some(b'?'),
            Some(&mut values),
        )
        .unwrap();
        assert_eq!(m.end(), 14);
        assert_eq!(values.get("id"), Some(&Value::from_list(["person", "albums"])));
    }

    #[test]
    fn expression_with_absent_start_is_empty() {
        let expression = Expression::parse(".who").unwrap();
        let mut values = Context::new();
        let m = match_expression(&expression, "value", 0, usize::MAX, None, Some(&mut values))
            .unwrap();
        assert_eq!((m.start(), m.end()), (0, 0));
        assert_eq!(values.get("who"), Some(&Value::Undefined));
    }

    #[test]
    fn expression_stops_at_foreign_character() {
        let expression = Expression::parse("val").unwrap();
        let m = match_expression(&expression, "foo:bar", 0, usize::MAX, None, None).unwrap();
        assert_eq!((m.start(), m.end()), (0, 3));
    }
}
