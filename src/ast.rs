//! Template syntax tree.
//!
//! [`Template::parse`] builds the tree once; every node is immutable
//! afterwards, so a template can be shared across threads and expanded or
//! matched concurrently with independent bindings.

use core::fmt::{self, Write as _};
use core::str::FromStr;

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, ErrorKind};
use crate::expand;
use crate::matcher;
use crate::modifier::Modifier;
use crate::operator::Operator;
use crate::parser;
use crate::value::Context;

/// Literal text part of a template.
///
/// Literal characters are copied verbatim into the expansion and must be
/// found verbatim by the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Literal text.
    text: String,
}

impl Literal {
    /// Creates a literal from text the parser has already validated.
    #[inline]
    #[must_use]
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }

    /// Returns the literal text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the literal length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns whether the literal is empty.
    ///
    /// The parser never produces empty literal parts.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Literal {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Variable specifier: a name plus an optional modifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    /// Variable name.
    name: String,
    /// Variable modifier.
    modifier: Modifier,
}

impl Variable {
    /// Creates a variable specifier.
    #[inline]
    #[must_use]
    pub fn new<S: Into<String>>(name: S, modifier: Modifier) -> Self {
        Self {
            name: name.into(),
            modifier,
        }
    }

    /// Returns the variable name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the modifier.
    #[inline]
    #[must_use]
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    /// Returns whether the variable carries a `:N` prefix modifier.
    #[inline]
    #[must_use]
    pub fn is_prefixed(&self) -> bool {
        matches!(self.modifier, Modifier::MaxLen(_))
    }

    /// Returns whether the variable carries the `*` explode modifier.
    #[inline]
    #[must_use]
    pub fn is_exploded(&self) -> bool {
        matches!(self.modifier, Modifier::Explode)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        fmt::Display::fmt(&self.modifier, f)
    }
}

/// Expression part of a template: an operator plus its variable list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    /// Operator.
    operator: Operator,
    /// Variable specifiers in template order. Never empty.
    variables: Vec<Variable>,
}

impl Expression {
    /// Creates an expression.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::EmptyExpression`] error when `variables` is
    /// empty; an expression defines at least one variable.
    pub fn new(operator: Operator, variables: Vec<Variable>) -> Result<Self, Error> {
        if variables.is_empty() {
            return Err(Error::new(ErrorKind::EmptyExpression, 0));
        }
        Ok(Self {
            operator,
            variables,
        })
    }

    /// Parses the interior of one `{...}` block, without the braces.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, see [`ErrorKind`].
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_template::{Expression, Modifier, Operator};
    ///
    /// let expr = Expression::parse("?x,hello:5,list*")?;
    /// assert_eq!(expr.operator(), Operator::FormQuery);
    /// assert_eq!(expr.variables().len(), 3);
    /// assert_eq!(expr.variables()[1].modifier(), Modifier::MaxLen(5));
    /// # Ok::<_, uri_template::Error>(())
    /// ```
    #[inline]
    pub fn parse(s: &str) -> Result<Self, Error> {
        parser::parse_expression(s)
    }

    /// Returns the operator.
    #[inline]
    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Returns the variable specifiers.
    #[inline]
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        if self.operator != Operator::String {
            f.write_char(char::from(self.operator.start()))?;
        }
        for (i, variable) in self.variables.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            fmt::Display::fmt(variable, f)?;
        }
        f.write_char('}')
    }
}

/// One part of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Part {
    /// Literal text.
    Literal(Literal),
    /// One `{...}` expression.
    Expression(Expression),
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => fmt::Display::fmt(literal, f),
            Self::Expression(expression) => fmt::Display::fmt(expression, f),
        }
    }
}

/// A parsed URI template.
///
/// # Examples
///
/// ```
/// use uri_template::{Context, Template};
///
/// let template = Template::parse("/users/{username}{?fields*}")?;
///
/// let mut context = Context::new();
/// context.insert("username", "foo");
/// assert_eq!(template.expand(&context), "/users/foo");
/// # Ok::<_, uri_template::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template {
    /// Template parts in order.
    parts: Vec<Part>,
}

impl Template {
    /// Creates a template from already-parsed parts.
    #[inline]
    #[must_use]
    pub(crate) fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Fails on malformed input: a disallowed character in a literal, an
    /// unterminated `{...}`, an empty expression or variable name, or an
    /// overlong prefix length. See [`ErrorKind`].
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_template::Template;
    ///
    /// assert!(Template::parse("/users/{username}").is_ok());
    /// assert!(Template::parse("/users/{username").is_err());
    /// ```
    #[inline]
    pub fn parse(s: &str) -> Result<Self, Error> {
        parser::parse_template(s)
    }

    /// Returns the parts of the template.
    #[inline]
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Returns the number of parts.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns whether the template has no parts.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns whether the template contains any expression.
    ///
    /// An empty template, or one consisting of a single literal, is not
    /// templated.
    #[must_use]
    pub fn is_templated(&self) -> bool {
        !matches!(self.parts.as_slice(), [] | [Part::Literal(_)])
    }

    /// Expands the template with the given bindings.
    ///
    /// Variables without a binding (or bound to [`Value::Undefined`]) expand
    /// to nothing. Expansion never fails for a parsed template.
    ///
    /// [`Value::Undefined`]: crate::Value::Undefined
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_template::{Context, Template, Value};
    ///
    /// let template = Template::parse("{/list*}")?;
    ///
    /// let mut context = Context::new();
    /// context.insert("list", Value::from_list(["red", "green", "blue"]));
    /// assert_eq!(template.expand(&context), "/red/green/blue");
    /// # Ok::<_, uri_template::Error>(())
    /// ```
    #[must_use]
    pub fn expand(&self, context: &Context) -> String {
        expand::expand_template(self, context)
    }

    /// Matches `uri` against the template.
    ///
    /// Returns whether the whole of `uri` can be produced by expanding this
    /// template under some bindings. When `values` is given, the recovered
    /// bindings are stored into it; variables that took no part in the match
    /// are recorded as [`Value::Undefined`]. Pass `None` to only test
    /// matchability.
    ///
    /// [`Value::Undefined`]: crate::Value::Undefined
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_template::{Context, Template, Value};
    ///
    /// let template = Template::parse("/users{/id}{?fields}")?;
    ///
    /// let mut values = Context::new();
    /// assert!(template.match_uri("/users/42?fields=name,email", Some(&mut values)));
    /// assert_eq!(values.get("id"), Some(&Value::String("42".into())));
    /// assert_eq!(values.get("fields"), Some(&Value::from_list(["name", "email"])));
    ///
    /// assert!(!template.match_uri("/groups/42", None));
    /// # Ok::<_, uri_template::Error>(())
    /// ```
    pub fn match_uri(&self, uri: &str, values: Option<&mut Context>) -> bool {
        matcher::match_uri(self, uri, values)
    }
}

impl FromStr for Template {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.parts
            .iter()
            .try_for_each(|part| fmt::Display::fmt(part, f))
    }
}

/// Serde integration: a template serializes as its string form and
/// deserializes through the parser.
#[cfg(feature = "serde")]
mod serde_impls {
    use core::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Template;

    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    impl Serialize for Template {
        #[inline]
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    /// Template string visitor.
    struct TemplateVisitor;

    impl<'de> Visitor<'de> for TemplateVisitor {
        type Value = Template;

        #[inline]
        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("URI template string")
        }

        #[inline]
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Template::parse(v).map_err(E::custom)
        }
    }

    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    impl<'de> Deserialize<'de> for Template {
        #[inline]
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(TemplateVisitor)
        }
    }
}
