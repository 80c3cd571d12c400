//! Parse error types.

use core::fmt;

/// Template parse error.
///
/// Returned when a template or expression string is malformed. Failure to
/// match a URI against a template is not an error; it is reported through
/// ordinary return values instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    /// Error kind.
    kind: ErrorKind,
    /// Byte position in the input where the error was detected.
    location: usize,
}

impl Error {
    /// Creates a new error.
    #[inline]
    #[must_use]
    pub(crate) fn new(kind: ErrorKind, location: usize) -> Self {
        Self { kind, location }
    }

    /// Shifts the location by `offset`.
    ///
    /// Converts an expression-relative position into a template-relative one.
    #[inline]
    #[must_use]
    pub(crate) fn offset(self, offset: usize) -> Self {
        Self {
            kind: self.kind,
            location: self.location + offset,
        }
    }

    /// Returns the error kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_template::{ErrorKind, Template};
    ///
    /// let e = Template::parse("{}").expect_err("the expression is empty");
    /// assert_eq!(e.kind(), ErrorKind::EmptyExpression);
    /// ```
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the byte position in the input where the error was detected.
    #[inline]
    #[must_use]
    pub fn location(&self) -> usize {
        self.location
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ErrorKind::CharNotAllowed => "character not allowed",
            ErrorKind::UnclosedExpression => "closing brace of an expression is missing",
            ErrorKind::EmptyExpression => "expression has no variables",
            ErrorKind::EmptyVarName => "variable name is empty",
            ErrorKind::MaxLengthOverflow => "prefix length has more than 9 digits",
        };
        write!(
            f,
            "template parse failed: {} (at byte {})",
            msg, self.location
        )
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

/// Parse error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A character outside the allowed set appeared in a literal or an
    /// expression.
    CharNotAllowed,
    /// The input ended inside a `{...}` expression.
    UnclosedExpression,
    /// An expression defines no variables.
    EmptyExpression,
    /// A variable specifier has a zero-length name.
    EmptyVarName,
    /// A `:length` modifier carries more than 9 decimal digits.
    MaxLengthOverflow,
}
