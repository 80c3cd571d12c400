//! Expression operators.

/// Operator of a template expression.
///
/// RFC 6570 defines a fixed, non-extensible operator set. [`Operator::String`]
/// stands for the absence of an explicit operator, i.e. simple string
/// expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// No operator. Simple string expansion.
    String,
    /// Reserved expansion by `+`.
    Reserved,
    /// Fragment expansion by `#`.
    Fragment,
    /// Label expansion by `.`.
    Label,
    /// Path segments by `/`.
    PathSegments,
    /// Path-style parameters by `;`.
    PathParams,
    /// Form-style query by `?`.
    FormQuery,
    /// Form-style query continuation by `&`.
    FormQueryCont,
}

/// Structural properties of an operator.
///
/// See the table in
/// [RFC 6570 Appendix A](https://www.rfc-editor.org/rfc/rfc6570#appendix-A).
#[derive(Debug, Clone, Copy)]
struct OpProps {
    /// Character that introduces the expression, if any.
    start: Option<u8>,
    /// Character prepended once if any variable expands, if any.
    first: Option<u8>,
    /// Separator between expanded variables.
    sep: u8,
    /// Whether each value is emitted as `name=value`.
    named: bool,
    /// Whether named empty values still get a `=`.
    empty_eq: bool,
    /// Whether reserved characters pass through unencoded.
    allow_reserved: bool,
    /// Whether the start character is itself part of the expanded text.
    start_expanded: bool,
}

impl OpProps {
    /// Properties for all known operators, in `Operator` declaration order.
    const PROPS: [Self; 8] = [
        // String
        Self {
            start: None,
            first: None,
            sep: b',',
            named: false,
            empty_eq: false,
            allow_reserved: false,
            start_expanded: false,
        },
        // Reserved
        Self {
            start: Some(b'+'),
            first: None,
            sep: b',',
            named: false,
            empty_eq: false,
            allow_reserved: true,
            start_expanded: false,
        },
        // Fragment
        Self {
            start: Some(b'#'),
            first: Some(b'#'),
            sep: b',',
            named: false,
            empty_eq: false,
            allow_reserved: true,
            start_expanded: true,
        },
        // Label
        Self {
            start: Some(b'.'),
            first: Some(b'.'),
            sep: b'.',
            named: false,
            empty_eq: false,
            allow_reserved: false,
            start_expanded: true,
        },
        // PathSegments
        Self {
            start: Some(b'/'),
            first: Some(b'/'),
            sep: b'/',
            named: false,
            empty_eq: false,
            allow_reserved: false,
            start_expanded: true,
        },
        // PathParams
        Self {
            start: Some(b';'),
            first: Some(b';'),
            sep: b';',
            named: true,
            empty_eq: false,
            allow_reserved: false,
            start_expanded: true,
        },
        // FormQuery
        Self {
            start: Some(b'?'),
            first: Some(b'?'),
            sep: b'&',
            named: true,
            empty_eq: true,
            allow_reserved: false,
            start_expanded: true,
        },
        // FormQueryCont
        Self {
            start: Some(b'&'),
            first: Some(b'&'),
            sep: b'&',
            named: true,
            empty_eq: true,
            allow_reserved: false,
            start_expanded: true,
        },
    ];
}

impl Operator {
    /// Returns the operator introduced by the given character.
    ///
    /// `None` means the character starts no known operator, in which case an
    /// expression uses simple string expansion and the character belongs to
    /// the first variable name.
    #[must_use]
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'+' => Some(Self::Reserved),
            b'#' => Some(Self::Fragment),
            b'.' => Some(Self::Label),
            b'/' => Some(Self::PathSegments),
            b';' => Some(Self::PathParams),
            b'?' => Some(Self::FormQuery),
            b'&' => Some(Self::FormQueryCont),
            _ => None,
        }
    }

    /// Returns the properties for the operator.
    #[inline]
    #[must_use]
    fn props(self) -> &'static OpProps {
        let index = match self {
            Self::String => 0,
            Self::Reserved => 1,
            Self::Fragment => 2,
            Self::Label => 3,
            Self::PathSegments => 4,
            Self::PathParams => 5,
            Self::FormQuery => 6,
            Self::FormQueryCont => 7,
        };
        &OpProps::PROPS[index]
    }

    /// Returns the character that introduces the expression.
    ///
    /// # Panics
    ///
    /// Panics for [`Operator::String`], which is written without a start
    /// character. Asking for one is a programming error.
    #[must_use]
    pub fn start(self) -> u8 {
        match self.props().start {
            Some(b) => b,
            None => panic!("simple string expansion has no start character"),
        }
    }

    /// Returns the character prepended before the first expanded variable.
    #[inline]
    #[must_use]
    pub fn first(self) -> Option<u8> {
        self.props().first
    }

    /// Returns the separator emitted between expanded variables.
    #[inline]
    #[must_use]
    pub fn separator(self) -> u8 {
        self.props().sep
    }

    /// Returns whether each value is emitted as `name=value`.
    #[inline]
    #[must_use]
    pub fn is_named(self) -> bool {
        self.props().named
    }

    /// Returns whether a named empty value still gets a `=`.
    #[inline]
    #[must_use]
    pub fn empty_eq(self) -> bool {
        self.props().empty_eq
    }

    /// Returns whether reserved characters pass through unencoded.
    #[inline]
    #[must_use]
    pub fn allows_reserved(self) -> bool {
        self.props().allow_reserved
    }

    /// Returns whether the start character is itself part of the expanded
    /// (and matched) text.
    #[inline]
    #[must_use]
    pub fn start_expanded(self) -> bool {
        self.props().start_expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn properties_follow_rfc_appendix_a() {
        let rows = [
            // (operator, first, sep, named, empty_eq, reserved, start_expanded)
            (Operator::String, None, b',', false, false, false, false),
            (Operator::Reserved, None, b',', false, false, true, false),
            (Operator::Fragment, Some(b'#'), b',', false, false, true, true),
            (Operator::Label, Some(b'.'), b'.', false, false, false, true),
            (Operator::PathSegments, Some(b'/'), b'/', false, false, false, true),
            (Operator::PathParams, Some(b';'), b';', true, false, false, true),
            (Operator::FormQuery, Some(b'?'), b'&', true, true, false, true),
            (Operator::FormQueryCont, Some(b'&'), b'&', true, true, false, true),
        ];
        for (op, first, sep, named, empty_eq, reserved, start_expanded) in rows {
            assert_eq!(op.first(), first, "{op:?}");
            assert_eq!(op.separator(), sep, "{op:?}");
            assert_eq!(op.is_named(), named, "{op:?}");
            assert_eq!(op.empty_eq(), empty_eq, "{op:?}");
            assert_eq!(op.allows_reserved(), reserved, "{op:?}");
            assert_eq!(op.start_expanded(), start_expanded, "{op:?}");
        }
    }

    #[test]
    fn start_characters() {
        let rows = [
            (Operator::Reserved, b'+'),
            (Operator::Fragment, b'#'),
            (Operator::Label, b'.'),
            (Operator::PathSegments, b'/'),
            (Operator::PathParams, b';'),
            (Operator::FormQuery, b'?'),
            (Operator::FormQueryCont, b'&'),
        ];
        for (op, start) in rows {
            assert_eq!(op.start(), start, "{op:?}");
            assert_eq!(Operator::from_byte(start), Some(op));
        }
        assert_eq!(Operator::from_byte(b'x'), None);
        assert_eq!(Operator::from_byte(b'='), None);
    }

    #[test]
    #[should_panic = "no start character"]
    fn string_operator_has_no_start() {
        let _ = Operator::String.start();
    }
}
