//! Character classes used by the template grammar.
//!
//! All classes are subsets of ASCII; classification works on bytes so that
//! the scanners can walk UTF-8 input without decoding it.

/// Returns true for `DIGIT` (RFC 5234: `0-9`).
#[inline]
#[must_use]
pub(crate) const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Returns true for `HEXDIG` (RFC 5234, case insensitive).
#[inline]
#[must_use]
pub(crate) const fn is_hexdig(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// Returns true for characters allowed in a variable name.
///
/// RFC 6570:
///
/// ```text
/// varname = varchar *( ["."] varchar )
/// varchar = ALPHA / DIGIT / "_" / pct-encoded
/// ```
///
/// `%` is accepted here as the lead of a percent-encoded triplet.
#[inline]
#[must_use]
pub(crate) const fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'%' | b'.')
}

/// Returns true for `unreserved` (RFC 3986: `ALPHA / DIGIT / "-" / "." / "_" / "~"`).
#[inline]
#[must_use]
pub(crate) const fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// Returns true for characters accepted into a captured variable value:
/// `unreserved` plus `%` (percent-encoded triplets) and `,` (list delimiter).
#[inline]
#[must_use]
pub(crate) const fn is_value_char(b: u8) -> bool {
    is_unreserved(b) || matches!(b, b'%' | b',')
}

/// Returns true for `reserved` (RFC 3986: `gen-delims / sub-delims`).
#[inline]
#[must_use]
pub(crate) const fn is_reserved(b: u8) -> bool {
    matches!(
        b,
        b':' | b'/'
            | b'?'
            | b'#'
            | b'['
            | b']'
            | b'@'
            | b'!'
            | b'$'
            | b'&'
            | b'\''
            | b'('
            | b')'
            | b'*'
            | b'+'
            | b','
            | b';'
            | b'='
    )
}

/// Returns true for characters that may not appear in a literal part.
///
/// RFC 6570 excludes CTL, SP, `"`, `'`, `<`, `>`, `\`, `^`, `` ` ``, `{`,
/// `|` and `}` from literals. `{` is in this set; the template scanner
/// handles it before consulting this predicate. A `%` is also only legal as
/// the head of a pct-encoded triplet, which the scanner checks with
/// lookahead.
#[inline]
#[must_use]
pub(crate) const fn is_literal_disallowed(b: u8) -> bool {
    b <= 0x1f
        || b == 0x7f
        || matches!(
            b,
            b' ' | b'"' | b'\'' | b'<' | b'>' | b'\\' | b'^' | b'`' | b'{' | b'|' | b'}'
        )
}
