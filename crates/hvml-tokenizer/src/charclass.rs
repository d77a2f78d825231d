//! Character-class predicates.
//!
//! A direct, idiomatic-Rust transcription of the inline predicates in
//! `examples/original_source/Source/PurC/hvml/tokenizer.h`. Kept as small,
//! `#[inline]`-able pure functions over `char` per spec §9's design note
//! ("Character-class tests: expressed as small pure functions over 32-bit
//! scalars; keep them inlineable").

/// The four whitespace code points the base eJSON/markup grammar recognizes.
#[inline]
pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\n' | '\t' | '\x0C')
}

#[inline]
pub(crate) fn is_ascii_lower(c: char) -> bool {
    c.is_ascii_lowercase()
}

#[inline]
pub(crate) fn is_ascii_upper(c: char) -> bool {
    c.is_ascii_uppercase()
}

#[inline]
pub(crate) fn to_ascii_lower(c: char) -> char {
    c.to_ascii_lowercase()
}

#[inline]
pub(crate) fn is_ascii(c: char) -> bool {
    c.is_ascii()
}

/// Whitespace per the narrower HTML tokenizer sense (space or C0 control
/// 0x09..=0x0D).
#[inline]
pub(crate) fn is_ascii_space(c: char) -> bool {
    c == ' ' || ('\u{9}'..='\u{D}').contains(&c)
}

#[inline]
pub(crate) fn is_ascii_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub(crate) fn is_ascii_binary_digit(c: char) -> bool {
    matches!(c, '0' | '1')
}

#[inline]
pub(crate) fn is_ascii_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

#[inline]
pub(crate) fn is_ascii_upper_hex_digit(c: char) -> bool {
    is_ascii_digit(c) || c.is_ascii_uppercase() && matches!(c, 'A'..='F')
}

#[inline]
pub(crate) fn is_ascii_lower_hex_digit(c: char) -> bool {
    is_ascii_digit(c) || matches!(c, 'a'..='f')
}

#[inline]
pub(crate) fn is_ascii_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7')
}

#[inline]
pub(crate) fn is_ascii_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[inline]
pub(crate) fn is_ascii_alpha_numeric(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Punctuators that always close an unquoted name/value or an eJSON
/// structural token, per `is_separator` in `tokenizer.h`.
#[inline]
pub(crate) fn is_separator(c: char) -> bool {
    matches!(c, '{' | '}' | '[' | ']' | '<' | '>' | '(' | ')' | ',' | ':')
}

/// Characters that may start a compound attribute-value assignment operator
/// (`+= -= *= /= %= ~= ^= $=`), per `is_attribute_value_operator`.
#[inline]
pub(crate) fn is_attribute_value_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '~' | '^' | '$')
}

/// One-character "context variable" names reachable right after a `$` in a
/// JSONEE variable reference (`$?`, `$<`, `$@`, `$!`, `$:`, `$=`, `$%`), per
/// `is_context_variable`. Supplemented from `original_source` (SPEC_FULL §4).
#[inline]
pub(crate) fn is_context_variable(c: char) -> bool {
    matches!(c, '?' | '<' | '@' | '!' | ':' | '=' | '%')
}
