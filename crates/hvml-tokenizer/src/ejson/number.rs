//! Numeric-literal flags and finalization (spec §3's "numeric-literal flags
//! record", §4.4's "Numeric semantics").

use crate::error::ErrorKind;
use crate::ejson::value::Number;

/// The width/kind suffix trailing a numeric literal (`L`, `UL`, `FL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum NumberSuffix {
    #[default]
    None,
    /// `L` — explicit signed 64-bit integer.
    Long,
    /// `UL` — unsigned 64-bit integer.
    UnsignedLong,
    /// `FL` — "long double", widened here to `f64` (see `DESIGN.md`).
    FloatLong,
}

/// Tracks what's been seen so far while scanning a numeric literal, carried
/// in the active [`crate::tokenizer::Tokenizer`] across the
/// `EJSON_VALUE_NUMBER*` state family.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NumberFlags {
    pub has_sign: bool,
    pub has_dot: bool,
    pub has_exponent: bool,
    pub hex_mode: bool,
    pub suffix: NumberSuffix,
}

/// Converts the buffered literal text plus its flags into a [`Number`].
///
/// `text` excludes the trailing suffix letters but includes any `0x`/`0X`
/// hex prefix and leading sign.
pub(crate) fn finalize(text: &str, flags: NumberFlags) -> Result<Number, ErrorKind> {
    if flags.hex_mode {
        let digits = text
            .trim_start_matches('-')
            .trim_start_matches("0x")
            .trim_start_matches("0X");
        let magnitude = u64::from_str_radix(digits, 16).map_err(|_| ErrorKind::BadNumber)?;
        return Ok(match flags.suffix {
            NumberSuffix::UnsignedLong => Number::Unsigned(magnitude),
            _ => Number::Signed(if text.starts_with('-') {
                -(magnitude as i64)
            } else {
                magnitude as i64
            }),
        });
    }

    if flags.has_dot || flags.has_exponent || flags.suffix == NumberSuffix::FloatLong {
        let value: f64 = text.parse().map_err(|_| ErrorKind::BadNumber)?;
        return Ok(Number::Float(value));
    }

    match flags.suffix {
        NumberSuffix::UnsignedLong => text
            .parse::<u64>()
            .map(Number::Unsigned)
            .map_err(|_| ErrorKind::BadNumber),
        _ => text
            .parse::<i64>()
            .map(Number::Signed)
            .map_err(|_| ErrorKind::BadNumber),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integer_is_signed() {
        let n = finalize("42", NumberFlags::default()).unwrap();
        assert_eq!(n, Number::Signed(42));
    }

    #[test]
    fn fraction_is_float() {
        let flags = NumberFlags {
            has_dot: true,
            ..Default::default()
        };
        let n = finalize("2.5", flags).unwrap();
        assert_eq!(n, Number::Float(2.5));
    }

    #[test]
    fn unsigned_long_suffix_selects_u64() {
        let flags = NumberFlags {
            suffix: NumberSuffix::UnsignedLong,
            ..Default::default()
        };
        let n = finalize("7", flags).unwrap();
        assert_eq!(n, Number::Unsigned(7));
    }

    #[test]
    fn hex_mode_parses_base_16() {
        let flags = NumberFlags {
            hex_mode: true,
            ..Default::default()
        };
        let n = finalize("0xFF", flags).unwrap();
        assert_eq!(n, Number::Signed(255));
    }

    #[test]
    fn float_long_suffix_forces_float() {
        let flags = NumberFlags {
            suffix: NumberSuffix::FloatLong,
            ..Default::default()
        };
        let n = finalize("3", flags).unwrap();
        assert_eq!(n, Number::Float(3.0));
    }
}
