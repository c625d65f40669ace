//! Conversion of resolved text into typed field storage.

use crate::decode::{can_decode, decode};
use crate::error::{ConversionError, NestError};
use crate::naming::parse_bool;
use crate::value::{Primitive, Value};

/// Writes `text` into `field`, converting it to the field's type.
///
/// Decodable fields use their own decoder. Built-in scalars are parsed
/// according to their type; integers accept `0x`, `0o` and `0b` prefixes, a
/// legacy leading `0` for octal, and `_` between digits. Fields without a
/// conversion row are left untouched.
pub(crate) fn process_field(field: &mut dyn Value, text: &str) -> Result<(), NestError> {
    if can_decode(field) {
        return decode(field, text);
    }
    let Some(primitive) = field.primitive() else {
        return Ok(());
    };
    assign(primitive, text).map_err(|source| NestError::TypeConversion {
        value: text.to_owned(),
        source,
    })
}

fn assign(primitive: Primitive<'_>, text: &str) -> Result<(), ConversionError> {
    match primitive {
        Primitive::Str(slot) => text.clone_into(slot),
        Primitive::I8(slot) => *slot = signed(text)?,
        Primitive::I16(slot) => *slot = signed(text)?,
        Primitive::I32(slot) => *slot = signed(text)?,
        Primitive::I64(slot) => *slot = signed(text)?,
        Primitive::I128(slot) => *slot = signed(text)?,
        Primitive::Isize(slot) => *slot = signed(text)?,
        Primitive::U8(slot) => *slot = unsigned(text)?,
        Primitive::U16(slot) => *slot = unsigned(text)?,
        Primitive::U32(slot) => *slot = unsigned(text)?,
        Primitive::U64(slot) => *slot = unsigned(text)?,
        Primitive::U128(slot) => *slot = unsigned(text)?,
        Primitive::Usize(slot) => *slot = unsigned(text)?,
        Primitive::F32(slot) => *slot = text.parse()?,
        Primitive::F64(slot) => *slot = text.parse()?,
        Primitive::Bool(slot) => *slot = parse_bool(text)?,
        Primitive::Duration(slot) => *slot = humantime::parse_duration(text)?,
    }
    Ok(())
}

fn signed<T>(text: &str) -> Result<T, ConversionError>
where
    T: TryFrom<i128>,
    ConversionError: From<T::Error>,
{
    let (digits, radix) = literal_parts(text)?;
    let wide = i128::from_str_radix(&digits, radix)?;
    Ok(T::try_from(wide)?)
}

fn unsigned<T>(text: &str) -> Result<T, ConversionError>
where
    T: TryFrom<u128>,
    ConversionError: From<T::Error>,
{
    let (digits, radix) = literal_parts(text)?;
    let wide = u128::from_str_radix(&digits, radix)?;
    Ok(T::try_from(wide)?)
}

/// Splits an integer literal into sign-prefixed digits and a radix.
///
/// `0x`, `0o` and `0b` select a base when digits follow them; any other
/// leading `0` selects octal. Digit separators are removed once their
/// placement has been checked.
fn literal_parts(text: &str) -> Result<(String, u32), ConversionError> {
    if text.contains('_') && !separators_ok(text) {
        return Err(ConversionError::Separator(text.to_owned()));
    }
    let (sign, body) = match text.strip_prefix(['+', '-']) {
        Some(rest) => (text.get(..1).unwrap_or_default(), rest),
        None => ("", text),
    };
    let (digits, radix) = match base_prefix(body) {
        Some(radix) => (body.get(2..).unwrap_or_default(), radix),
        None => match body.strip_prefix('0') {
            Some(rest) if !rest.is_empty() => (rest, 8),
            _ => (body, 10),
        },
    };
    Ok((format!("{sign}{}", digits.replace('_', "")), radix))
}

/// Radix selected by a two-character base prefix followed by more text.
fn base_prefix(body: &str) -> Option<u32> {
    let mut chars = body.chars();
    if chars.next() != Some('0') {
        return None;
    }
    let radix = match chars.next()?.to_ascii_lowercase() {
        'x' => 16,
        'o' => 8,
        'b' => 2,
        _ => return None,
    };
    chars.next().map(|_| radix)
}

/// Checks that every `_` sits between digits, or between a base prefix and
/// a digit.
fn separators_ok(text: &str) -> bool {
    #[derive(PartialEq)]
    enum Seen {
        Start,
        Digit,
        Separator,
        Other,
    }

    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let prefix = body
        .get(..2)
        .filter(|head| matches!(*head, "0x" | "0X" | "0o" | "0O" | "0b" | "0B"));
    let hex = matches!(prefix, Some("0x" | "0X"));
    let (rest, mut seen) = match prefix {
        Some(_) => (body.get(2..).unwrap_or_default(), Seen::Digit),
        None => (body, Seen::Start),
    };
    for ch in rest.chars() {
        if ch.is_ascii_digit() || (hex && ch.is_ascii_hexdigit()) {
            seen = Seen::Digit;
        } else if ch == '_' {
            if seen != Seen::Digit {
                return false;
            }
            seen = Seen::Separator;
        } else if seen == Seen::Separator {
            return false;
        } else {
            seen = Seen::Other;
        }
    }
    seen != Seen::Separator
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("42", 42)]
    #[case("-42", -42)]
    #[case("+7", 7)]
    #[case("0x1F", 31)]
    #[case("0o17", 15)]
    #[case("017", 15)]
    #[case("0b1010", 10)]
    #[case("-0x10", -16)]
    #[case("0x_ff_ff", 65_535)]
    #[case("1_000", 1_000)]
    #[case("-1_000_000", -1_000_000)]
    #[case("0_17", 15)]
    #[case("0b_1_0", 2)]
    #[case("0", 0)]
    fn signed_integers_use_base_prefixes(#[case] text: &str, #[case] expected: i64) {
        let mut value = 0_i64;
        assert!(process_field(&mut value, text).is_ok());
        assert_eq!(value, expected);
    }

    #[rstest]
    #[case("0x")]
    #[case("09")]
    #[case("12abc")]
    fn malformed_integers_are_rejected(#[case] text: &str) {
        let mut value = 0_i32;
        let err = process_field(&mut value, text).err();
        assert!(matches!(
            err,
            Some(NestError::TypeConversion {
                source: ConversionError::Int(_),
                ..
            })
        ));
    }

    #[rstest]
    #[case("0x__f_")]
    #[case("1__0")]
    #[case("_1")]
    #[case("1_")]
    #[case("-_1")]
    #[case("0x_")]
    fn misplaced_separators_are_rejected(#[case] text: &str) {
        let mut value = 0_i64;
        let err = process_field(&mut value, text).err();
        assert!(matches!(
            err,
            Some(NestError::TypeConversion {
                source: ConversionError::Separator(_),
                ..
            })
        ));
        assert_eq!(value, 0);
    }

    #[rstest]
    fn wide_integers_have_conversion_rows() -> anyhow::Result<()> {
        let mut signed = 0_i128;
        let mut unsigned = 0_u128;
        process_field(&mut signed, "-170141183460469231731687303715884105728")?;
        process_field(&mut unsigned, "0xffff_ffff_ffff_ffff_ffff")?;
        assert_eq!(signed, i128::MIN);
        assert_eq!(unsigned, 0xffff_ffff_ffff_ffff_ffff);
        Ok(())
    }

    #[rstest]
    fn out_of_range_integers_are_rejected() {
        let mut value = 0_i8;
        let err = process_field(&mut value, "300").err();
        assert!(matches!(
            err,
            Some(NestError::TypeConversion {
                source: ConversionError::Range(_),
                ..
            })
        ));
        assert_eq!(value, 0);
    }

    #[rstest]
    fn unsigned_integers_reject_negative_numbers() {
        let mut value = 0_u64;
        assert!(process_field(&mut value, "-1").is_err());
        assert!(process_field(&mut value, "0xff").is_ok());
        assert_eq!(value, 255);
    }

    #[rstest]
    fn scalars_are_parsed_by_type() -> anyhow::Result<()> {
        let mut text = String::new();
        let mut ratio = 0.0_f64;
        let mut flag = false;
        let mut timeout = Duration::ZERO;
        process_field(&mut text, "hello world")?;
        process_field(&mut ratio, "0.25")?;
        process_field(&mut flag, "T")?;
        process_field(&mut timeout, "1h 30m")?;
        assert_eq!(text, "hello world");
        assert_eq!(ratio.to_string(), "0.25");
        assert!(flag);
        assert_eq!(timeout, Duration::from_secs(5400));
        Ok(())
    }

    #[rstest]
    #[case("yes")]
    #[case("")]
    fn booleans_are_strict(#[case] text: &str) {
        let mut flag = false;
        assert!(process_field(&mut flag, text).is_err());
    }

    #[rstest]
    fn malformed_durations_are_rejected() {
        let mut timeout = Duration::ZERO;
        let err = process_field(&mut timeout, "soon").err();
        assert!(matches!(
            err,
            Some(NestError::TypeConversion {
                source: ConversionError::Duration(_),
                ..
            })
        ));
    }

    #[rstest]
    fn values_without_a_row_are_left_alone() {
        let mut letter = 'a';
        assert!(process_field(&mut letter, "b").is_ok());
        assert_eq!(letter, 'a');
    }
}
