//! Leaf storage handles and the built-in scalar implementations.

use std::time::Duration;

use crate::decode::{Decode, UnmarshalText};

/// Mutable view of a built-in scalar that the coercion layer can write.
#[derive(Debug)]
#[non_exhaustive]
pub enum Primitive<'a> {
    /// UTF-8 text, stored verbatim.
    Str(&'a mut String),
    /// 8-bit signed integer.
    I8(&'a mut i8),
    /// 16-bit signed integer.
    I16(&'a mut i16),
    /// 32-bit signed integer.
    I32(&'a mut i32),
    /// 64-bit signed integer.
    I64(&'a mut i64),
    /// 128-bit signed integer.
    I128(&'a mut i128),
    /// Pointer-sized signed integer.
    Isize(&'a mut isize),
    /// 8-bit unsigned integer.
    U8(&'a mut u8),
    /// 16-bit unsigned integer.
    U16(&'a mut u16),
    /// 32-bit unsigned integer.
    U32(&'a mut u32),
    /// 64-bit unsigned integer.
    U64(&'a mut u64),
    /// 128-bit unsigned integer.
    U128(&'a mut u128),
    /// Pointer-sized unsigned integer.
    Usize(&'a mut usize),
    /// Single-precision float.
    F32(&'a mut f32),
    /// Double-precision float.
    F64(&'a mut f64),
    /// Boolean.
    Bool(&'a mut bool),
    /// Span of time written as a duration literal such as `1h 30m`.
    Duration(&'a mut Duration),
}

/// Storage for a single configuration value.
///
/// Custom leaf types implement this trait and usually expose a decoding
/// capability:
///
/// ```
/// use nest_config::{Decode, DecodeError, Value};
///
/// #[derive(Default)]
/// struct Level(u8);
///
/// impl Decode for Level {
///     fn decode(&mut self, value: &str) -> Result<(), DecodeError> {
///         self.0 = match value {
///             "low" => 1,
///             "high" => 9,
///             other => return Err(format!("unknown level {other}").into()),
///         };
///         Ok(())
///     }
/// }
///
/// impl Value for Level {
///     fn type_name(&self) -> &'static str { "level" }
///     fn is_zero(&self) -> bool { self.0 == 0 }
///     fn to_text(&self) -> String { self.0.to_string() }
///     fn zero_text(&self) -> &'static str { "" }
///     fn decoder(&mut self) -> Option<&mut dyn Decode> { Some(self) }
/// }
/// ```
pub trait Value {
    /// Name shown as the value hint in usage output.
    fn type_name(&self) -> &'static str;

    /// Returns `true` when the value equals its type's zero value.
    fn is_zero(&self) -> bool;

    /// Renders the current value as text.
    fn to_text(&self) -> String;

    /// Text substituted when a source supplies an empty string.
    fn zero_text(&self) -> &'static str;

    /// Built-in scalar view, if this is one of the supported primitives.
    fn primitive(&mut self) -> Option<Primitive<'_>> {
        None
    }

    /// Self-decoding capability.
    fn decoder(&mut self) -> Option<&mut dyn Decode> {
        None
    }

    /// Text-unmarshalling capability.
    fn text_unmarshaler(&mut self) -> Option<&mut dyn UnmarshalText> {
        None
    }
}

macro_rules! integer_value {
    ($($ty:ident => $variant:ident),+ $(,)?) => {$(
        impl Value for $ty {
            fn type_name(&self) -> &'static str {
                stringify!($ty)
            }

            fn is_zero(&self) -> bool {
                *self == 0
            }

            fn to_text(&self) -> String {
                self.to_string()
            }

            fn zero_text(&self) -> &'static str {
                "0"
            }

            fn primitive(&mut self) -> Option<Primitive<'_>> {
                Some(Primitive::$variant(self))
            }
        }
    )+};
}

macro_rules! float_value {
    ($($ty:ident => $variant:ident),+ $(,)?) => {$(
        impl Value for $ty {
            fn type_name(&self) -> &'static str {
                stringify!($ty)
            }

            fn is_zero(&self) -> bool {
                self.to_bits() == 0
            }

            fn to_text(&self) -> String {
                self.to_string()
            }

            fn zero_text(&self) -> &'static str {
                "0"
            }

            fn primitive(&mut self) -> Option<Primitive<'_>> {
                Some(Primitive::$variant(self))
            }
        }
    )+};
}

integer_value! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
}

float_value! {
    f32 => F32,
    f64 => F64,
}

impl Value for String {
    fn type_name(&self) -> &'static str {
        "String"
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_text(&self) -> String {
        self.clone()
    }

    fn zero_text(&self) -> &'static str {
        ""
    }

    fn primitive(&mut self) -> Option<Primitive<'_>> {
        Some(Primitive::Str(self))
    }
}

impl Value for bool {
    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn zero_text(&self) -> &'static str {
        "false"
    }

    fn primitive(&mut self) -> Option<Primitive<'_>> {
        Some(Primitive::Bool(self))
    }
}

impl Value for Duration {
    fn type_name(&self) -> &'static str {
        "Duration"
    }

    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    fn to_text(&self) -> String {
        humantime::format_duration(*self).to_string()
    }

    fn zero_text(&self) -> &'static str {
        "0s"
    }

    fn primitive(&mut self) -> Option<Primitive<'_>> {
        Some(Primitive::Duration(self))
    }
}

// No coercion row: resolved values leave a `char` field untouched.
impl Value for char {
    fn type_name(&self) -> &'static str {
        "char"
    }

    fn is_zero(&self) -> bool {
        *self == '\0'
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn zero_text(&self) -> &'static str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn zero_values_are_detected() {
        assert!(String::new().is_zero());
        assert!(0_i64.is_zero());
        assert!(0.0_f64.is_zero());
        assert!(false.is_zero());
        assert!(!true.is_zero());
        assert!(Duration::ZERO.is_zero());
        assert!('\0'.is_zero());
    }

    #[rstest]
    fn negative_zero_float_is_not_zero() {
        assert!(!(-0.0_f64).is_zero());
    }

    #[rstest]
    #[case(Box::new(String::from("x")), "x")]
    #[case(Box::new(-12_i32), "-12")]
    #[case(Box::new(1.5_f64), "1.5")]
    #[case(Box::new(true), "true")]
    #[case(Box::new(Duration::from_secs(90)), "1m 30s")]
    fn non_zero_values_render_as_text(#[case] value: Box<dyn Value>, #[case] expected: &str) {
        assert!(!value.is_zero());
        assert_eq!(value.to_text(), expected);
    }

    #[rstest]
    fn type_names_are_rust_names() {
        assert_eq!(0_u64.type_name(), "u64");
        assert_eq!(0_i128.type_name(), "i128");
        assert_eq!(String::new().type_name(), "String");
        assert_eq!(Duration::ZERO.type_name(), "Duration");
    }

    #[rstest]
    fn char_has_no_primitive_row() {
        let mut letter = 'a';
        assert!(letter.primitive().is_none());
        assert!(letter.decoder().is_none());
    }
}
