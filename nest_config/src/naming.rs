//! String helpers shared by the extractor and the coercion layer.
//!
//! Identifier handling follows a small set of rules: flag names default to
//! the identifier with a lower-cased first letter, environment names to the
//! identifier itself, and `split_words` turns camel-case humps into
//! separator-joined lower-case words.

use heck::{ToKebabCase, ToSnakeCase};

use crate::error::ConversionError;

const TRUE_LITERALS: &[&str] = &["1", "t", "T", "TRUE", "true", "True"];
const FALSE_LITERALS: &[&str] = &["0", "f", "F", "FALSE", "false", "False"];

/// Returns `true` when `value` is one of the recognised true literals.
///
/// Anything else, including text that is not a boolean at all, is `false`.
///
/// # Examples
///
/// ```
/// use nest_config::naming::is_true;
///
/// assert!(is_true("T"));
/// assert!(!is_true("yes"));
/// ```
#[must_use]
pub fn is_true(value: &str) -> bool {
    TRUE_LITERALS.contains(&value)
}

/// Parses a boolean literal.
///
/// # Errors
///
/// Returns [`ConversionError::Bool`] when `value` is not one of
/// `1 t T TRUE true True 0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> Result<bool, ConversionError> {
    if TRUE_LITERALS.contains(&value) {
        Ok(true)
    } else if FALSE_LITERALS.contains(&value) {
        Ok(false)
    } else {
        Err(ConversionError::Bool(value.to_owned()))
    }
}

/// Lower-cases only the first character of `value`.
///
/// ```
/// use nest_config::naming::lower_first;
///
/// assert_eq!(lower_first("ServerPort"), "serverPort");
/// ```
#[must_use]
pub fn lower_first(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Splits `value` into lower-case words joined by `separator`.
///
/// Camel-case humps and existing `_` or `-` separators both start a new
/// word. Only `"-"` and `"_"` are meaningful separators; any other string is
/// substituted for the underscore.
///
/// ```
/// use nest_config::naming::split_words;
///
/// assert_eq!(split_words("CamelCase", "-"), "camel-case");
/// assert_eq!(split_words("retry_limit", "_"), "retry_limit");
/// ```
#[must_use]
pub fn split_words(value: &str, separator: &str) -> String {
    match separator {
        "-" => value.to_kebab_case(),
        "_" => value.to_snake_case(),
        other => value.to_snake_case().replace('_', other),
    }
}
