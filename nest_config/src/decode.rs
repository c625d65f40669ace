//! Self-decoding protocol for custom leaf types.
//!
//! A type opts in by implementing [`Decode`] or [`UnmarshalText`] and
//! returning itself from [`Value::decoder`] or [`Value::text_unmarshaler`].
//! When both capabilities are present the self-decoder is used.

use crate::error::NestError;
use crate::value::Value;

/// Error type returned by custom decoders.
pub type DecodeError = Box<dyn std::error::Error + Send + Sync>;

/// Types that parse themselves from a configuration string.
pub trait Decode {
    /// Replaces `self` with the value described by `value`.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` is not valid for the type.
    fn decode(&mut self, value: &str) -> Result<(), DecodeError>;
}

/// Types that parse themselves from raw text bytes.
pub trait UnmarshalText {
    /// Replaces `self` with the value described by `text`.
    ///
    /// # Errors
    ///
    /// Returns an error when `text` is not valid for the type.
    fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), DecodeError>;
}

/// Returns `true` when `field` exposes either decoding capability.
pub fn can_decode(field: &mut dyn Value) -> bool {
    field.decoder().is_some() || field.text_unmarshaler().is_some()
}

/// Decodes `value` into `field` using its own decoding capability.
///
/// # Errors
///
/// Returns [`NestError::NotDecodable`] when `field` has no capability,
/// [`NestError::NoDecoder`] when no capability can be dispatched, and
/// [`NestError::TypeConversion`] when the decoder rejects `value`.
pub fn decode(field: &mut dyn Value, value: &str) -> Result<(), NestError> {
    if !can_decode(field) {
        return Err(NestError::NotDecodable);
    }
    let outcome = if let Some(decoder) = field.decoder() {
        decoder.decode(value)
    } else if let Some(unmarshaler) = field.text_unmarshaler() {
        unmarshaler.unmarshal_text(value.as_bytes())
    } else {
        return Err(NestError::NoDecoder);
    };
    outcome.map_err(|source| NestError::TypeConversion {
        value: value.to_owned(),
        source: crate::error::ConversionError::Decode(source),
    })
}
