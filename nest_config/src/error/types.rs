//! Primary error enums for configuration loading flows.

use std::num::{ParseFloatError, ParseIntError, TryFromIntError};

use figment::Error as FigmentError;
use thiserror::Error;

use crate::decode::DecodeError;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NestError {
    /// The load target cannot be addressed as a record at all.
    #[error("value passed is not a struct pointer")]
    NotStructPointer,

    /// The load target is a scalar value rather than a record.
    #[error("value passed is not a struct")]
    NotStruct,

    /// The command line asked for help. Usage text has already been written
    /// to the configured output; callers should exit without an error.
    #[error("flag: help requested")]
    FlagHelp,

    /// No source supplied a value for a field marked `required`.
    #[error("required field {key} missing value")]
    MissingRequired {
        /// Dotted key of the field that stayed unset.
        key: String,
    },

    /// A resolved string could not be converted into the field's type.
    #[error("cannot convert '{value}': {source}")]
    TypeConversion {
        /// Text that failed to convert.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: ConversionError,
    },

    /// Decoding was requested for a value without a decoding capability.
    #[error("value cannot decode itself")]
    NotDecodable,

    /// A decoding capability was reported but none could be dispatched.
    #[error("failed to find a decoding type")]
    NoDecoder,

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// Error reading a value back from the layered store.
    #[error("Failed to read configuration store: {0}")]
    Store(#[from] Box<FigmentError>),

    /// Writing usage text to the output sink failed.
    #[error("Failed to write usage output: {0}")]
    Output(#[from] std::io::Error),
}

impl NestError {
    /// Returns `true` when this error is the help signal rather than a
    /// failure.
    #[must_use]
    pub const fn is_help_request(&self) -> bool {
        matches!(self, Self::FlagHelp)
    }
}

/// Parse failures raised while coercing text into a field.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionError {
    /// Integer text was malformed or overflowed the parse width.
    #[error(transparent)]
    Int(#[from] ParseIntError),

    /// Digit separators were misplaced: an `_` must sit between two digits
    /// or between a base prefix and a digit.
    #[error("invalid digit separator in '{0}'")]
    Separator(String),

    /// Integer text parsed but does not fit the field's width.
    #[error(transparent)]
    Range(#[from] TryFromIntError),

    /// Floating-point text was malformed.
    #[error(transparent)]
    Float(#[from] ParseFloatError),

    /// Boolean text was not one of the recognised literals.
    #[error("invalid boolean literal '{0}'")]
    Bool(String),

    /// Duration text was malformed.
    #[error(transparent)]
    Duration(#[from] humantime::DurationError),

    /// A custom decoder rejected the text.
    #[error(transparent)]
    Decode(DecodeError),
}
