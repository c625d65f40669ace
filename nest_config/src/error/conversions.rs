//! Conversions between external error types and `NestError`.

use std::convert::Infallible;

use figment::Error as FigmentError;

use super::{ConversionError, NestError};

impl From<Infallible> for ConversionError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl From<clap::Error> for NestError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(e.into())
    }
}

impl From<FigmentError> for NestError {
    fn from(e: FigmentError) -> Self {
        Self::Store(e.into())
    }
}

impl From<NestError> for FigmentError {
    /// Allow using `?` inside `figment::Jail` closures.
    fn from(e: NestError) -> Self {
        match e {
            NestError::Store(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
