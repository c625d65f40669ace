//! Error types produced while loading configuration.

mod conversions;
mod types;

pub use types::{ConversionError, NestError};
