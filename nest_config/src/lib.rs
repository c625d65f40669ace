//! Populate configuration structs from overrides, command-line flags,
//! environment variables, and declared defaults.
//!
//! A configuration schema is a plain struct deriving [`NestConfig`]. Field
//! annotations written as `#[nest(...)]` describe where each value may come
//! from:
//!
//! ```rust,no_run
//! use nest_config::{Configurator, NestConfig};
//!
//! #[derive(Debug, Default, NestConfig)]
//! struct AppConfig {
//!     /// Address the server listens on.
//!     #[nest(flag, env, default = "127.0.0.1:8080")]
//!     pub listen: String,
//!
//!     #[nest(flag, env, split_words, default = "30s")]
//!     pub shutdown_timeout: std::time::Duration,
//!
//!     #[nest(prefix = "db")]
//!     pub database: Database,
//! }
//!
//! #[derive(Debug, Default, NestConfig)]
//! struct Database {
//!     #[nest(env, required)]
//!     pub url: String,
//! }
//!
//! # fn main() -> Result<(), nest_config::NestError> {
//! let configurator = Configurator::new();
//! configurator.set_env_prefix("app");
//!
//! let mut config = AppConfig::default();
//! match configurator.load(&mut config) {
//!     Err(err) if err.is_help_request() => return Ok(()),
//!     other => other?,
//! }
//! # Ok(())
//! # }
//! ```
//!
//! With the environment prefix `app`, `database.url` is read from
//! `APP_DB_URL`, `listen` from `--listen` or `APP_LISTEN`, and
//! `shutdown_timeout` from `--shutdown-timeout` or `APP_SHUTDOWN_TIMEOUT`.
//!
//! # Precedence
//!
//! ```text
//! Defaults              #[nest(default = "...")]
//!        ↑ overridden by
//! Environment variables #[nest(env)]
//!        ↑ overridden by
//! Command-line flags    #[nest(flag)]
//!        ↑ overridden by
//! Overrides             any field that is already non-zero before `load`
//! ```
//!
//! The order is fixed. A field that already holds a non-zero value when
//! [`Configurator::load`] runs keeps that value even when a flag, an
//! environment variable, and a default are all present.
//!
//! # Custom field types
//!
//! Leaf types implement [`Value`]. Types that know how to parse themselves
//! expose the [`Decode`] or [`UnmarshalText`] capability through
//! [`Value::decoder`] and [`Value::text_unmarshaler`]; the self-decoder wins
//! when both are present.

#[cfg(test)]
extern crate self as nest_config;

pub use nest_config_macros::NestConfig;

mod coerce;
mod configurator;
mod decode;
mod definition;
mod error;
mod flags;
mod global;
pub mod naming;
mod schema;
mod store;
pub mod usage;
mod value;

pub use configurator::Configurator;
pub use decode::{Decode, DecodeError, UnmarshalText, can_decode, decode};
pub use definition::{FieldDefinition, definitions};
pub use error::{ConversionError, NestError};
pub use global::{global, load, set_args, set_env_prefix, set_name, set_output};
pub use schema::{Field, NestConfig, SchemaField, Slot, Tags, tags};
pub use value::{Primitive, Value};

/// Convenience alias for results produced by this crate.
pub type NestResult<T> = Result<T, NestError>;
