//! Procedural macros for `nest_config`.
//!
//! `#[derive(NestConfig)]` implements `nest_config::NestConfig` and
//! `nest_config::Field` for a struct so the loader can walk its fields.
//! Field behaviour is configured with `#[nest(...)]`:
//!
//! - `flag`, `flag = "name"`: read from `--name`.
//! - `env`, `env = "NAME"`: read from an environment variable.
//! - `default = ...`: literal used when no other source is set.
//! - `required`: fail when no source provides a value.
//! - `split_words`: derive names as separated lower-case words.
//! - `prefix = "..."`: name segment used for a nested record's children.
//! - `usage = "..."`: help text; defaults to the first doc comment line.
//! - `ignored`: never touch the field.
//!
//! `#[nest(crate = "path")]` on the struct points generated code at a renamed
//! dependency.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `nest_config::NestConfig`.
#[proc_macro_derive(NestConfig, attributes(nest))]
pub fn derive_nest_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
