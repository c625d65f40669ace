//! Expansion pipeline for `#[derive(NestConfig)]`.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::DeriveInput;

mod generate;
mod parse;

/// Parses `input` and emits the trait implementations.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = runtime_path(parsed.struct_attrs.crate_path.as_ref());
    Ok(generate::impls(&parsed, &krate))
}

/// Path generated code uses to reach the runtime crate.
///
/// `#[nest(crate = "...")]` replaces the default `nest_config` for callers
/// that depend on the runtime under another name.
fn runtime_path(renamed: Option<&syn::Path>) -> TokenStream {
    renamed.map_or_else(|| quote! { nest_config }, ToTokens::to_token_stream)
}
