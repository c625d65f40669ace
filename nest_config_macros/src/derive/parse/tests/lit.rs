//! Tests for literal parsing helpers.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::Attribute;

use super::super::literals::{alias, default_value, switch};

/// Runs `parse` on the single key of `attr` and returns its result.
fn parse_one<F>(attr: &Attribute, mut parse: F) -> Result<String>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<String>,
{
    let mut observed = None;
    attr.parse_nested_meta(|meta| {
        observed = Some(parse(&meta)?);
        Ok(())
    })
    .map_err(|err| anyhow!("attribute parsing failed: {err}"))?;
    observed.ok_or_else(|| anyhow!("attribute callback was not invoked"))
}

#[rstest]
#[case::bare(syn::parse_quote!(#[nest(required)]), "true")]
#[case::bool_false(syn::parse_quote!(#[nest(required = false)]), "false")]
#[case::string(syn::parse_quote!(#[nest(required = "T")]), "T")]
fn switches_accept_bare_bool_and_string(#[case] attr: Attribute, #[case] expected: &str) -> Result<()> {
    let value = parse_one(&attr, |meta| switch(meta, "required"))?;
    ensure!(value == expected, "unexpected switch value: {value}");
    Ok(())
}

#[rstest]
#[case::bare(syn::parse_quote!(#[nest(env)]), "")]
#[case::named(syn::parse_quote!(#[nest(env = "DATABASE_URL")]), "DATABASE_URL")]
fn aliases_default_to_empty(#[case] attr: Attribute, #[case] expected: &str) -> Result<()> {
    let value = parse_one(&attr, |meta| alias(meta, "env"))?;
    ensure!(value == expected, "unexpected alias: {value}");
    Ok(())
}

#[rstest]
#[case::string(syn::parse_quote!(#[nest(default = "10s")]), "10s")]
#[case::int(syn::parse_quote!(#[nest(default = 8080)]), "8080")]
#[case::suffixed(syn::parse_quote!(#[nest(default = 3u8)]), "3")]
#[case::negative(syn::parse_quote!(#[nest(default = -5)]), "-5")]
#[case::float(syn::parse_quote!(#[nest(default = 0.5)]), "0.5")]
#[case::boolean(syn::parse_quote!(#[nest(default = true)]), "true")]
fn defaults_become_text(#[case] attr: Attribute, #[case] expected: &str) -> Result<()> {
    let value = parse_one(&attr, default_value)?;
    ensure!(value == expected, "unexpected default: {value}");
    Ok(())
}

#[rstest]
#[case::char(syn::parse_quote!(#[nest(default = 'x')]))]
#[case::negative_string(syn::parse_quote!(#[nest(default = -"x")]))]
fn unsupported_defaults_are_rejected(#[case] attr: Attribute) {
    assert!(parse_one(&attr, default_value).is_err());
}

#[rstest]
fn switches_reject_numbers() {
    let attr: Attribute = syn::parse_quote!(#[nest(required = 1)]);
    let err = parse_one(&attr, |meta| switch(meta, "required")).expect_err("numbers rejected");
    assert!(err.to_string().contains("required must be a boolean or string"));
}
