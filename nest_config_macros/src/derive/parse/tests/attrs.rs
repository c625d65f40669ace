//! Tests for `#[nest(...)]` parsing behaviour.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::super::*;

fn first_field(input: &DeriveInput) -> Result<FieldInput> {
    parse_input(input)
        .map_err(|err| anyhow!(err))?
        .fields
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("missing field"))
}

#[test]
fn parses_struct_and_field_attributes() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[nest(crate = "config")]
        struct Demo {
            #[nest(flag = "listen", env, default = 5, required, usage = "Port")]
            pub port: u16,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(parsed.struct_attrs.crate_path.is_some(), "crate path missing");
    let field = parsed.fields.first().ok_or_else(|| anyhow!("missing field"))?;
    ensure!(field.name == "port", "unexpected name {}", field.name);
    ensure!(field.exported, "pub field should be exported");
    let expected = vec![
        ("flag", "listen".to_owned()),
        ("env", String::new()),
        ("default", "5".to_owned()),
        ("required", "true".to_owned()),
        ("usage", "Port".to_owned()),
    ];
    ensure!(field.attrs.tags == expected, "tags: {:?}", field.attrs.tags);
    Ok(())
}

#[test]
fn doc_comment_supplies_usage() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            ///
            /// Address to bind.
            ///
            /// Longer explanation.
            #[nest(flag)]
            pub listen: String,
        }
    };
    let field = first_field(&input)?;
    ensure!(
        field.attrs.get("usage") == Some("Address to bind."),
        "usage: {:?}",
        field.attrs.get("usage")
    );
    Ok(())
}

#[test]
fn explicit_usage_beats_doc_comment() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            /// From docs.
            #[nest(usage = "explicit")]
            pub listen: String,
        }
    };
    let field = first_field(&input)?;
    ensure!(field.attrs.get("usage") == Some("explicit"), "usage not overridden");
    Ok(())
}

#[test]
fn repeated_keys_keep_the_last_value() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[nest(env = "FIRST")]
            #[nest(env = "SECOND")]
            pub value: String,
        }
    };
    let field = first_field(&input)?;
    ensure!(field.attrs.tags == vec![("env", "SECOND".to_owned())], "tags: {:?}", field.attrs.tags);
    Ok(())
}

#[test]
fn raw_identifiers_are_unescaped() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            pub r#type: String,
        }
    };
    let field = first_field(&input)?;
    ensure!(field.name == "type", "unexpected name {}", field.name);
    Ok(())
}

#[rstest]
#[case::truthy(parse_quote!(struct Demo { #[nest(ignored)] pub value: String }), true)]
#[case::string(parse_quote!(struct Demo { #[nest(ignored = "1")] pub value: String }), true)]
#[case::falsy(parse_quote!(struct Demo { #[nest(ignored = false)] pub value: String }), false)]
#[case::unknown_text(parse_quote!(struct Demo { #[nest(ignored = "yes")] pub value: String }), false)]
fn ignored_uses_true_literals(#[case] input: DeriveInput, #[case] expected: bool) -> Result<()> {
    let field = first_field(&input)?;
    ensure!(field.attrs.is_ignored() == expected, "ignored mismatch");
    Ok(())
}

#[rstest]
#[case::unknown_field_key(parse_quote!(struct Demo { #[nest(flags)] pub value: String }))]
#[case::unknown_struct_key(parse_quote!(#[nest(prefix = "x")] struct Demo { pub value: String }))]
#[case::prefix_not_string(parse_quote!(struct Demo { #[nest(prefix = 1)] pub value: Sub }))]
#[case::enumeration(parse_quote!(enum Demo { A }))]
fn invalid_input_is_rejected(#[case] input: DeriveInput) {
    assert!(parse_input(&input).is_err());
}
