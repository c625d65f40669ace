//! Parsing utilities for the `NestConfig` derive macro.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, ExprLit, Lit, Meta};

mod input;
mod literals;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{FieldInput, ParsedInput, parse_input};
use literals::{alias, default_value, lit_str, switch};
pub(crate) use type_utils::{is_unsupported, option_inner, peel_options, type_name};

/// Literals the runtime treats as true; used to drop statically ignored
/// fields at expansion time.
const TRUE_LITERALS: &[&str] = &["1", "t", "T", "TRUE", "true", "True"];

/// Struct-level `#[nest(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[nest(crate = "my_alias")]`, generated code references
    /// types through `my_alias::` instead of `nest_config::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level `#[nest(...)]` attributes, kept as the runtime tag table.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub tags: Vec<(&'static str, String)>,
}

impl FieldAttrs {
    fn set(&mut self, key: &'static str, value: String) {
        if let Some(entry) = self.tags.iter_mut().find(|(existing, _)| *existing == key) {
            entry.1 = value;
        } else {
            self.tags.push((key, value));
        }
    }

    /// Value recorded for `key`.
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find_map(|(name, value)| (*name == key).then_some(value.as_str()))
    }

    /// Whether `ignored` holds a true literal.
    pub(crate) fn is_ignored(&self) -> bool {
        self.get("ignored")
            .is_some_and(|value| TRUE_LITERALS.contains(&value))
    }
}

/// Iterate all `#[nest(...)]` attributes once and apply a callback.
fn parse_nest<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("nest")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown(meta: &ParseNestedMeta, scope: &str) -> syn::Error {
    let path = &meta.path;
    let name = quote::quote!(#path).to_string();
    meta.error(format!("unknown {scope} attribute `{name}`"))
}

/// Extracts `#[nest(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs::default();
    parse_nest(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            Err(unknown(meta, "struct"))
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[nest(...)]` attributes.
///
/// Recognised keys are `ignored`, `required`, `split_words`, `prefix`,
/// `env`, `flag`, `default` and `usage`. Unknown keys are rejected. When no
/// `usage` is given the first line of the field's doc comment is used.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs::default();
    parse_nest(attrs, |meta| {
        let Some(ident) = meta.path.get_ident() else {
            return Err(unknown(meta, "field"));
        };
        match ident.to_string().as_str() {
            "ignored" => out.set("ignored", switch(meta, "ignored")?),
            "required" => out.set("required", switch(meta, "required")?),
            "split_words" => out.set("split_words", switch(meta, "split_words")?),
            "prefix" => out.set("prefix", lit_str(meta, "prefix")?.value()),
            "env" => out.set("env", alias(meta, "env")?),
            "flag" => out.set("flag", alias(meta, "flag")?),
            "default" => out.set("default", default_value(meta)?),
            "usage" => out.set("usage", lit_str(meta, "usage")?.value()),
            _ => return Err(unknown(meta, "field")),
        }
        Ok(())
    })?;
    if out.get("usage").is_none()
        && let Some(summary) = doc_summary(attrs)
    {
        out.set("usage", summary);
    }
    Ok(out)
}

/// Returns the first non-empty line of the `///` comments in `attrs`.
fn doc_summary(attrs: &[Attribute]) -> Option<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .flat_map(|text| {
            text.lines()
                .map(str::trim)
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .find(|line| !line.is_empty())
}
