//! Literal parsing helpers for `#[nest(...)]` attributes.
//!
//! Every accepted literal is reduced to the string stored in the field's tag
//! table, so the runtime only ever sees text.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr, Token};

/// Parses a literal from a field attribute using `extractor`.
///
/// `expected` names the accepted forms in the error message.
fn parse_lit<T, F>(
    meta: &ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> Result<T, syn::Error>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a string literal from a field attribute.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a switch such as `required`.
///
/// The bare form means `"true"`; otherwise a boolean or string literal is
/// recorded verbatim and judged truthy by the runtime.
pub(crate) fn switch(meta: &ParseNestedMeta, key: &str) -> Result<String, syn::Error> {
    if !meta.input.peek(Token![=]) {
        return Ok("true".to_owned());
    }
    parse_lit(meta, key, "boolean or string", |lit| match lit {
        Lit::Bool(b) => Some(b.value.to_string()),
        Lit::Str(s) => Some(s.value()),
        _ => None,
    })
}

/// Parses a source marker such as `flag` or `env = "NAME"`.
///
/// The bare form records an empty alias so the runtime derives one.
pub(crate) fn alias(meta: &ParseNestedMeta, key: &str) -> Result<String, syn::Error> {
    if meta.input.peek(Token![=]) {
        Ok(lit_str(meta, key)?.value())
    } else {
        Ok(String::new())
    }
}

/// Parses a `default` value written as a string, number or boolean literal.
///
/// Numbers keep their written digits without any type suffix, and a leading
/// minus sign is preserved.
pub(crate) fn default_value(meta: &ParseNestedMeta) -> Result<String, syn::Error> {
    let input = meta.value()?;
    let negative = input.parse::<Option<Token![-]>>()?.is_some();
    let literal = input.parse::<Lit>()?;
    let text = match (&literal, negative) {
        (Lit::Str(s), false) => s.value(),
        (Lit::Bool(b), false) => b.value.to_string(),
        (Lit::Int(i), _) => i.base10_digits().to_owned(),
        (Lit::Float(f), _) => f.base10_digits().to_owned(),
        _ => {
            return Err(syn::Error::new(
                literal.span(),
                "default must be a string, number or boolean literal",
            ));
        }
    };
    Ok(if negative { format!("-{text}") } else { text })
}
