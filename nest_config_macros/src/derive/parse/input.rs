//! Input parsing for the `NestConfig` derive macro.
//!
//! This module gathers the struct identifier, generics, fields and attribute
//! metadata in one pass so macro expansion can fail fast with useful errors.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Generics, Ident, Index, Member, Type, Visibility};

use super::{
    FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs, peel_options, type_name,
};

/// A struct field as seen by the generator.
pub(crate) struct FieldInput {
    /// Expression used to access the field on `self`.
    pub member: Member,
    /// Identifier reported to the runtime.
    pub name: String,
    /// `false` for private fields.
    pub exported: bool,
    pub ty: Type,
    pub attrs: FieldAttrs,
}

/// Everything extracted from the derive input.
pub(crate) struct ParsedInput {
    pub ident: Ident,
    pub generics: Generics,
    pub struct_attrs: StructAttrs,
    pub fields: Vec<FieldInput>,
}

/// Gathers information from the user-provided struct.
///
/// Named fields are reported by their identifier. Tuple-struct fields are
/// reported by the last segment of their type, so `struct App(pub Server)`
/// exposes a field named `Server`.
pub(crate) fn parse_input(input: &DeriveInput) -> Result<ParsedInput, syn::Error> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "NestConfig can only be derived for structs",
        ));
    };

    let mut fields = Vec::new();
    for (position, field) in data.fields.iter().enumerate() {
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (
                Member::Unnamed(Index::from(position)),
                type_name(peel_options(&field.ty).0)
                    .unwrap_or_else(|| position.to_string()),
            ),
        };
        fields.push(FieldInput {
            member,
            name,
            exported: !matches!(field.vis, Visibility::Inherited),
            ty: field.ty.clone(),
            attrs: parse_field_attrs(&field.attrs)?,
        });
    }

    Ok(ParsedInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        struct_attrs,
        fields,
    })
}
