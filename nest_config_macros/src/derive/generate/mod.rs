//! Code generation for `#[derive(NestConfig)]`.
//!
//! Emits `NestConfig::fields`, which lists every field with its tag table
//! and storage slot, and a `Field` impl exposing the struct as a record.

use proc_macro2::{Ident, TokenStream, TokenTree};
use quote::{ToTokens, quote};
use syn::{Generics, Type, parse_quote};

use super::parse::{FieldInput, ParsedInput, is_unsupported, option_inner, peel_options};

/// Whether the generated code borrows the field at all.
///
/// Private, statically ignored and unsupported fields are never touched.
fn is_borrowed(field: &FieldInput) -> bool {
    field.exported && !field.attrs.is_ignored() && !is_unsupported(peel_options(&field.ty).0)
}

/// Builds the slot expression for one field.
///
/// `Option` layers are filled with `Default::default()` before the inner
/// value is exposed.
fn slot(field: &FieldInput, krate: &TokenStream) -> TokenStream {
    if !is_borrowed(field) {
        return quote! { #krate::Slot::Unsupported };
    }
    let depth = peel_options(&field.ty).1;
    let member = &field.member;
    let access = if depth == 0 {
        quote! { &mut self.#member }
    } else {
        let fill = std::iter::repeat_n(
            quote! { .get_or_insert_with(::core::default::Default::default) },
            depth,
        );
        quote! { self.#member #(#fill)* }
    };
    quote! { #krate::Field::slot(#access) }
}

fn schema_field(field: &FieldInput, krate: &TokenStream) -> TokenStream {
    let name = &field.name;
    let exported = field.exported;
    let keys = field.attrs.tags.iter().map(|(key, _)| key);
    let values = field.attrs.tags.iter().map(|(_, value)| value);
    let slot = slot(field, krate);
    quote! {
        #krate::SchemaField {
            name: #name,
            exported: #exported,
            tags: #krate::Tags::new(&[#((#keys, #values)),*]),
            slot: #slot,
        }
    }
}

/// Returns `true` when `tokens` names one of `params`.
fn mentions(tokens: TokenStream, params: &[&Ident]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => params.iter().any(|param| **param == ident),
        TokenTree::Group(group) => mentions(group.stream(), params),
        _ => false,
    })
}

/// Adds the bounds the generated bodies rely on for fields whose type uses a
/// generic parameter: the innermost type must be a `Field`, and every
/// `Option` layer's content must be `Default`.
fn bounded_generics(parsed: &ParsedInput, krate: &TokenStream) -> Generics {
    let mut generics = parsed.generics.clone();
    let params: Vec<&Ident> = parsed
        .generics
        .type_params()
        .map(|param| &param.ident)
        .collect();
    if params.is_empty() {
        return generics;
    }
    let clause = generics.make_where_clause();
    for field in parsed.fields.iter().filter(|field| is_borrowed(field)) {
        if !mentions(field.ty.to_token_stream(), &params) {
            continue;
        }
        let mut current: &Type = &field.ty;
        while let Some(inner) = option_inner(current) {
            clause
                .predicates
                .push(parse_quote!(#inner: ::core::default::Default));
            current = inner;
        }
        clause.predicates.push(parse_quote!(#current: #krate::Field));
    }
    generics
}

/// Emits the `NestConfig` and `Field` implementations for `parsed`.
pub(crate) fn impls(parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &parsed.ident;
    let generics = bounded_generics(parsed, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let fields = parsed.fields.iter().map(|field| schema_field(field, krate));
    quote! {
        impl #impl_generics #krate::NestConfig for #ident #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<#krate::SchemaField<'_>> {
                ::std::vec![#(#fields),*]
            }
        }

        impl #impl_generics #krate::Field for #ident #ty_generics #where_clause {
            fn slot(&mut self) -> #krate::Slot<'_> {
                #krate::Slot::Record(self)
            }
        }
    }
}
