//! Type introspection helpers.
//!
//! These utilities perform shallow, syntactic inspection of `syn::Type`
//! values to recognise `Option<T>` wrappers and the kinds the loader cannot
//! populate.

use syn::{GenericArgument, PathArguments, Type};

/// Path types the loader cannot fill from a single string: collections,
/// channels, shared-ownership and interior-mutability wrappers, and markers.
const UNSUPPORTED_PATHS: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashMap",
    "BTreeMap",
    "HashSet",
    "BTreeSet",
    "BinaryHeap",
    "Box",
    "Sender",
    "SyncSender",
    "Receiver",
    "Rc",
    "Arc",
    "Weak",
    "Cell",
    "RefCell",
    "OnceCell",
    "OnceLock",
    "Mutex",
    "RwLock",
    "PhantomData",
];

/// Strips invisible groups and parentheses around a type.
fn strip(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => strip(&group.elem),
        Type::Paren(paren) => strip(&paren.elem),
        other => other,
    }
}

/// Extract the first type argument from a `PathArguments` container.
fn extract_first_type_argument(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(angle_args) = args else {
        return None;
    };
    let first = angle_args.args.first()?;
    let GenericArgument::Type(inner) = first else {
        return None;
    };
    Some(inner)
}

/// Returns the final path segment identifier of `ty`, if it is a path.
fn last_ident(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(p) = strip(ty) else {
        return None;
    };
    p.path.segments.last()
}

/// Returns the inner type if `ty` is `Option<T>`.
///
/// The check only inspects the outermost layer and accepts qualified forms
/// such as `std::option::Option<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let last = last_ident(ty)?;
    if last.ident != "Option" {
        return None;
    }
    extract_first_type_argument(&last.arguments)
}

/// Peels every `Option` layer, returning the innermost type and the number
/// of layers removed.
pub(crate) fn peel_options(ty: &Type) -> (&Type, usize) {
    let mut current = ty;
    let mut depth = 0;
    while let Some(inner) = option_inner(current) {
        current = inner;
        depth += 1;
    }
    (current, depth)
}

/// Returns `true` for kinds the loader skips: the path types listed in
/// `UNSUPPORTED_PATHS`, arrays, slices, tuples, references, raw pointers,
/// function pointers and trait objects.
pub(crate) fn is_unsupported(ty: &Type) -> bool {
    match strip(ty) {
        Type::Path(_) => last_ident(ty)
            .is_some_and(|segment| UNSUPPORTED_PATHS.iter().any(|name| segment.ident == name)),
        Type::Array(_)
        | Type::Slice(_)
        | Type::Tuple(_)
        | Type::Ptr(_)
        | Type::Reference(_)
        | Type::BareFn(_)
        | Type::TraitObject(_)
        | Type::ImplTrait(_)
        | Type::Never(_) => true,
        _ => false,
    }
}

/// Identifier used to name a tuple-struct field after its type.
pub(crate) fn type_name(ty: &Type) -> Option<String> {
    last_ident(ty).map(|segment| segment.ident.to_string())
}
