// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

/// Field kind for code generation
enum FieldKind {
    /// Fixed-size scalar (u8, i32, f64, etc.)
    Primitive(proc_macro2::TokenStream),
    /// `[T; N]` where `T: Record`
    Array { len: syn::Expr, element: Type },
    /// Any other named type; must itself implement `Record`
    Nested,
    /// Reference, raw pointer, smart pointer or fn pointer
    Reference,
}

/// Declared `#[repr]`, mirrored into `::rawpack::Repr`
enum ReprKind {
    Rust,
    C,
    Packed,
    Transparent,
}

/// `#[derive(Record)]` macro: generates the `TypeDescriptor` for a struct
///
/// Offsets and sizes come from `offset_of!`/`size_of`, so the descriptor
/// always reflects the layout the compiler actually chose. Whether that
/// layout can be packed is decided at runtime by the layout resolver.
///
/// Supports:
/// - Primitive types: i8, i16, i32, i64, u8, u16, u32, u64, f32, f64
/// - Fixed arrays `[T; N]` of primitives or records
/// - Nested records
/// - References and pointers (described, then rejected by the resolver)
///
/// Strings, collections and slices are compile errors: they are neither
/// `Copy` nor fixed-size.
///
/// # Panics
///
/// Never; unsupported input becomes a compile error.
///
/// Example:
/// ```ignore
/// use rawpack::Record;
///
/// #[repr(C, packed)]
/// #[derive(Clone, Copy, Record)]
/// struct TestStruct {
///     a: i16,
///     b: i16,
///     c: i64,
/// }
/// ```
#[proc_macro_derive(Record)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let type_name = name.to_string();

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(&input.generics, "Generic records are not supported")
            .to_compile_error()
            .into();
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return syn::Error::new_spanned(&input, "Only named fields are supported")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(
                &input,
                "Only structs are supported; enums and unions carry invalid bit patterns",
            )
            .to_compile_error()
            .into()
        }
    };

    let repr = match parse_repr(&input.attrs) {
        Ok(repr) => repr,
        Err(err) => return err.to_compile_error().into(),
    };
    let repr_tokens = match repr {
        ReprKind::Rust => quote! { ::rawpack::Repr::Rust },
        ReprKind::C => quote! { ::rawpack::Repr::C },
        ReprKind::Packed => quote! { ::rawpack::Repr::Packed },
        ReprKind::Transparent => quote! { ::rawpack::Repr::Transparent },
    };

    let mut field_layouts = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return syn::Error::new_spanned(field, "Field must have a name")
                .to_compile_error()
                .into();
        };
        let field_type = &field.ty;

        let kind = match get_field_kind(field_type) {
            Ok(kind) => kind,
            Err(err) => return err.to_compile_error().into(),
        };

        let name_str = field_name.to_string();
        let offset = quote! { ::core::mem::offset_of!(#name, #field_name) as u32 };
        let size = quote! { ::core::mem::size_of::<#field_type>() as u32 };

        let layout = match kind {
            FieldKind::Primitive(kind_tokens) => quote! {
                ::rawpack::FieldLayout::primitive(#name_str, #offset, #kind_tokens)
            },
            FieldKind::Array { len, element } => quote! {
                ::rawpack::FieldLayout::array(
                    #name_str,
                    #offset,
                    (#len) as u32,
                    #size,
                    <#element as ::rawpack::Record>::type_descriptor,
                )
            },
            FieldKind::Nested => quote! {
                ::rawpack::FieldLayout::nested(
                    #name_str,
                    #offset,
                    #size,
                    <#field_type as ::rawpack::Record>::type_descriptor,
                )
            },
            FieldKind::Reference => quote! {
                ::rawpack::FieldLayout::opaque(#name_str, #offset, ::rawpack::FieldType::Reference, #size)
            },
        };
        field_layouts.push(layout);
    }

    let expanded = quote! {
        // SAFETY: every field is listed with its compiler-reported offset and
        // size; scalar kinds exclude types with invalid bit patterns.
        unsafe impl ::rawpack::Record for #name {
            fn type_descriptor() -> &'static ::rawpack::TypeDescriptor {
                static DESCRIPTOR: ::rawpack::TypeDescriptor = ::rawpack::TypeDescriptor {
                    type_name: #type_name,
                    repr: #repr_tokens,
                    size_bytes: ::core::mem::size_of::<#name>() as u32,
                    primitive: ::core::option::Option::None,
                    fields: &[#(#field_layouts),*],
                };
                &DESCRIPTOR
            }
        }
    };

    TokenStream::from(expanded)
}

/// Read `#[repr(...)]` attributes
fn parse_repr(attrs: &[syn::Attribute]) -> syn::Result<ReprKind> {
    let mut c = false;
    let mut transparent = false;
    let mut packed: Option<u32> = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("C") {
                c = true;
            } else if meta.path.is_ident("transparent") {
                transparent = true;
            } else if meta.path.is_ident("packed") {
                if meta.input.peek(syn::token::Paren) {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let lit: syn::LitInt = content.parse()?;
                    packed = Some(lit.base10_parse()?);
                } else {
                    packed = Some(1);
                }
            } else if meta.path.is_ident("align") {
                // align(N) can only add trailing padding; the resolver sees it via size_of
                let content;
                syn::parenthesized!(content in meta.input);
                let _: syn::LitInt = content.parse()?;
            } else {
                return Err(meta.error("unsupported repr for a record"));
            }
            Ok(())
        })?;
    }

    Ok(match (transparent, packed, c) {
        (true, _, _) => ReprKind::Transparent,
        (false, Some(1), _) => ReprKind::Packed,
        (false, Some(_), _) | (false, None, true) => ReprKind::C,
        (false, None, false) => ReprKind::Rust,
    })
}

/// Get field kind for a Rust type
fn get_field_kind(ty: &Type) -> syn::Result<FieldKind> {
    match ty {
        Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return Err(syn::Error::new_spanned(ty, "Empty type path"));
            };
            let ident_str = segment.ident.to_string();

            if let Some(kind_tokens) = primitive_kind(&ident_str) {
                return Ok(FieldKind::Primitive(kind_tokens));
            }
            match ident_str.as_str() {
                "bool" | "char" => Err(syn::Error::new_spanned(
                    ty,
                    format!("`{ident_str}` is not valid for every bit pattern; use an integer"),
                )),
                "usize" | "isize" => Err(syn::Error::new_spanned(
                    ty,
                    format!("`{ident_str}` is platform-sized; use a fixed-width integer"),
                )),
                "Option" => Err(syn::Error::new_spanned(
                    ty,
                    "Option carries a discriminant; not every bit pattern is valid",
                )),
                "String" | "str" | "CString" | "CStr" | "OsString" | "OsStr" | "PathBuf"
                | "Path" | "Vec" | "VecDeque" | "HashMap" | "HashSet" | "BTreeMap"
                | "BTreeSet" => Err(variable_length(ty)),
                "Box" | "Rc" | "Arc" | "NonNull" | "Weak" => Ok(FieldKind::Reference),
                _ => Ok(FieldKind::Nested),
            }
        }
        Type::Array(array) => match get_field_kind(&array.elem)? {
            FieldKind::Primitive(_) | FieldKind::Nested => Ok(FieldKind::Array {
                len: array.len.clone(),
                element: (*array.elem).clone(),
            }),
            FieldKind::Reference => Ok(FieldKind::Reference),
            FieldKind::Array { .. } => Err(syn::Error::new_spanned(
                ty,
                "Nested arrays are not supported; wrap the inner array in a record",
            )),
        },
        Type::Reference(_) | Type::Ptr(_) | Type::BareFn(_) => Ok(FieldKind::Reference),
        Type::Slice(_) => Err(variable_length(ty)),
        Type::Paren(inner) => get_field_kind(&inner.elem),
        Type::Group(inner) => get_field_kind(&inner.elem),
        Type::Tuple(_) => Err(syn::Error::new_spanned(
            ty,
            "Tuples have an unspecified layout; use a record",
        )),
        _ => Err(syn::Error::new_spanned(
            ty,
            "Unsupported type. Supported types: primitives, arrays, records.",
        )),
    }
}

fn variable_length(ty: &Type) -> syn::Error {
    syn::Error::new_spanned(
        ty,
        "Variable-length field; records hold only fixed-size data (use a fixed array)",
    )
}

fn primitive_kind(ident: &str) -> Option<proc_macro2::TokenStream> {
    let tokens = match ident {
        "u8" => quote! { ::rawpack::PrimitiveKind::U8 },
        "u16" => quote! { ::rawpack::PrimitiveKind::U16 },
        "u32" => quote! { ::rawpack::PrimitiveKind::U32 },
        "u64" => quote! { ::rawpack::PrimitiveKind::U64 },
        "i8" => quote! { ::rawpack::PrimitiveKind::I8 },
        "i16" => quote! { ::rawpack::PrimitiveKind::I16 },
        "i32" => quote! { ::rawpack::PrimitiveKind::I32 },
        "i64" => quote! { ::rawpack::PrimitiveKind::I64 },
        "f32" => quote! { ::rawpack::PrimitiveKind::F32 },
        "f64" => quote! { ::rawpack::PrimitiveKind::F64 },
        _ => return None,
    };
    Some(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(src: &str) -> syn::Result<FieldKind> {
        let ty: Type = syn::parse_str(src).expect("valid type");
        get_field_kind(&ty)
    }

    fn repr_of(src: &str) -> ReprKind {
        let input: DeriveInput = syn::parse_str(src).expect("valid item");
        parse_repr(&input.attrs).expect("valid repr")
    }

    #[test]
    fn classifies_scalars_and_containers() {
        assert!(matches!(kind_of("u16"), Ok(FieldKind::Primitive(_))));
        assert!(matches!(kind_of("f64"), Ok(FieldKind::Primitive(_))));
        assert!(matches!(kind_of("[u8; 4]"), Ok(FieldKind::Array { .. })));
        assert!(matches!(kind_of("Header"), Ok(FieldKind::Nested)));
        assert!(matches!(kind_of("[Header; 2]"), Ok(FieldKind::Array { .. })));
        assert!(matches!(kind_of("&'static str"), Ok(FieldKind::Reference)));
        assert!(matches!(kind_of("*const u8"), Ok(FieldKind::Reference)));
        assert!(matches!(kind_of("Box<u32>"), Ok(FieldKind::Reference)));
        assert!(matches!(kind_of("fn(u8) -> u8"), Ok(FieldKind::Reference)));
    }

    #[test]
    fn rejects_invalid_bit_patterns() {
        assert!(kind_of("bool").is_err());
        assert!(kind_of("char").is_err());
        assert!(kind_of("Option<u32>").is_err());
        assert!(kind_of("usize").is_err());
        assert!(kind_of("(u8, u16)").is_err());
        assert!(kind_of("[[u8; 2]; 2]").is_err());
    }

    #[test]
    fn rejects_variable_length_fields() {
        assert!(kind_of("String").is_err());
        assert!(kind_of("Vec<u8>").is_err());
        assert!(kind_of("std::collections::HashMap<u8, u8>").is_err());
        assert!(kind_of("[String; 2]").is_err());
        assert!(kind_of("[u8]").is_err());
        assert!(matches!(kind_of("&'static [u8]"), Ok(FieldKind::Reference)));
    }

    #[test]
    fn reads_repr_attributes() {
        assert!(matches!(repr_of("#[repr(C, packed)] struct A;"), ReprKind::Packed));
        assert!(matches!(repr_of("#[repr(packed(1))] struct A;"), ReprKind::Packed));
        assert!(matches!(repr_of("#[repr(C, packed(4))] struct A;"), ReprKind::C));
        assert!(matches!(repr_of("#[repr(C)] struct A;"), ReprKind::C));
        assert!(matches!(repr_of("#[repr(transparent)] struct A;"), ReprKind::Transparent));
        assert!(matches!(repr_of("#[derive(Clone)] struct A;"), ReprKind::Rust));
        assert!(matches!(repr_of("#[repr(C, align(8))] struct A;"), ReprKind::C));
    }
}
