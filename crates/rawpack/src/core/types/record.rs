// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The `Record` trait: a Rust type paired with its static layout descriptor.

use super::descriptor::{PrimitiveKind, TypeDescriptor};

/// Fixed-size value type that can be marshaled as raw bytes.
///
/// Usually implemented through `#[derive(Record)]`, which reads the real
/// field offsets with `offset_of!` so the descriptor cannot drift from the
/// type definition.
///
/// # Safety
///
/// Implementors must guarantee that:
/// - `type_descriptor()` lists every field of `Self` with its true offset,
///   size and kind;
/// - every bit pattern of `size_of::<Self>()` bytes is a valid `Self` once
///   the layout resolver has accepted the descriptor (no `bool`, `char`,
///   enums or niche-carrying fields).
///
/// Reference and variable-length fields may be *described* (they make the
/// resolver reject the type); they must never be hidden.
pub unsafe trait Record: Copy + 'static {
    /// Type descriptor (derive macro or manual registration)
    fn type_descriptor() -> &'static TypeDescriptor;
}

macro_rules! primitive_record {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            // SAFETY: scalar integers and floats accept every bit pattern.
            unsafe impl Record for $ty {
                fn type_descriptor() -> &'static TypeDescriptor {
                    static DESCRIPTOR: TypeDescriptor = TypeDescriptor::primitive(PrimitiveKind::$kind);
                    &DESCRIPTOR
                }
            }
        )*
    };
}

primitive_record! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor_of<T: Record>() -> &'static TypeDescriptor {
        T::type_descriptor()
    }

    #[test]
    fn primitive_descriptors_match_size_of() {
        assert_eq!(descriptor_of::<u8>().size_bytes, 1);
        assert_eq!(descriptor_of::<i16>().size_bytes, 2);
        assert_eq!(descriptor_of::<u32>().size_bytes, 4);
        assert_eq!(descriptor_of::<f64>().size_bytes, 8);
        assert_eq!(descriptor_of::<i64>().primitive, Some(PrimitiveKind::I64));
    }

    #[test]
    fn descriptor_is_a_single_static() {
        let a = descriptor_of::<u16>();
        let b = descriptor_of::<u16>();
        assert!(std::ptr::eq(a, b));
    }
}
