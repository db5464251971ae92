// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptor for record field layout.
//!
//! Defines `TypeDescriptor` and `FieldLayout` describing where each field of
//! a record lives in memory. Consumed by the layout resolver to decide
//! whether the record can be copied byte-for-byte.

use std::fmt;

/// Accessor for the descriptor of a nested record or array element.
///
/// Function pointer rather than a reference so descriptors can live in
/// `static` items that name other records' descriptors.
pub type DescriptorFn = fn() -> &'static TypeDescriptor;

/// Field type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Primitive(PrimitiveKind),
    /// Nested record; `element_type` points at its descriptor.
    Struct,
    /// Fixed-length array; `element_type` points at the element descriptor.
    Array { len: u32 },
    String,
    Sequence,
    /// Pointer, reference or smart pointer.
    Reference,
}

/// Scalars valid for every bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl PrimitiveKind {
    #[must_use]
    pub const fn size_bytes(self) -> u32 {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

/// Declared `#[repr]` of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repr {
    /// No `repr` attribute: field order and padding are unspecified.
    Rust,
    /// `#[repr(C)]` (or `packed(N)` with N > 1).
    C,
    /// `#[repr(C, packed)]` / `#[repr(packed(1))]`.
    Packed,
    /// `#[repr(transparent)]`.
    Transparent,
    /// Built-in scalar.
    Primitive,
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repr::Rust => write!(f, "repr(Rust)"),
            Repr::C => write!(f, "repr(C)"),
            Repr::Packed => write!(f, "repr(C, packed)"),
            Repr::Transparent => write!(f, "repr(transparent)"),
            Repr::Primitive => write!(f, "primitive"),
        }
    }
}

/// Layout of a single field
#[derive(Debug, Clone, Copy)]
pub struct FieldLayout {
    pub name: &'static str,
    /// Actual in-memory offset from the start of the record.
    pub offset_bytes: u32,
    pub field_type: FieldType,
    pub size_bytes: u32,
    pub element_type: Option<DescriptorFn>,
}

impl FieldLayout {
    /// Scalar field at `offset_bytes`.
    #[must_use]
    pub const fn primitive(name: &'static str, offset_bytes: u32, kind: PrimitiveKind) -> Self {
        Self {
            name,
            offset_bytes,
            field_type: FieldType::Primitive(kind),
            size_bytes: kind.size_bytes(),
            element_type: None,
        }
    }

    /// Nested record field.
    #[must_use]
    pub const fn nested(
        name: &'static str,
        offset_bytes: u32,
        size_bytes: u32,
        element: DescriptorFn,
    ) -> Self {
        Self {
            name,
            offset_bytes,
            field_type: FieldType::Struct,
            size_bytes,
            element_type: Some(element),
        }
    }

    /// Fixed-length array of `len` elements.
    #[must_use]
    pub const fn array(
        name: &'static str,
        offset_bytes: u32,
        len: u32,
        size_bytes: u32,
        element: DescriptorFn,
    ) -> Self {
        Self {
            name,
            offset_bytes,
            field_type: FieldType::Array { len },
            size_bytes,
            element_type: Some(element),
        }
    }

    /// Field of a kind with no element descriptor (strings, sequences, references).
    #[must_use]
    pub const fn opaque(
        name: &'static str,
        offset_bytes: u32,
        field_type: FieldType,
        size_bytes: u32,
    ) -> Self {
        Self {
            name,
            offset_bytes,
            field_type,
            size_bytes,
            element_type: None,
        }
    }

    /// Descriptor of the nested record or array element, if any.
    #[must_use]
    pub fn element(&self) -> Option<&'static TypeDescriptor> {
        self.element_type.map(|f| f())
    }
}

/// Type descriptor: layout metadata for one record type
#[derive(Debug)]
pub struct TypeDescriptor {
    pub type_name: &'static str, // e.g., "Point"
    pub repr: Repr,
    pub size_bytes: u32, // in-memory size, `size_of::<T>()`
    pub primitive: Option<PrimitiveKind>,
    pub fields: &'static [FieldLayout],
}

impl TypeDescriptor {
    /// Descriptor for a struct record (manual registration or `#[derive(Record)]`).
    #[must_use]
    pub const fn new(
        type_name: &'static str,
        repr: Repr,
        size_bytes: u32,
        fields: &'static [FieldLayout],
    ) -> Self {
        Self {
            type_name,
            repr,
            size_bytes,
            primitive: None,
            fields,
        }
    }

    /// Descriptor for a built-in scalar.
    #[must_use]
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        Self {
            type_name: kind.name(),
            repr: Repr::Primitive,
            size_bytes: kind.size_bytes(),
            primitive: Some(kind),
            fields: &[],
        }
    }

    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        self.primitive.is_some()
    }
}
