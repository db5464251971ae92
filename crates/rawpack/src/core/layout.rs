// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Layout resolver: packed size and eligibility of a record type.
//!
//! A record is eligible when its bytes in memory are exactly its fields laid
//! end to end with 1-byte packing:
//!
//! ```text
//! repr(C, packed)   { a: i16, b: i16, c: i64 }
//! offset            0       2       4          size 12   -> eligible
//!
//! repr(C)           { a: i16, c: i64 }
//! offset            0       8                  size 16   -> gap at 2..8
//! ```
//!
//! Pure functions; nothing here touches the codec cache.

use std::fmt;

use crate::config::ReprPolicy;
use crate::core::types::{FieldLayout, FieldType, Record, Repr, TypeDescriptor};
use crate::error::{Error, IneligibleReason, Result};

/// Exact number of bytes a record occupies under 1-byte packing.
///
/// Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedSize(usize);

impl PackedSize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<PackedSize> for usize {
    fn from(size: PackedSize) -> Self {
        size.0
    }
}

impl PartialEq<usize> for PackedSize {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for PackedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

/// Resolve the packed size of `desc` under the default [`ReprPolicy`].
///
/// # Errors
///
/// Returns [`Error::Ineligible`] if the record has reference or
/// variable-length fields, an unstable or unpacked repr, or padding.
pub fn resolve_layout(desc: &TypeDescriptor) -> Result<PackedSize> {
    resolve_layout_with(desc, ReprPolicy::default())
}

/// Resolve the packed size of `desc` under an explicit policy.
///
/// # Errors
///
/// See [`resolve_layout`].
pub fn resolve_layout_with(desc: &TypeDescriptor, policy: ReprPolicy) -> Result<PackedSize> {
    let packed = packed_bytes(desc, policy)
        .and_then(|packed| match packed {
            // Zero-sized members are fine, the record as a whole is not
            0 => Err(IneligibleReason::ZeroSized),
            n => Ok(n),
        })
        .map_err(|reason| Error::Ineligible {
            type_name: desc.type_name,
            reason,
        })?;
    log::trace!(
        "[layout] {} ({}) resolved to {} packed bytes",
        desc.type_name,
        desc.repr,
        packed
    );
    Ok(PackedSize(packed as usize))
}

/// Resolve `T` and check the descriptor against `size_of::<T>()`.
///
/// # Errors
///
/// See [`resolve_layout`]; additionally fails with
/// [`IneligibleReason::SizeOfMismatch`] when a hand-written descriptor
/// disagrees with the compiler's view of `T`.
pub fn resolve<T: Record>(policy: ReprPolicy) -> Result<PackedSize> {
    let desc = T::type_descriptor();
    let size = resolve_layout_with(desc, policy)?;
    let actual = std::mem::size_of::<T>();
    if size.get() != actual {
        return Err(Error::Ineligible {
            type_name: desc.type_name,
            reason: IneligibleReason::SizeOfMismatch {
                descriptor: size.get(),
                actual,
            },
        });
    }
    Ok(size)
}

fn packed_bytes(
    desc: &TypeDescriptor,
    policy: ReprPolicy,
) -> core::result::Result<u32, IneligibleReason> {
    if let Some(kind) = desc.primitive {
        let packed = kind.size_bytes();
        if desc.size_bytes != packed {
            return Err(IneligibleReason::TrailingPadding {
                packed,
                actual: desc.size_bytes,
            });
        }
        return Ok(packed);
    }

    match (desc.repr, policy) {
        (Repr::Rust, _) => return Err(IneligibleReason::UnstableRepr { repr: desc.repr }),
        (Repr::C, ReprPolicy::Strict) => {
            return Err(IneligibleReason::NotPacked { repr: desc.repr })
        }
        _ => {}
    }

    let mut offset = 0u32;
    for field in desc.fields {
        let computed = field_bytes(field, policy)?;
        if field.size_bytes != computed {
            return Err(IneligibleReason::FieldSizeMismatch {
                field: field.name,
                declared: field.size_bytes,
                computed,
            });
        }
        if field.offset_bytes != offset {
            return Err(IneligibleReason::ImplicitPadding {
                field: field.name,
                expected: offset,
                actual: field.offset_bytes,
            });
        }
        offset = offset
            .checked_add(computed)
            .ok_or(IneligibleReason::Overflow)?;
    }

    if desc.size_bytes != offset {
        return Err(IneligibleReason::TrailingPadding {
            packed: offset,
            actual: desc.size_bytes,
        });
    }
    Ok(offset)
}

fn field_bytes(
    field: &FieldLayout,
    policy: ReprPolicy,
) -> core::result::Result<u32, IneligibleReason> {
    match field.field_type {
        FieldType::Primitive(kind) => Ok(kind.size_bytes()),
        FieldType::Struct => {
            let element = field
                .element()
                .ok_or(IneligibleReason::MissingElement { field: field.name })?;
            packed_bytes(element, policy)
        }
        FieldType::Array { len } => {
            let element = field
                .element()
                .ok_or(IneligibleReason::MissingElement { field: field.name })?;
            packed_bytes(element, policy)?
                .checked_mul(len)
                .ok_or(IneligibleReason::Overflow)
        }
        FieldType::String | FieldType::Sequence => {
            Err(IneligibleReason::VariableLength { field: field.name })
        }
        FieldType::Reference => Err(IneligibleReason::ReferenceField { field: field.name }),
    }
}
