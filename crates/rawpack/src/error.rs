// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for layout resolution and checked decoding.

use thiserror::Error;

use crate::core::types::Repr;

/// Errors returned by rawpack operations.
///
/// Only two things can go wrong: a record type cannot be packed at all
/// (a programmer error in the type definition), or a buffer handed to the
/// checked decoder has the wrong length (recoverable by the caller).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The record type is not a fixed-size, gap-free value type.
    #[error("type `{type_name}` cannot be packed: {reason}")]
    Ineligible {
        type_name: &'static str,
        reason: IneligibleReason,
    },

    /// Checked decode received a buffer whose length differs from the packed size.
    #[error("`{type_name}` is {expected} bytes but buffer is {actual} bytes long")]
    SizeMismatch {
        type_name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Why the layout resolver rejected a record type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IneligibleReason {
    #[error("field `{field}` is a pointer or reference")]
    ReferenceField { field: &'static str },

    #[error("field `{field}` has variable length")]
    VariableLength { field: &'static str },

    #[error("{repr} does not guarantee field order or padding")]
    UnstableRepr { repr: Repr },

    #[error("{repr} is not packed; declare #[repr(C, packed)]")]
    NotPacked { repr: Repr },

    #[error("field `{field}` sits at offset {actual}, packed layout expects {expected}")]
    ImplicitPadding {
        field: &'static str,
        expected: u32,
        actual: u32,
    },

    #[error("record occupies {actual} bytes in memory but its fields only cover {packed}")]
    TrailingPadding { packed: u32, actual: u32 },

    #[error("field `{field}` declares {declared} bytes, its type takes {computed}")]
    FieldSizeMismatch {
        field: &'static str,
        declared: u32,
        computed: u32,
    },

    #[error("field `{field}` has no element descriptor")]
    MissingElement { field: &'static str },

    #[error("record has no bytes")]
    ZeroSized,

    #[error("packed size overflows u32")]
    Overflow,

    #[error("descriptor claims {descriptor} bytes, size_of reports {actual}")]
    SizeOfMismatch { descriptor: usize, actual: usize },
}

/// Convenient alias for results using the crate `Error` type.
pub type Result<T> = core::result::Result<T, Error>;
