// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # rawpack - byte-exact marshaling of packed records
//!
//! Converts fixed-layout value types to and from their exact in-memory
//! bytes: no schema, no tags, no length prefix. The output matches a C
//! `#pragma pack(1)` struct byte-for-byte, in native byte order.
//!
//! ## Quick Start
//!
//! ```rust
//! use rawpack::Record;
//!
//! #[repr(C, packed)]
//! #[derive(Debug, Clone, Copy, PartialEq, Record)]
//! struct TestStruct {
//!     a: i16,
//!     b: i16,
//!     c: i64,
//! }
//!
//! let value = TestStruct { a: 0x0250, b: 0x0458, c: 0x1a3454 };
//! let bytes = rawpack::encode(&value)?;
//! assert_eq!(bytes.len(), 12);
//!
//! let back: TestStruct = rawpack::decode_checked(&bytes)?;
//! assert_eq!(back, value);
//!
//! assert!(rawpack::decode_checked::<TestStruct>(&bytes[..11]).is_err());
//! # Ok::<(), rawpack::Error>(())
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Record`] | Trait + derive tying a type to its [`TypeDescriptor`] |
//! | [`CodecCache`] | Build-once, per-type codec cache |
//! | [`Codec`] | Encode/decode pair for one type |
//! | [`PackedSize`] | Packed byte size of a record |
//!
//! ## Byte order
//!
//! Bytes are copied as they sit in memory. Both ends of a wire or file must
//! agree on the record layout and on endianness out of band.

// Allow the derive macro to work inside this crate's tests
extern crate self as rawpack;

/// Codec cache configuration.
pub mod config;
/// Layout descriptors, resolver, codec and codec cache.
pub mod core;
/// Error types.
pub mod error;
/// Free functions over the process-wide cache.
pub mod marshal;

pub use crate::config::{CacheConfig, ReprPolicy};
pub use crate::core::cache::{CacheStats, CodecCache};
pub use crate::core::codec::Codec;
pub use crate::core::layout::{resolve_layout, resolve_layout_with, PackedSize};
pub use crate::core::types::{
    DescriptorFn, FieldLayout, FieldType, PrimitiveKind, Record, Repr, TypeDescriptor,
};
pub use crate::error::{Error, IneligibleReason, Result};
pub use crate::marshal::{
    decode_checked, decode_unchecked, encode, global, packed_size, PackedExt,
};

// Derive macro (for #[derive(rawpack::Record)])
pub use rawpack_codegen::Record;
