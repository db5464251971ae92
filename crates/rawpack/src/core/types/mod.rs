// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static layout metadata for records.
//!
//! Provides `TypeDescriptor` for field layout metadata and the `Record`
//! trait tying a Rust type to its descriptor.

pub mod descriptor;
pub mod record;

pub use descriptor::{DescriptorFn, FieldLayout, FieldType, PrimitiveKind, Repr, TypeDescriptor};
pub use record::Record;
