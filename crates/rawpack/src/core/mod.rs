// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Core Marshaling Components
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `types` | Layout descriptors and the `Record` trait |
//! | `layout` | Layout resolver (packed size, eligibility) |
//! | `codec` | Per-type encode/decode pair |
//! | `cache` | Build-once codec cache keyed by `TypeId` |
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------------------+
//! |        encode / decode_checked / decode_unchecked   |
//! +-----------------------------------------------------+
//! |   CodecCache  (TypeId -> Codec<T>, build once)      |
//! +-----------------------------------------------------+
//! |   Codec<T>    (monomorphized copy routines)         |
//! +-----------------------------------------------------+
//! |   Layout resolver  <-  TypeDescriptor (derive)      |
//! +-----------------------------------------------------+
//! ```

pub mod cache;
pub mod codec;
pub mod layout;
pub mod types;
