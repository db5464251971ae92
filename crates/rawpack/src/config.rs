// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec cache configuration.
//!
//! - **Static**: compile-time defaults (`DEFAULT_INITIAL_CAPACITY`).
//! - **Per cache**: `CacheConfig`, handed to `CodecCache::with_config`.
//!
//! # Example
//!
//! ```
//! use rawpack::{CacheConfig, CodecCache, ReprPolicy};
//!
//! let cache = CodecCache::with_config(
//!     CacheConfig::default()
//!         .with_initial_capacity(16)
//!         .with_repr_policy(ReprPolicy::Strict),
//! );
//! assert!(cache.is_empty());
//! ```

/// Number of record types a cache reserves room for up front.
///
/// A program marshals a fixed set of types, usually a handful.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// How strictly the layout resolver treats declared packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReprPolicy {
    /// Accept `repr(C)` records as long as no field leaves a gap.
    #[default]
    GapFree,
    /// Require an explicit `repr(C, packed)` on every struct, nested ones included.
    Strict,
}

/// Configuration for a [`CodecCache`](crate::CodecCache).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entries reserved at construction.
    pub initial_capacity: usize,
    /// Packing rules applied when building codecs.
    pub repr_policy: ReprPolicy,
}

impl CacheConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            repr_policy: ReprPolicy::GapFree,
        }
    }

    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn with_repr_policy(mut self, policy: ReprPolicy) -> Self {
        self.repr_policy = policy;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}
