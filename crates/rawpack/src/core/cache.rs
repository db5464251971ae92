// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent cache of per-type codecs.
//!
//! The CodecCache ensures that layout resolution happens only once per
//! record type. Later lookups copy the published `Codec<T>` out of a sharded
//! `DashMap` keyed by `TypeId`, so unrelated types never contend on a
//! common lock.
//!
//! Entries move one way, `Unbuilt -> Built`, and are never evicted: the set
//! of record types is fixed at compile time. Concurrent first uses may each
//! build a codec; the first to publish wins and the others adopt its entry.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::config::CacheConfig;
use crate::core::codec::Codec;
use crate::core::layout::PackedSize;
use crate::core::types::Record;
use crate::error::Result;

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Codecs actually published (losing racers are not counted).
    pub builds: u64,
    pub entries: usize,
}

/// Build-once cache of [`Codec`]s, one per record type.
pub struct CodecCache {
    entries: DashMap<TypeId, Box<dyn Any + Send + Sync>>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
}

impl CodecCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    #[must_use]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::with_capacity(config.initial_capacity),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            builds: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Fetch the codec for `T`, building and publishing it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ineligible`](crate::Error::Ineligible) if `T` cannot
    /// be packed. Rejections are not cached.
    pub fn codec<T: Record>(&self) -> Result<Codec<T>> {
        let key = TypeId::of::<T>();

        if let Some(hit) = self.try_peek::<T>(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(hit);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let start = Instant::now();
        let built = match Codec::<T>::build(self.config.repr_policy) {
            Ok(codec) => codec,
            Err(err) => {
                log::warn!("[CodecCache] rejected {}: {}", std::any::type_name::<T>(), err);
                return Err(err);
            }
        };

        let published = match self.entries.entry(key) {
            Entry::Occupied(existing) => existing
                .get()
                .downcast_ref::<Codec<T>>()
                .copied()
                .unwrap_or(built),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(built));
                self.builds.fetch_add(1, Ordering::Relaxed);
                log::debug!(
                    "[CodecCache] built codec for {} ({}) in {}ns",
                    built.type_name(),
                    built.packed_size(),
                    start.elapsed().as_nanos()
                );
                built
            }
        };
        Ok(published)
    }

    /// Packed size of `T` (cached through the codec).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ineligible`](crate::Error::Ineligible) if `T` cannot be packed.
    pub fn packed_size<T: Record>(&self) -> Result<PackedSize> {
        Ok(self.codec::<T>()?.packed_size())
    }

    /// Encode `value` into a new buffer of exactly `packed_size` bytes.
    ///
    /// # Errors
    ///
    /// Fails only when the codec for `T` cannot be built.
    pub fn encode<T: Record>(&self, value: &T) -> Result<Vec<u8>> {
        Ok(self.codec::<T>()?.encode(value))
    }

    /// Bounds-checked decode.
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`](crate::Error::SizeMismatch) if `data.len()`
    /// differs from the packed size of `T`, or
    /// [`Error::Ineligible`](crate::Error::Ineligible) if `T` cannot be packed.
    pub fn decode_checked<T: Record>(&self, data: &[u8]) -> Result<T> {
        self.codec::<T>()?.decode(data)
    }

    /// Decode without a length check.
    ///
    /// # Errors
    ///
    /// Fails only when the codec for `T` cannot be built; the copy itself
    /// has no error path.
    ///
    /// # Safety
    ///
    /// `data.len()` must be at least the packed size of `T`. A shorter
    /// buffer is an out-of-bounds read.
    pub unsafe fn decode_unchecked<T: Record>(&self, data: &[u8]) -> Result<T> {
        let codec = self.codec::<T>()?;
        Ok(codec.decode_unchecked(data))
    }

    /// Whether a codec for `T` has been published.
    #[must_use]
    pub fn contains<T: Record>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    fn try_peek<T: Record>(&self, key: &TypeId) -> Option<Codec<T>> {
        let entry = self.entries.get(key)?;
        entry.downcast_ref::<Codec<T>>().copied()
    }
}

impl Default for CodecCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CodecCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecCache")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}
