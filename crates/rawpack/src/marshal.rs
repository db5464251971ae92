// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Free-function API over a process-wide codec cache.
//!
//! Convenience for callers that do not want to thread a [`CodecCache`]
//! through their code. The global cache uses the default [`CacheConfig`];
//! build an explicit cache for a different policy.
//!
//! [`CacheConfig`]: crate::CacheConfig

use std::sync::OnceLock;

use crate::core::cache::CodecCache;
use crate::core::layout::PackedSize;
use crate::core::types::Record;
use crate::error::Result;

static GLOBAL: OnceLock<CodecCache> = OnceLock::new();

/// Process-wide codec cache, created on first use.
pub fn global() -> &'static CodecCache {
    GLOBAL.get_or_init(CodecCache::new)
}

/// Packed size of `T`.
///
/// # Errors
///
/// Returns [`Error::Ineligible`](crate::Error::Ineligible) if `T` cannot be packed.
pub fn packed_size<T: Record>() -> Result<PackedSize> {
    global().packed_size::<T>()
}

/// Marshal `value` into its raw bytes, with no type information.
///
/// # Errors
///
/// Fails only if `T` cannot be packed.
pub fn encode<T: Record>(value: &T) -> Result<Vec<u8>> {
    global().encode(value)
}

/// Bounds-checked decode: `data.len()` must equal the packed size of `T`.
///
/// # Errors
///
/// [`Error::SizeMismatch`](crate::Error::SizeMismatch) on a length
/// disagreement; [`Error::Ineligible`](crate::Error::Ineligible) if `T`
/// cannot be packed.
pub fn decode_checked<T: Record>(data: &[u8]) -> Result<T> {
    global().decode_checked(data)
}

/// Decode without checking the buffer length.
///
/// # Errors
///
/// Fails only if `T` cannot be packed.
///
/// # Safety
///
/// Does not check array bounds: `data.len()` must be at least the packed
/// size of `T`, otherwise this reads past the end of the buffer.
pub unsafe fn decode_unchecked<T: Record>(data: &[u8]) -> Result<T> {
    global().decode_unchecked(data)
}

/// Method-call sugar over the global cache.
///
/// ```
/// use rawpack::{PackedExt, Record};
///
/// #[repr(C, packed)]
/// #[derive(Clone, Copy, Record)]
/// struct Sample {
///     id: u16,
///     value: u32,
/// }
///
/// let bytes = Sample { id: 1, value: 2 }.to_packed_bytes()?;
/// assert_eq!(bytes.len(), 6);
/// let back = Sample::from_packed_bytes(&bytes)?;
/// assert_eq!({ back.value }, 2);
/// # Ok::<(), rawpack::Error>(())
/// ```
pub trait PackedExt: Record {
    /// See [`encode`].
    ///
    /// # Errors
    ///
    /// Fails only if the type cannot be packed.
    fn to_packed_bytes(&self) -> Result<Vec<u8>> {
        encode(self)
    }

    /// See [`decode_checked`].
    ///
    /// # Errors
    ///
    /// Same as [`decode_checked`].
    fn from_packed_bytes(data: &[u8]) -> Result<Self> {
        decode_checked(data)
    }
}

impl<T: Record> PackedExt for T {}
