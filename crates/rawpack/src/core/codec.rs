// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-specialized encode/decode pair.
//!
//! A `Codec<T>` is built once per record type by the layout resolver and
//! then copied out of the cache on every use. Both routines are plain
//! monomorphized functions: encoding copies `size_of::<T>()` bytes out of
//! the value, decoding reads them back with an unaligned load.

use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use crate::config::ReprPolicy;
use crate::core::layout::{self, PackedSize};
use crate::core::types::Record;
use crate::error::{Error, Result};

type EncodeFn<T> = fn(&T) -> Vec<u8>;
type DecodeFn<T> = unsafe fn(&[u8]) -> T;

/// Encode/decode pair bound to one record type.
///
/// Only obtainable through [`Codec::build`] (or a [`CodecCache`]), so a
/// `Codec<T>` in hand means `T` passed the layout resolver: no padding, no
/// references, every byte of the value initialized.
///
/// [`CodecCache`]: crate::CodecCache
pub struct Codec<T: Record> {
    type_name: &'static str,
    size: PackedSize,
    encode_fn: EncodeFn<T>,
    decode_fn: DecodeFn<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> Codec<T> {
    /// Resolve `T` and bind the copy routines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ineligible`] if `T` cannot be packed under `policy`.
    pub fn build(policy: ReprPolicy) -> Result<Self> {
        let size = layout::resolve::<T>(policy)?;
        Ok(Self {
            type_name: T::type_descriptor().type_name,
            size,
            encode_fn: encode_raw::<T>,
            decode_fn: decode_raw::<T>,
            _marker: PhantomData,
        })
    }

    #[must_use]
    pub fn packed_size(&self) -> PackedSize {
        self.size
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Copy the bit pattern of `value` into a new buffer of `packed_size` bytes.
    #[must_use]
    pub fn encode(&self, value: &T) -> Vec<u8> {
        (self.encode_fn)(value)
    }

    /// Borrow the bytes of `value` without copying.
    #[must_use]
    pub fn bytes_of<'a>(&self, value: &'a T) -> &'a [u8] {
        // SAFETY: the resolver proved `T` has no padding, so all
        // `size_of::<T>()` bytes behind `value` are initialized.
        unsafe { raw_bytes(value) }
    }

    /// Decode a buffer of exactly `packed_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] if `data.len()` differs from the
    /// packed size. The buffer is never truncated or padded.
    pub fn decode(&self, data: &[u8]) -> Result<T> {
        if data.len() != self.size.get() {
            return Err(Error::SizeMismatch {
                type_name: self.type_name,
                expected: self.size.get(),
                actual: data.len(),
            });
        }
        // SAFETY: length checked above.
        Ok(unsafe { (self.decode_fn)(data) })
    }

    /// Decode the first `packed_size` bytes of `data` without a length check.
    ///
    /// Trusted-input fast path. Bytes past `packed_size` are ignored.
    ///
    /// # Safety
    ///
    /// `data.len()` must be at least `packed_size`. A shorter buffer makes
    /// this an out-of-bounds read, which is undefined behavior.
    #[must_use]
    pub unsafe fn decode_unchecked(&self, data: &[u8]) -> T {
        (self.decode_fn)(data)
    }
}

impl<T: Record> Clone for Codec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Record> Copy for Codec<T> {}

impl<T: Record> fmt::Debug for Codec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("type_name", &self.type_name)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// # Safety
///
/// `T` must contain no padding bytes.
unsafe fn raw_bytes<T: Record>(value: &T) -> &[u8] {
    std::slice::from_raw_parts(ptr::from_ref(value).cast::<u8>(), std::mem::size_of::<T>())
}

fn encode_raw<T: Record>(value: &T) -> Vec<u8> {
    // SAFETY: only reachable through a resolved `Codec<T>`.
    unsafe { raw_bytes(value) }.to_vec()
}

/// # Safety
///
/// `data` must hold at least `size_of::<T>()` bytes and `T` must accept
/// every bit pattern (guaranteed by the `Record` contract).
unsafe fn decode_raw<T: Record>(data: &[u8]) -> T {
    ptr::read_unaligned(data.as_ptr().cast::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{FieldLayout, PrimitiveKind, Repr, TypeDescriptor};
    use crate::error::IneligibleReason;

    #[repr(C, packed)]
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Sample {
        tag: u8,
        value: u32,
    }

    // SAFETY: descriptor mirrors the packed layout; all fields are integers.
    unsafe impl Record for Sample {
        fn type_descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: TypeDescriptor = TypeDescriptor::new(
                "Sample",
                Repr::Packed,
                5,
                &[
                    FieldLayout::primitive("tag", 0, PrimitiveKind::U8),
                    FieldLayout::primitive("value", 1, PrimitiveKind::U32),
                ],
            );
            &DESCRIPTOR
        }
    }

    #[repr(C)]
    #[derive(Debug, Clone, Copy)]
    struct Padded {
        tag: u8,
        value: u32,
    }

    // SAFETY: descriptor mirrors the real (padded) layout.
    unsafe impl Record for Padded {
        fn type_descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: TypeDescriptor = TypeDescriptor::new(
                "Padded",
                Repr::C,
                8,
                &[
                    FieldLayout::primitive("tag", 0, PrimitiveKind::U8),
                    FieldLayout::primitive("value", 4, PrimitiveKind::U32),
                ],
            );
            &DESCRIPTOR
        }
    }

    fn sample_codec() -> Codec<Sample> {
        Codec::build(ReprPolicy::Strict).expect("Sample is packed")
    }

    #[test]
    fn encode_copies_native_bytes() {
        let codec = sample_codec();
        let value = Sample {
            tag: 0xAB,
            value: 0x0102_0304,
        };

        let bytes = codec.encode(&value);
        assert_eq!(bytes.len(), 5);
        assert_eq!(bytes[0], 0xAB);
        assert_eq!(&bytes[1..], &0x0102_0304_u32.to_ne_bytes());
        assert_eq!(codec.bytes_of(&value), bytes.as_slice());
    }

    #[test]
    fn checked_decode_roundtrip() {
        let codec = sample_codec();
        let value = Sample {
            tag: 7,
            value: u32::MAX - 1,
        };
        let decoded = codec.decode(&codec.encode(&value)).expect("exact length");
        assert_eq!(decoded, value);
    }

    #[test]
    fn checked_decode_rejects_wrong_lengths() {
        let codec = sample_codec();
        for len in [0usize, 1, 4, 6, 64] {
            let buf = vec![0u8; len];
            assert_eq!(
                codec.decode(&buf),
                Err(Error::SizeMismatch {
                    type_name: "Sample",
                    expected: 5,
                    actual: len,
                })
            );
        }
    }

    #[test]
    fn unchecked_decode_reads_prefix() {
        let codec = sample_codec();
        let mut buf = codec.encode(&Sample { tag: 1, value: 42 });
        buf.extend_from_slice(&[0xFF; 3]);

        // SAFETY: buffer is longer than the packed size.
        let decoded = unsafe { codec.decode_unchecked(&buf) };
        assert_eq!(decoded, Sample { tag: 1, value: 42 });
    }

    #[test]
    fn decode_handles_unaligned_input() {
        let codec = Codec::<u64>::build(ReprPolicy::Strict).expect("scalar");
        let mut storage = vec![0u8; 9];
        storage[1..].copy_from_slice(&0xDEAD_BEEF_u64.to_ne_bytes());
        assert_eq!(codec.decode(&storage[1..]).expect("8 bytes"), 0xDEAD_BEEF);
    }

    #[test]
    fn padded_type_cannot_build() {
        let err = Codec::<Padded>::build(ReprPolicy::GapFree).expect_err("gap at 1..4");
        assert_eq!(
            err,
            Error::Ineligible {
                type_name: "Padded",
                reason: IneligibleReason::ImplicitPadding {
                    field: "value",
                    expected: 1,
                    actual: 4,
                },
            }
        );
    }

    #[test]
    fn codec_reports_its_type() {
        let codec = sample_codec();
        assert_eq!(codec.type_name(), "Sample");
        assert_eq!(codec.packed_size(), 5);
        let copy = codec;
        assert_eq!(copy.packed_size(), codec.packed_size());
        assert!(format!("{codec:?}").contains("Sample"));
    }
}
