// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use rawpack::{CodecCache, Error, Record};

#[repr(C, packed)]
#[derive(Clone, Copy, Record)]
struct Header {
    kind: u8,
    flags: u16,
    length: u32,
}

#[repr(C, packed)]
#[derive(Clone, Copy, Record)]
struct Packet {
    header: Header,
    stamp: f64,
    body: [i16; 5],
}

fuzz_target!(|data: &[u8]| {
    let cache = CodecCache::new();

    // Any input either decodes exactly or is rejected on length
    for result in [
        cache.decode_checked::<Packet>(data).map(|p| cache.encode(&p)),
        cache.decode_checked::<Header>(data).map(|h| cache.encode(&h)),
    ] {
        match result {
            Ok(Ok(bytes)) => assert_eq!(bytes.as_slice(), data),
            Ok(Err(err)) => panic!("encode failed after decode: {err}"),
            Err(Error::SizeMismatch { actual, .. }) => assert_eq!(actual, data.len()),
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    // Scalars
    let _ = cache.decode_checked::<u64>(data);
    let _ = cache.decode_checked::<f32>(data);
});
