// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec Latency Benchmark
//!
//! Measures the per-call cost of the marshaling paths:
//! - encode (owned buffer) vs borrowed byte view
//! - checked vs unchecked decode
//! - cold codec build vs warm cache lookup
//!
//! Steady-state calls should cost no more than a bounded memory copy.

#![allow(clippy::uninlined_format_args)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rawpack::{CodecCache, Record};
use std::hint::black_box as bb;

#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Record)]
struct TestStruct {
    a: i16,
    b: i16,
    c: i64,
}

#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Record)]
struct Frame {
    seq: u64,
    timestamp_ns: u64,
    header: TestStruct,
    payload: [u8; 256],
}

fn frame() -> Frame {
    Frame {
        seq: 42,
        timestamp_ns: 0,
        header: TestStruct {
            a: 0x0250,
            b: 0x0458,
            c: 0x1a3454,
        },
        payload: [0xAB; 256],
    }
}

/// Encode latency for a small and a large record
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let cache = CodecCache::new();

    let small = TestStruct { a: 1, b: 2, c: 3 };
    let large = frame();

    group.bench_function("test_struct", |b| {
        b.iter(|| cache.encode(bb(&small)).expect("encode should succeed"));
    });
    group.bench_function("frame", |b| {
        b.iter(|| cache.encode(bb(&large)).expect("encode should succeed"));
    });

    let codec = cache.codec::<Frame>().expect("eligible");
    group.bench_function("frame_bytes_of", |b| {
        b.iter(|| bb(codec.bytes_of(bb(&large))).len());
    });

    group.finish();
}

/// Checked vs unchecked decode
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let cache = CodecCache::new();
    let bytes = cache.encode(&frame()).expect("encode");

    group.bench_with_input(BenchmarkId::new("checked", bytes.len()), &bytes, |b, bytes| {
        b.iter(|| {
            cache
                .decode_checked::<Frame>(bb(bytes))
                .expect("decode should succeed")
        });
    });

    group.bench_with_input(BenchmarkId::new("unchecked", bytes.len()), &bytes, |b, bytes| {
        b.iter(|| {
            // SAFETY: `bytes` holds exactly one encoded Frame.
            unsafe { cache.decode_unchecked::<Frame>(bb(bytes)) }.expect("decode should succeed")
        });
    });

    group.finish();
}

/// First-use build cost vs cached lookup
fn bench_codec_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_lookup");

    group.bench_function("cold_build", |b| {
        b.iter(|| {
            let cache = CodecCache::new();
            cache.codec::<Frame>().expect("eligible").packed_size()
        });
    });

    let cache = CodecCache::new();
    cache.codec::<Frame>().expect("eligible");
    group.bench_function("warm_lookup", |b| {
        b.iter(|| cache.codec::<Frame>().expect("eligible").packed_size());
    });

    group.finish();
}

criterion_group!(
    codec_benches,
    bench_encode,
    bench_decode,
    bench_codec_lookup
);
criterion_main!(codec_benches);
