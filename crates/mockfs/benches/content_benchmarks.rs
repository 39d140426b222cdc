//! Benchmarks for virtual file content generation.
//!
//! Measures throughput of draining zero and random files, the cost of
//! piece regeneration at different piece sizes, and digest overhead.
//!
//! # Run Benchmarks
//!
//! ```bash
//! cargo bench --bench content_benchmarks
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mockfs::digest::{DEFAULT_BUFFER_SIZE, digest_with};
use mockfs::{ReadOutcome, VirtualFile};
use mockfs_core::{DigestAlgorithm, FileMode, PieceSize};
use std::hint::black_box;

const FILE_SIZE: u64 = 8 * 1024 * 1024;

fn drain(file: &mut VirtualFile, buf: &mut [u8]) -> u64 {
    let mut total = 0;
    while let ReadOutcome::Data(n) = file.read_chunk(buf).unwrap() {
        total += n as u64;
    }
    total
}

/// Drain throughput by content mode with a 64 KiB read buffer.
fn bench_drain_by_mode(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain_by_mode");
    group.throughput(Throughput::Bytes(FILE_SIZE));

    let mut buf = vec![0u8; DEFAULT_BUFFER_SIZE];

    group.bench_function("zero", |b| {
        b.iter(|| {
            let mut file = VirtualFile::zero("/bench/zero", FileMode::FILE, FILE_SIZE);
            black_box(drain(&mut file, &mut buf))
        });
    });

    group.bench_function("random", |b| {
        b.iter(|| {
            let mut file = VirtualFile::random("/bench/random", FileMode::FILE, FILE_SIZE);
            black_box(drain(&mut file, &mut buf))
        });
    });

    group.finish();
}

/// Random content throughput across piece sizes.
fn bench_piece_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_by_piece_size");
    group.throughput(Throughput::Bytes(FILE_SIZE));

    let mut buf = vec![0u8; DEFAULT_BUFFER_SIZE];

    for kib in [4_u64, 64, 1024] {
        let piece = PieceSize::new(kib * 1024).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(format!("{kib}KiB")), &piece, |b, &piece| {
            b.iter(|| {
                let mut file =
                    VirtualFile::random_with_piece_size("/bench/pieces", FileMode::FILE, FILE_SIZE, piece);
                black_box(drain(&mut file, &mut buf))
            });
        });
    }

    group.finish();
}

/// Small reads that stay inside one resident piece.
fn bench_small_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("small_reads");

    for chunk in [16_usize, 512, 4096] {
        group.throughput(Throughput::Bytes(1024 * 1024));
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            let mut buf = vec![0u8; chunk];
            b.iter(|| {
                let mut file = VirtualFile::random("/bench/small", FileMode::FILE, 1024 * 1024);
                black_box(drain(&mut file, &mut buf))
            });
        });
    }

    group.finish();
}

/// Digest cost on top of generation.
fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");
    group.throughput(Throughput::Bytes(FILE_SIZE));

    for algorithm in [DigestAlgorithm::Md5, DigestAlgorithm::Blake3] {
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm),
            &algorithm,
            |b, &algorithm| {
                b.iter(|| {
                    let file = VirtualFile::zero("/bench/digest", FileMode::FILE, FILE_SIZE);
                    black_box(digest_with(file, algorithm, DEFAULT_BUFFER_SIZE).unwrap())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_drain_by_mode,
    bench_piece_size,
    bench_small_reads,
    bench_digest
);
criterion_main!(benches);
