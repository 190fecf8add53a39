//! Benchmarks for digest throughput and state-record round trips.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;

use resumable_md5::Md5;

/// Generate random data of the specified size.
fn generate_random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0u8; size];
    rng.fill(&mut data[..]);
    data
}

/// Benchmark one-shot digest computation for different input sizes.
fn bench_oneshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_oneshot");

    for size in [64, 512, 4096, 32768, 131072, 1048576] {
        let data = generate_random_data(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("digest", size), &data, |b, data| {
            b.iter(|| black_box(Md5::oneshot(black_box(data))));
        });
    }

    group.finish();
}

/// Benchmark streaming updates in fixed-size chunks.
fn bench_streaming_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_streaming");

    let total = 1048576;
    let data = generate_random_data(total);

    for chunk_size in [64, 1024, 32768] {
        group.throughput(Throughput::Bytes(total as u64));
        group.bench_with_input(
            BenchmarkId::new("chunked_update", chunk_size),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut hasher = Md5::new();
                    for chunk in data.chunks(chunk_size) {
                        hasher.update(black_box(chunk));
                    }
                    black_box(hasher.digest())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark non-destructive digest reads on a live engine.
fn bench_digest_read(c: &mut Criterion) {
    let data = generate_random_data(4096);
    let hasher = Md5::with_initial(&data);

    c.bench_function("md5_digest_read", |b| {
        b.iter(|| black_box(hasher.digest()));
    });
}

/// Benchmark state export plus import, the checkpoint/resume round trip.
fn bench_state_round_trip(c: &mut Criterion) {
    let data = generate_random_data(1000);
    let hasher = Md5::with_initial(&data);

    c.bench_function("md5_state_round_trip", |b| {
        b.iter(|| {
            let blob = black_box(&hasher).export_state();
            black_box(Md5::from_state(&blob).expect("round trip must succeed"))
        });
    });
}

criterion_group!(
    benches,
    bench_oneshot,
    bench_streaming_update,
    bench_digest_read,
    bench_state_round_trip
);
criterion_main!(benches);
