//! Benchmark suite for MSF file decoding
//!
//! This benchmark measures full-file decoding (parse + zstd decompression),
//! per-frame canvas rendering, and serialization over synthetic animation sets.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use miu_benches::{build_test_animation, generate_test_msf_data, sizes};
use miu_types::file::msf::File;
use std::hint::black_box;

fn pixel_count(size: (u16, u16, u16)) -> u64 {
	size.0 as u64 * size.1 as u64 * size.2 as u64
}

/// Benchmark full decode: structural parse plus blob decompression
fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("msf_decode");

	for (name, size) in [("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)]
	{
		let data = generate_test_msf_data(size.0, size.1, size.2);

		group.throughput(Throughput::Elements(pixel_count(size)));
		group.bench_with_input(BenchmarkId::new("from_bytes", name), &data, |b, data| {
			b.iter(|| {
				let result = File::from_bytes(black_box(data));
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark rendering every frame onto a transparent canvas
fn bench_render(c: &mut Criterion) {
	let mut group = c.benchmark_group("msf_render");

	for (name, size) in [("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)]
	{
		let data = generate_test_msf_data(size.0, size.1, size.2);
		let msf = File::from_bytes(&data).unwrap();

		group.throughput(Throughput::Elements(pixel_count(size)));
		group.bench_with_input(BenchmarkId::new("render_frames", name), &msf, |b, msf| {
			b.iter(|| {
				let frames = black_box(msf).render_frames();
				black_box(frames)
			});
		});
	}

	group.finish();
}

/// Benchmark serialization: payload concatenation and zstd compression
fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("msf_encode");
	group.sample_size(10);

	for (name, size) in [("small", sizes::SMALL), ("medium", sizes::MEDIUM)] {
		let msf = build_test_animation(size.0, size.1, size.2);

		group.throughput(Throughput::Elements(pixel_count(size)));
		group.bench_with_input(BenchmarkId::new("to_bytes", name), &msf, |b, msf| {
			b.iter(|| {
				let bytes = black_box(msf).to_bytes();
				black_box(bytes)
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_decode, bench_render, bench_encode);
criterion_main!(benches);
