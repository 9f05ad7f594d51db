use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use polyhash::Variant;

fn bench_variants(c: &mut Criterion) {
    let buf: Vec<u8> = (0..100_000u32).map(|i| i.wrapping_mul(2654435761) as u8).collect();

    let mut group = c.benchmark_group("variants");
    for &len in &[1, 7, 16, 100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Bytes(len as u64));
        for &variant in &Variant::ALL {
            group.bench_with_input(BenchmarkId::new(variant.name(), len), &buf[..len], |b, input| {
                b.iter(|| variant.hash(Some(black_box(input))))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_variants);
criterion_main!(benches);
