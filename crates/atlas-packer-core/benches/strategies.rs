use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use atlas_packer_core::prelude::*;

fn generate_images(count: usize, min_size: u32, max_size: u32) -> Vec<(String, u32, u32)> {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xA71A5);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            (format!("img_{}", i), w, h)
        })
        .collect()
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("algorithms");

    for count in [50, 100, 200] {
        let images = generate_images(count, 16, 64);
        group.throughput(Throughput::Elements(count as u64));

        for algorithm in [Algorithm::Shelf, Algorithm::MaxRects] {
            group.bench_with_input(
                BenchmarkId::new(format!("{algorithm:?}_fast"), count),
                &images,
                |b, images| {
                    b.iter(|| {
                        let cfg = PackingConfig::builder()
                            .algorithm(algorithm)
                            .size_solver(SizeSolver::Fast)
                            .build();
                        black_box(pack_layout(images.clone(), &cfg))
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_size_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("size_solvers");

    let images = generate_images(100, 16, 96);
    for solver in [SizeSolver::Fast, SizeSolver::BestFit] {
        group.bench_with_input(
            BenchmarkId::new(format!("{solver:?}"), images.len()),
            &images,
            |b, images| {
                b.iter(|| {
                    let cfg = PackingConfig::builder()
                        .algorithm(Algorithm::MaxRects)
                        .size_solver(solver)
                        .build();
                    black_box(pack_layout(images.clone(), &cfg))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_algorithms, bench_size_solvers);
criterion_main!(benches);
