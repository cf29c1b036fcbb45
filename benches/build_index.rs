use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use planar::{Coordinate, IndexKind, IndexOptions, Ring};

fn jagged_ring(nverts: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..nverts)
        .map(|i| {
            let angle = (i as f64) * std::f64::consts::PI * 2. / (nverts as f64);
            let radius = rng.gen_range(50.0, 100.0);
            Coordinate::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

pub fn build_index_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_ring");

    for &nverts in &[100usize, 1000, 10000] {
        let coords = jagged_ring(nverts, 99);
        for kind in &[IndexKind::Unindexed, IndexKind::Natural, IndexKind::YStripes] {
            group.bench_function(
                BenchmarkId::new(format!("{:?}", kind), nverts),
                |b| {
                    b.iter(|| {
                        black_box(
                            Ring::new_with(coords.clone(), IndexOptions::new(*kind, 16)).unwrap(),
                        )
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, build_index_benchmark);

criterion_main!(benches);
