use std::{hint::black_box, ops::ControlFlow, time::Duration};

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use glam::DVec3;
use octbox_index::{Bounds3, Motion, ObjectId, Octree, OctreeConfig};
use rand::prelude::*;

const EXTENT: f64 = 1000.0;

fn random_cube(rng: &mut StdRng, max_side: f64) -> Bounds3 {
    let side = rng.gen_range(0.0..max_side);
    let reach = EXTENT - side;
    let center: DVec3 = [0.0; 3].map(|_| rng.gen_range(-reach..reach)).into();
    Bounds3::cube(center, side)
}

fn random_cubes(rng: &mut StdRng, count: usize) -> Vec<Bounds3> {
    (0..count).map(|_| random_cube(rng, 20.0)).collect()
}

fn filled(config: OctreeConfig, cubes: &[Bounds3]) -> (Octree<usize>, Vec<ObjectId>) {
    let mut octree = Octree::with_config(Bounds3::cube(DVec3::ZERO, 2.0 * EXTENT), config)
        .expect("benchmark config should be valid");
    let ids = cubes
        .iter()
        .enumerate()
        .map(|(index, &bounds)| {
            octree
                .insert(index, bounds)
                .expect("cube should fit the root")
        })
        .collect();
    (octree, ids)
}

fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    let cubes = random_cubes(&mut StdRng::seed_from_u64(0), 10_000);
    for capacity in [5, 10, 20, 50] {
        let config = OctreeConfig::default().with_capacity(capacity);
        group.bench_function(BenchmarkId::from_parameter(capacity), |b| {
            b.iter(|| filled(config, black_box(&cubes)))
        });
    }
    group.finish();
}

fn colliding(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let (octree, _) = filled(OctreeConfig::default(), &random_cubes(&mut rng, 10_000));
    let mut group = c.benchmark_group("colliding");
    for side in [10.0, 100.0, 500.0] {
        let queries = (0..100)
            .map(|_| random_cube(&mut rng, side))
            .collect::<Vec<_>>();
        group.bench_function(BenchmarkId::from_parameter(side), |b| {
            b.iter(|| {
                queries
                    .iter()
                    .map(|&query| octree.colliding(query).len())
                    .sum::<usize>()
            })
        });
    }
    group.finish();
}

fn remove(c: &mut Criterion) {
    let cubes = random_cubes(&mut StdRng::seed_from_u64(2), 10_000);
    c.bench_function("remove", |b| {
        b.iter_batched(
            || filled(OctreeConfig::default(), &cubes),
            |(mut octree, ids)| {
                for id in ids {
                    black_box(octree.remove(id));
                }
                octree
            },
            BatchSize::LargeInput,
        )
    });
}

fn move_object(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let (mut octree, ids) = filled(OctreeConfig::default(), &random_cubes(&mut rng, 10_000));
    c.bench_function("move_object", |b| {
        b.iter(|| {
            let id = ids[rng.gen_range(0..ids.len())];
            let center = [0.0; 3].map(|_| rng.gen_range(-900.0..900.0)).into();
            octree.move_object(id, Motion::Recenter(center))
        })
    });
}

fn range(c: &mut Criterion) {
    let (octree, _) = filled(
        OctreeConfig::default(),
        &random_cubes(&mut StdRng::seed_from_u64(4), 10_000),
    );
    c.bench_function("range", |b| {
        b.iter(|| {
            let mut count = 0;
            let _ = octree.range(|object| {
                count += *object.data() & 1;
                ControlFlow::<()>::Continue(())
            });
            count
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(3));
    targets = insert, colliding, remove, move_object, range
}
criterion_main!(benches);
