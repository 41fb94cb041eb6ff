use criterion::{black_box, criterion_group, criterion_main, Criterion};
use skirmish::{find_path, reachable_within, CubePoint, OffsetCoord};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("hex-search");
    group.sample_size(10);

    // A big open field: every cell inside a 101x101 box is walkable
    let in_bounds = |coord: OffsetCoord| {
        (0..=100).contains(&coord.col()) && (0..=100).contains(&coord.row())
    };
    let origin = CubePoint::from(OffsetCoord::new(50, 50));
    let goal = CubePoint::from(OffsetCoord::new(100, 100));

    group.bench_function("reachable radius 50", |b| {
        b.iter(|| {
            reachable_within(black_box(origin), black_box(50), in_bounds)
        })
    });
    group.bench_function("path across the field", |b| {
        b.iter(|| find_path(black_box(origin), black_box(goal), in_bounds))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
