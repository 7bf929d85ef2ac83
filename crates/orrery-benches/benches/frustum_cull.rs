// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Frustum culling throughput: classify a field of boxes against a
//! perspective view, raw and after a rigid camera move.
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use orrery_geom::{Aabb, Frustum, IntersectionType, Transform};
use orrery_math::{Prng, Quat, Vec3};
use std::{hint::black_box, time::Duration};

/// Deterministic scatter of boxes around the view axis; roughly a third
/// land inside, a third straddle and a third are culled.
fn scatter_boxes(n: usize) -> Vec<Aabb> {
    let mut rng = Prng::from_seed_u64(0x0bb0_c0de);
    (0..n)
        .map(|_| {
            let center = Vec3::new(
                rng.next_range(-60.0, 60.0),
                rng.next_range(-60.0, 60.0),
                rng.next_range(-120.0, 20.0),
            );
            let half = rng.next_range(0.1, 4.0);
            Aabb::from_center_half_extents(center, half, half, half)
        })
        .collect()
}

fn bench_frustum_cull(c: &mut Criterion) {
    let frustum = Frustum::perspective(1.0, 16.0 / 9.0, 0.1, 100.0);

    let mut group = c.benchmark_group("frustum_classify");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));
    for &n in &[100usize, 1_000, 10_000] {
        let boxes = scatter_boxes(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &boxes, |b, boxes| {
            b.iter(|| {
                let visible = boxes
                    .iter()
                    .filter(|bx| frustum.intersection_type(bx) != IntersectionType::None)
                    .count();
                black_box(visible)
            });
        });
    }
    group.finish();

    let camera = Transform::rigid(Vec3::new(3.0, 1.5, -4.0), Quat::from_angles_xyz(0.1, 0.6, 0.0));
    let mut moved = c.benchmark_group("frustum_transform_then_classify");
    moved.sample_size(50);
    let boxes = scatter_boxes(1_000);
    moved.throughput(Throughput::Elements(1_000));
    moved.bench_function("rigid_1000", |b| {
        b.iter(|| {
            let view = frustum.transform(black_box(&camera));
            black_box(boxes.iter().filter(|bx| view.intersects(bx)).count())
        });
    });
    moved.finish();
}

criterion_group!(benches, bench_frustum_cull);
criterion_main!(benches);
