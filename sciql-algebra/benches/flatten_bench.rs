use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sciql_algebra::{AlgebraOptions, flatten, regenerate_dimension, select_dimension};
use sciql_test_utils::unit_array;
use sciql_types::{CandidateDescriptor, Candidates, Dimension, RangePredicate};

// 128 x 128 x 64 = 1,048,576 cells
const SHAPE: [u64; 3] = [128, 128, 64];

fn bench_flatten(c: &mut Criterion) {
    let array = unit_array(&SHAPE);
    let options = AlgebraOptions::default();
    let full = array.full_candidates();
    let sparse = CandidateDescriptor::new(vec![
        Dimension::range(0, 127, 3),
        Dimension::explicit((0..128).filter(|i| i % 5 != 0).collect()),
        Dimension::range(8, 55, 1),
    ]);

    let mut group = c.benchmark_group("flatten");
    group.bench_function("full_1m_cells", |b| {
        b.iter(|| black_box(flatten(&full, &array, &options).unwrap()))
    });
    group.bench_function("strided_explicit_mix", |b| {
        b.iter(|| black_box(flatten(&sparse, &array, &options).unwrap()))
    });
    group.finish();
}

fn bench_regenerate(c: &mut Criterion) {
    let array = unit_array(&SHAPE);
    let options = AlgebraOptions::default();
    let dim = array.analytic(1).unwrap();
    let narrowed = select_dimension(None, &array, &dim, &RangePredicate::between(10, 100)).unwrap();

    c.bench_function("regenerate_middle_dimension", |b| {
        b.iter(|| black_box(regenerate_dimension(&narrowed, &array, 1, &options).unwrap()))
    });
    c.bench_function("regenerate_empty", |b| {
        b.iter(|| black_box(regenerate_dimension(&Candidates::Empty, &array, 1, &options).unwrap()))
    });
}

criterion_group!(benches, bench_flatten, bench_regenerate);
criterion_main!(benches);
