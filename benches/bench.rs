use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rb_tree_map::RbTree;
use std::hint::black_box;

/// Distinct keys `0..count` in a fixed pseudo-random order.
fn shuffled_keys(count: u64) -> Vec<u64> {
    let mut rng = StdRng::from_seed([0; 32]);
    let mut keys: Vec<_> = (0..count).collect();
    keys.shuffle(&mut rng);
    keys
}

// ascending insert helper fn, always hits the max shortcut
fn tree_insert_ascending(count: u64, bench: &mut Bencher) {
    bench.iter(|| {
        let mut tree = RbTree::new();
        for key in 0..count {
            let _ignore = black_box(tree.insert(key, "value"));
        }
    });
}

// random insert helper fn
fn tree_insert_random(count: u64, bench: &mut Bencher) {
    let keys = shuffled_keys(count);
    bench.iter(|| {
        let mut tree = RbTree::new();
        for &key in &keys {
            let _ignore = black_box(tree.insert(key, "value"));
        }
    });
}

// insert and delete helper fn
fn tree_insert_delete(count: u64, bench: &mut Bencher) {
    let keys = shuffled_keys(count);
    bench.iter(|| {
        let mut tree = RbTree::new();
        for &key in &keys {
            let _ignore = black_box(tree.insert(key, "value"));
        }
        for key in &keys {
            let _ignore = black_box(tree.delete(key));
        }
    });
}

// export helper fn
fn tree_export(count: u64, bench: &mut Bencher) {
    let mut tree = RbTree::new();
    for key in shuffled_keys(count) {
        let _ignore = tree.insert(key, "value");
    }
    bench.iter(|| {
        black_box(tree.keys_to_array());
        black_box(tree.values_to_array());
    });
}

fn bench_tree_insert(c: &mut Criterion) {
    c.bench_function("bench_tree_insert_ascending_1000", |b| {
        tree_insert_ascending(1000, b)
    });
    c.bench_function("bench_tree_insert_ascending_100,000", |b| {
        tree_insert_ascending(100_000, b)
    });
    c.bench_function("bench_tree_insert_random_1000", |b| {
        tree_insert_random(1000, b)
    });
    c.bench_function("bench_tree_insert_random_100,000", |b| {
        tree_insert_random(100_000, b)
    });
}

fn bench_tree_insert_delete(c: &mut Criterion) {
    c.bench_function("bench_tree_insert_delete_1000", |b| {
        tree_insert_delete(1000, b)
    });
    c.bench_function("bench_tree_insert_delete_100,000", |b| {
        tree_insert_delete(100_000, b)
    });
}

fn bench_tree_export(c: &mut Criterion) {
    c.bench_function("bench_tree_export_1000", |b| tree_export(1000, b));
    c.bench_function("bench_tree_export_100,000", |b| tree_export(100_000, b));
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_tree_insert, bench_tree_insert_delete,
}

criterion_group! {
    name = benches_export;
    config = criterion_config();
    targets = bench_tree_export
}

criterion_main!(benches_basic_op, benches_export);
