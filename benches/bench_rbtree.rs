use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rbtree::{Key, RBTree};

fn rand_keys<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<Key> {
    (0..len).map(|_| rng.gen_range(0..len as Key)).collect()
}

fn bench_rbtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("rbtree");

    let mut rng = ChaCha20Rng::from_seed([
        0x55, 0xEF, 0xE0, 0x3C, 0x71, 0xDA, 0xFC, 0xAB, 0x5C, 0x1A, 0x9F, 0xEB,
        0xA4, 0x9E, 0x61, 0xE6, 0x1E, 0x7E, 0x29, 0x77, 0x38, 0x9A, 0xF5, 0x67,
        0xF5, 0xDD, 0x07, 0x06, 0xAE, 0xE4, 0x5A, 0xDC,
    ]);

    for len in [1_000, 100_000] {
        let keys = rand_keys(len, &mut rng);

        group.bench_function(BenchmarkId::new("insert", len), |b| {
            b.iter(|| {
                let mut tree = RBTree::new();
                for &k in &keys {
                    black_box(tree.insert(k).ok());
                }
                tree
            })
        });

        let mut tree = RBTree::new();
        for &k in &keys {
            let _ = tree.insert(k);
        }
        let mut erase_order: Vec<usize> = (0..len).collect();
        erase_order.shuffle(&mut rng);

        group.bench_function(BenchmarkId::new("find", len), |b| {
            b.iter(|| {
                for &k in &keys {
                    black_box(tree.find(k));
                }
            })
        });

        let mut buf = vec![0; len];
        group.bench_function(BenchmarkId::new("to_array", len), |b| {
            b.iter(|| black_box(tree.to_array(&mut buf)))
        });

        group.bench_function(BenchmarkId::new("insert_erase", len), |b| {
            b.iter(|| {
                let mut tree = RBTree::new();
                let handles: Vec<_> = keys.iter().filter_map(|&k| tree.insert(k).ok()).collect();
                for &n in handles.iter().rev() {
                    black_box(tree.erase(n));
                }
            })
        });

        group.bench_function(BenchmarkId::new("erase_shuffled", len), |b| {
            b.iter_batched(
                || {
                    let mut tree = RBTree::new();
                    let handles: Vec<_> = keys.iter().filter_map(|&k| tree.insert(k).ok()).collect();
                    (tree, handles)
                },
                |(mut tree, handles)| {
                    for &i in &erase_order {
                        black_box(tree.erase(handles[i]));
                    }
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rbtree);
criterion_main!(benches);
