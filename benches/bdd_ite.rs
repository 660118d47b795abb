//! ITE construction benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench bdd_ite
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use robdd::bdd::{Bdd, BddConfig};
use robdd::reference::NodeId;

// ============================================================================
// Helper: N-Queens Problem (canonical BDD benchmark)
// ============================================================================

/// Build the N-Queens constraint and return the result with ITE cache stats.
fn solve_queens(bdd: &Bdd, n: usize) -> (NodeId, usize, usize) {
    // Variables: q[i][j] = queen at row i, column j
    let vars: Vec<NodeId> = (0..n * n)
        .map(|k| bdd.mk_var(&format!("q{}_{}", k / n, k % n)))
        .collect();
    let var = |i: usize, j: usize| -> NodeId { vars[i * n + j] };

    let mut result = bdd.one();

    // Row constraints: exactly one queen per row
    for i in 0..n {
        // At least one: OR of all columns
        let at_least_one = bdd.apply_or_many((0..n).map(|j| var(i, j)));
        result = bdd.apply_and(result, at_least_one);

        // At most one: no two queens in same row
        for j1 in 0..n {
            for j2 in (j1 + 1)..n {
                let not_both = bdd.apply_nand(var(i, j1), var(i, j2));
                result = bdd.apply_and(result, not_both);
            }
        }
    }

    // Column constraints: at most one queen per column
    for j in 0..n {
        for i1 in 0..n {
            for i2 in (i1 + 1)..n {
                let not_both = bdd.apply_nand(var(i1, j), var(i2, j));
                result = bdd.apply_and(result, not_both);
            }
        }
    }

    // Diagonal constraints
    for i1 in 0..n {
        for j1 in 0..n {
            for i2 in (i1 + 1)..n {
                for j2 in 0..n {
                    let di = i2 - i1;
                    if j2 == j1 + di || (j1 >= di && j2 == j1 - di) {
                        let not_both = bdd.apply_nand(var(i1, j1), var(i2, j2));
                        result = bdd.apply_and(result, not_both);
                    }
                }
            }
        }
    }

    let stats = bdd.ite_cache_stats();
    (result, stats.hits, stats.misses)
}

// ============================================================================
// Helper: Random Boolean Formula
// ============================================================================

/// Build a random formula by combining literals with random connectives.
fn build_random_formula(bdd: &Bdd, num_vars: usize, num_ops: usize, seed: u64) -> NodeId {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let vars: Vec<NodeId> = (0..num_vars).map(|i| bdd.mk_var(&format!("x{}", i))).collect();

    // Start with some random literals
    let mut nodes: Vec<NodeId> = vars
        .iter()
        .map(|&v| if rng.gen_bool(0.5) { v } else { bdd.apply_not(v) })
        .collect();

    for _ in 0..num_ops {
        let i = rng.gen_range(0..nodes.len());
        let j = rng.gen_range(0..nodes.len());
        if i == j {
            continue;
        }

        let a = nodes[i];
        let b = nodes[j];

        nodes[i] = match rng.gen_range(0..4) {
            0 => bdd.apply_and(a, b),
            1 => bdd.apply_or(a, b),
            2 => bdd.apply_xor(a, b),
            _ => bdd.apply_nor(a, b),
        };
    }

    bdd.apply_and_many(nodes)
}

fn bench_queens_caching(c: &mut Criterion) {
    let mut group = c.benchmark_group("bdd/queens_caching");
    group.sample_size(10);

    let n = 5;

    for caching in [true, false] {
        group.bench_with_input(
            BenchmarkId::new(format!("n={}", n), if caching { "cached" } else { "uncached" }),
            &caching,
            |b, &caching| {
                b.iter(|| {
                    let bdd = Bdd::new(BddConfig::default().with_caching(caching));
                    solve_queens(&bdd, n)
                });
            },
        );
    }

    group.finish();
}

fn bench_queens_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("bdd/queens_scaling");
    group.sample_size(10);

    for n in [4, 5, 6] {
        group.bench_with_input(BenchmarkId::new("queens", n), &n, |b, &n| {
            b.iter(|| {
                let bdd = Bdd::new(BddConfig::default().with_cache_bits(16).with_storage_bits(16));
                solve_queens(&bdd, n)
            });
        });
    }

    group.finish();
}

fn bench_random_formula(c: &mut Criterion) {
    let mut group = c.benchmark_group("bdd/random_formula");

    let num_vars: usize = 12;
    let num_ops = 200;
    let seed = 42;

    for cache_bits in [10, 14] {
        let config = BddConfig::default().with_cache_bits(cache_bits);

        group.bench_with_input(
            BenchmarkId::new("v=12,ops=200", format!("2^{}", cache_bits)),
            &config,
            |b, &config| {
                b.iter(|| {
                    let bdd = Bdd::new(config);
                    build_random_formula(&bdd, num_vars, num_ops, seed)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_queens_caching,
    bench_queens_scaling,
    bench_random_formula
);
criterion_main!(benches);
