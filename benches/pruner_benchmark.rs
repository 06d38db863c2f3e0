//! Benchmark comparing exact vs initial-mean pruning
//!
//! Run with: cargo bench --bench pruner_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::SeedableRng;

use corrprune::pipeline::{prune, CorrelationMatrix, PruneConfig};

/// Random symmetric matrix where roughly a fifth of the pairs are strongly correlated
fn generate_matrix(n: usize, seed: u64) -> CorrelationMatrix {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut rows = vec![vec![1.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let value = if rng.gen::<f64>() < 0.2 {
                0.8 + rng.gen::<f64>() * 0.2
            } else {
                rng.gen::<f64>() * 0.6
            };
            rows[i][j] = value;
            rows[j][i] = value;
        }
    }

    CorrelationMatrix::from_rows(&rows).expect("Failed to build correlation matrix")
}

fn benchmark_pruning_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pruning_by_size");
    group.sample_size(20);

    for n in [25, 50, 100, 200] {
        let matrix = generate_matrix(n, 42);

        group.bench_with_input(BenchmarkId::new("exact", n), &matrix, |b, m| {
            let config = PruneConfig::new(0.75);
            b.iter(|| prune(black_box(m.clone()), &config))
        });

        group.bench_with_input(BenchmarkId::new("initial_means", n), &matrix, |b, m| {
            let config = PruneConfig::new(0.75).exact(false);
            b.iter(|| prune(black_box(m.clone()), &config))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_pruning_modes);
criterion_main!(benches);
