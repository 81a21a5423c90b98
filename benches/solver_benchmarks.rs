use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use nodus::problems::map_colouring::{Colour, MapColouringProblem};
use nodus::problems::n_queens::NQueensProblem;
use nodus::solver::cancellation::CancellationToken;
use nodus::solver::engine::SolverBuilder;
use nodus::solver::heuristics::OrderingStrategySelector;
use nodus::solver::strategies::CheckingStrategySelector;

/// A reproducible sparse colouring instance.
fn random_map(regions: usize, seed: u64) -> MapColouringProblem {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut borders = Vec::new();
    for a in 0..regions {
        for b in a + 1..regions {
            if rng.gen_bool(0.3) {
                borders.push((a, b));
            }
        }
    }
    MapColouringProblem::new(
        regions,
        vec![Colour::Red, Colour::Green, Colour::Blue, Colour::Yellow],
        &borders,
    )
}

fn bench_checking_strategies(c: &mut Criterion) {
    let csp = NQueensProblem::new(8);
    let token = CancellationToken::new();
    let mut group = c.benchmark_group("eight_queens");
    for checking in CheckingStrategySelector::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(checking),
            &checking,
            |bencher, &checking| {
                let mut solver = SolverBuilder::new()
                    .capacity(8)
                    .checking(checking)
                    .build::<NQueensProblem>();
                bencher.iter(|| solver.solve(&csp, &token).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_ordering_strategies(c: &mut Criterion) {
    let csp = random_map(14, 7);
    let token = CancellationToken::new();
    let mut group = c.benchmark_group("random_map_forward_checking");
    for ordering in [
        OrderingStrategySelector::NaturalOrdering,
        OrderingStrategySelector::BrelazHeuristic,
        OrderingStrategySelector::MaxCardinality,
        OrderingStrategySelector::MaxTightness,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(ordering),
            &ordering,
            |bencher, &ordering| {
                let mut solver = SolverBuilder::new()
                    .capacity(14)
                    .checking(CheckingStrategySelector::ForwardChecking)
                    .ordering(ordering)
                    .build::<MapColouringProblem>();
                bencher.iter(|| solver.solve(&csp, &token).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_checking_strategies, bench_ordering_strategies);
criterion_main!(benches);
