use criterion::{Criterion, black_box, criterion_group, criterion_main};
use stunt_core::generate::random_problem;
use stunt_core::{Planner, SolveStrategy};

fn planner_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("planner");
    for (stages, tricks) in [(8usize, 8usize), (16, 10), (32, 12)] {
        let problem = random_problem(0x5EED, stages, tricks);
        for strategy in [SolveStrategy::Memoized, SolveStrategy::BottomUp] {
            group.bench_function(
                format!("{}_{stages}x{tricks}", strategy.as_str()),
                |b| b.iter(|| black_box(Planner::new(&problem).solve(strategy))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, planner_bench);
criterion_main!(benches);
