use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use qlearn_agent::QLearning;
use qlearn_core::QLConfig;
use qlearn_env::{grid, Problem};

fn trainer(problem: &Problem<f64>, cols: usize) -> QLearning<f64> {
    let config = QLConfig {
        episode_length: 100,
        num_episodes: 500,
        min_coverage: 0.0,
        neighbors: cols,
        ..QLConfig::default()
    };
    QLearning::from_input(
        config,
        problem.num_states,
        &problem.goals,
        &problem.input,
        problem.features.clone(),
    )
    .expect("valid grid problem")
}

fn bench_grid_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_training");
    for side in [5usize, 10, 20] {
        let problem = grid(side, side, 1.0).expect("valid grid");
        group.bench_with_input(BenchmarkId::from_parameter(side), &problem, |b, problem| {
            b.iter(|| {
                let mut trainer = trainer(problem, side);
                black_box(trainer.train_seeded(7).expect("training run"))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid_training);
criterion_main!(benches);
