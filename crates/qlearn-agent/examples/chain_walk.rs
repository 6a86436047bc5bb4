//! Example: training on a registered problem and rolling out the result
//!
//! Usage: `cargo run --example chain_walk -- [problem] [seed]`
//! where `problem` is one of the built-in problems (default `chain`).

use qlearn_agent::QLearning;
use qlearn_core::QLConfig;
use qlearn_env::{list_problems, make_problem, ProblemConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "chain".to_string());
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse()?,
        None => 42,
    };

    let problem_config = ProblemConfig::with_states(8).param("rows", 4).param("cols", 5);
    let problem = make_problem(&name, &problem_config)
        .map_err(|e| anyhow::anyhow!("{e} (available: {})", list_problems().join(", ")))?;

    let config = QLConfig {
        episode_length: 20,
        num_episodes: 200,
        ..QLConfig::default()
    };
    let mut trainer = QLearning::from_input(
        config,
        problem.num_states,
        &problem.goals,
        &problem.input,
        problem.features,
    )?;

    let report = trainer.train_seeded(seed)?;
    println!("{report}");

    match trainer.model() {
        Some(model) => {
            println!("\nLearned Q-values (coverage {:.2}):", model.coverage);
            print!("{}", model.best_policy);

            let prediction = trainer.predict_id(0)?;
            println!(
                "\nGreedy rollout from state 0 stops at state {} after {} steps",
                prediction.state.id, prediction.steps
            );
        }
        None => println!("\nCoverage below threshold, no model to roll out"),
    }

    Ok(())
}
