use std::io::Write;

use anyhow::{Context, Result};
use flock_core::Environment;
use flock_shared::{RunConfig, RunSummary, SummaryBuilder};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::csv_log::MetricsLog;
use crate::leader_script::LeaderScript;

/// Build the environment for `config`, drawing a seed when none is fixed.
pub fn build_environment(config: &RunConfig) -> Result<Environment> {
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Environment::new(&config.settings, config.environment, &mut rng)
        .context("Invalid simulation settings")
}

/// Step `env` `steps` times, feeding scripted leader input and logging every record.
pub fn run_steps<W: Write>(
    env: &mut Environment,
    steps: u64,
    script: &LeaderScript,
    log: &mut MetricsLog<W>,
) -> Result<RunSummary> {
    let mut summary = SummaryBuilder::new();

    for step in 0..steps {
        let record = env.step(script.input_for(step));
        log.record(&record)?;
        summary.push(&record);

        if record.step % 600 == 0 {
            log::debug!(
                "step {}: avg distance {:.2}, collisions {}",
                record.step,
                record.avg_distance_to_center,
                record.collisions
            );
        }
    }

    Ok(summary.finish())
}

/// Build and run a whole simulation described by `config`.
pub fn run<W: Write>(
    config: &RunConfig,
    script: &LeaderScript,
    log: &mut MetricsLog<W>,
) -> Result<RunSummary> {
    let mut env = build_environment(config)?;
    log::info!(
        "Running {} agents for {} steps (predator: {}, leader: {})",
        env.agents().len(),
        config.steps,
        env.predator().is_some(),
        env.leader().is_some()
    );
    run_steps(&mut env, config.steps, script, log)
}
