use std::path::Path;

use anyhow::Result;
use flock_core::Weights;
use flock_shared::{ExperimentLabel, RunConfig, RunSummary};

use crate::csv_log::MetricsLog;
use crate::leader_script::LeaderScript;
use crate::simulation;

pub const AGENT_COUNTS: [usize; 2] = [30, 60];
pub const PREDATOR_STATES: [bool; 2] = [false, true];
pub const WEIGHT_SETS: [Weights; 3] = [
    Weights::new(1.0, 1.0, 1.0),
    Weights::new(2.0, 0.5, 0.5),
    Weights::new(0.5, 2.0, 1.5),
];

/// Every configuration of the standard experiment grid, in run order.
pub fn grid() -> Vec<ExperimentLabel> {
    let mut labels = Vec::new();
    for agent_count in AGENT_COUNTS {
        for weights in WEIGHT_SETS {
            for with_predator in PREDATOR_STATES {
                labels.push(ExperimentLabel::new(agent_count, weights, with_predator));
            }
        }
    }
    labels
}

/// Run each label with `base` as the template and write one log per run into `output_dir`.
pub fn run_sweep(
    labels: &[ExperimentLabel],
    base: &RunConfig,
    output_dir: &Path,
) -> Result<Vec<(ExperimentLabel, RunSummary)>> {
    let mut results = Vec::with_capacity(labels.len());

    for label in labels {
        log::info!("Running: {}", label);

        let mut config = base.clone();
        config.settings.agent_count = label.agent_count;
        config.settings.weights = label.weights;
        config.settings.with_predator = label.with_predator;

        let path = output_dir.join(label.file_name());
        let mut log = MetricsLog::create(&path, true)?;
        let summary = simulation::run(&config, &LeaderScript::empty(), &mut log)?;
        log.finish()?;

        results.push((*label, summary));
    }

    log::info!("All experiments complete. Logs in {}", output_dir.display());
    Ok(results)
}
