use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flock_runner::{simulation, summarize, sweep, LeaderScript, MetricsLog};
use flock_shared::RunConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flocking simulation runner", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one simulation and log its metrics as CSV
    Run(RunArgs),
    /// Run the standard experiment grid, one log per configuration
    Sweep(SweepArgs),
    /// Average the metrics of every log in a results directory
    Summarize {
        /// Directory holding simulation_log_*.csv files
        #[arg(default_value = "results")]
        results_dir: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// TOML file with a run configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of agents
    #[arg(short = 'n', long)]
    agents: Option<usize>,

    #[arg(long)]
    width: Option<f32>,

    #[arg(long)]
    height: Option<f32>,

    #[arg(long)]
    separation: Option<f32>,

    #[arg(long)]
    alignment: Option<f32>,

    #[arg(long)]
    cohesion: Option<f32>,

    /// Add a predator
    #[arg(short, long)]
    predator: bool,

    /// Run without a leader
    #[arg(long)]
    no_leader: bool,

    /// Number of steps to simulate
    #[arg(short, long)]
    steps: Option<u64>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file of per-step leader directions, e.g. [["up"], [], ["left"]]
    #[arg(short, long)]
    leader_script: Option<PathBuf>,

    /// CSV output path
    #[arg(short, long, default_value = "results/simulation_log_temp.csv")]
    output: PathBuf,

    /// Append a "With Predator" column to every row
    #[arg(long)]
    predator_column: bool,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Directory the per-configuration logs are written to
    #[arg(short, long, default_value = "results")]
    output_dir: PathBuf,

    /// Steps per configuration
    #[arg(short, long)]
    steps: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Also write the summary CSVs once the sweep finishes
    #[arg(long)]
    summarize: bool,
}

fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    let Some(path) = path else {
        return Ok(RunConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

impl RunArgs {
    fn into_config(self) -> Result<(RunConfig, Option<PathBuf>, PathBuf, bool)> {
        let mut config = load_config(self.config.as_deref())?;
        let settings = &mut config.settings;

        if let Some(agents) = self.agents {
            settings.agent_count = agents;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(separation) = self.separation {
            settings.weights.separation = separation;
        }
        if let Some(alignment) = self.alignment {
            settings.weights.alignment = alignment;
        }
        if let Some(cohesion) = self.cohesion {
            settings.weights.cohesion = cohesion;
        }
        settings.with_predator |= self.predator;
        if self.no_leader {
            settings.with_leader = false;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok((config, self.leader_script, self.output, self.predator_column))
    }
}

fn run(args: RunArgs) -> Result<()> {
    let (config, script_path, output, predator_column) = args.into_config()?;

    let script = match script_path {
        Some(path) => LeaderScript::load(&path)?,
        None => LeaderScript::empty(),
    };

    log::info!("Logging to {}", output.display());
    let mut log = MetricsLog::create(&output, predator_column)?;
    let summary = simulation::run(&config, &script, &mut log)?;
    log.finish()?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let mut base = RunConfig::default();
    if let Some(steps) = args.steps {
        base.steps = steps;
    }
    base.seed = args.seed;

    let results = sweep::run_sweep(&sweep::grid(), &base, &args.output_dir)?;
    for (label, summary) in &results {
        println!(
            "{}: avg distance {:.2}, collisions {}",
            label, summary.mean_avg_distance_to_center, summary.total_collisions
        );
    }

    if args.summarize {
        let comparison = summarize::compare(&args.output_dir)?;
        summarize::write_summaries(&comparison, &args.output_dir)?;
    }
    Ok(())
}

fn run_summarize(results_dir: &Path) -> Result<()> {
    let comparison = summarize::compare(results_dir)?;
    if comparison.rows.is_empty() {
        log::warn!("No logs found in {}", results_dir.display());
        return Ok(());
    }
    summarize::write_summaries(&comparison, results_dir)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match cli.command {
        Command::Run(args) => run(args).context("Run failed"),
        Command::Sweep(args) => run_sweep(args).context("Sweep failed"),
        Command::Summarize { results_dir } => {
            run_summarize(&results_dir).context("Summary failed")
        }
    }
}
