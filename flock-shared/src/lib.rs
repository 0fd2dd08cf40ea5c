//! Data exchanged between the simulation core and its collaborators:
//! run configuration, metric rows, experiment labels and summaries.

use std::fmt;
use std::str::FromStr;

use flock_core::{EnvironmentConfig, MetricsRecord, SimulationSettings, Weights};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Steps in a default run: 20 seconds at 60 FPS.
pub const DEFAULT_STEPS: u64 = 1200;

/// Everything needed to reproduce one headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub settings: SimulationSettings,
    pub environment: EnvironmentConfig,
    pub steps: u64,
    /// Fixed seed for reproducible runs; random when absent.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            settings: SimulationSettings::default(),
            environment: EnvironmentConfig::default(),
            steps: DEFAULT_STEPS,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("invalid value {value:?} in column {column:?}")]
    InvalidValue { column: &'static str, value: String },
}

/// One line of the metrics log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub step: u64,
    pub avg_distance_to_center: f32,
    pub collisions: u32,
    /// Present only when the log carries the predator column.
    pub with_predator: Option<bool>,
}

impl MetricsRow {
    pub const STEP: &'static str = "Step";
    pub const AVG_DISTANCE: &'static str = "Avg Distance to Center";
    pub const COLLISIONS: &'static str = "Collisions";
    pub const WITH_PREDATOR: &'static str = "With Predator";

    pub fn from_record(record: &MetricsRecord, predator_column: bool) -> Self {
        Self {
            step: record.step,
            avg_distance_to_center: record.avg_distance_to_center,
            collisions: record.collisions,
            with_predator: predator_column.then_some(record.with_predator),
        }
    }

    pub fn header(predator_column: bool) -> String {
        let mut columns = vec![Self::STEP, Self::AVG_DISTANCE, Self::COLLISIONS];
        if predator_column {
            columns.push(Self::WITH_PREDATOR);
        }
        columns.join(",")
    }

    /// Comma-separated values in header order; the predator flag is written as 0/1.
    pub fn to_csv(&self) -> String {
        let mut line = format!(
            "{},{},{}",
            self.step, self.avg_distance_to_center, self.collisions
        );
        if let Some(with_predator) = self.with_predator {
            line.push_str(if with_predator { ",1" } else { ",0" });
        }
        line
    }

    pub fn parse_csv(line: &str, predator_column: bool) -> Result<Self, RowError> {
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        let expected = if predator_column { 4 } else { 3 };
        if fields.len() != expected {
            return Err(RowError::ColumnCount {
                expected,
                found: fields.len(),
            });
        }

        let with_predator = if predator_column {
            match fields[3] {
                "0" => Some(false),
                "1" => Some(true),
                other => {
                    return Err(RowError::InvalidValue {
                        column: Self::WITH_PREDATOR,
                        value: other.to_string(),
                    })
                }
            }
        } else {
            None
        };

        Ok(Self {
            step: parse_field(fields[0], Self::STEP)?,
            avg_distance_to_center: parse_field(fields[1], Self::AVG_DISTANCE)?,
            collisions: parse_field(fields[2], Self::COLLISIONS)?,
            with_predator,
        })
    }
}

fn parse_field<T: FromStr>(value: &str, column: &'static str) -> Result<T, RowError> {
    value.parse().map_err(|_| RowError::InvalidValue {
        column,
        value: value.to_string(),
    })
}

/// Identifies one configuration of an experiment sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentLabel {
    pub agent_count: usize,
    pub weights: Weights,
    pub with_predator: bool,
}

impl ExperimentLabel {
    const FILE_PREFIX: &'static str = "simulation_log_";

    pub fn new(agent_count: usize, weights: Weights, with_predator: bool) -> Self {
        Self {
            agent_count,
            weights,
            with_predator,
        }
    }

    fn config_key(&self, boids_suffix: &str) -> String {
        format!(
            "{}{}_sep{:?}_ali{:?}_coh{:?}",
            self.agent_count,
            boids_suffix,
            self.weights.separation,
            self.weights.alignment,
            self.weights.cohesion
        )
    }

    /// `simulation_log_30boids_sep1.0_ali1.0_coh1.0_pred.csv`
    pub fn file_name(&self) -> String {
        format!(
            "{}{}{}.csv",
            Self::FILE_PREFIX,
            self.config_key("boids"),
            if self.with_predator { "_pred" } else { "" }
        )
    }

    /// Parse a name produced by [`ExperimentLabel::file_name`].
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(".csv").unwrap_or(name);
        let rest = stem.strip_prefix(Self::FILE_PREFIX).unwrap_or(stem);
        let (rest, with_predator) = match rest.strip_suffix("_pred") {
            Some(rest) => (rest, true),
            None => (rest, false),
        };

        let (count, rest) = rest.split_once("boids_sep")?;
        let (separation, rest) = rest.split_once("_ali")?;
        let (alignment, cohesion) = rest.split_once("_coh")?;

        Some(Self::new(
            count.parse().ok()?,
            Weights::new(
                separation.parse().ok()?,
                alignment.parse().ok()?,
                cohesion.parse().ok()?,
            ),
            with_predator,
        ))
    }
}

impl fmt::Display for ExperimentLabel {
    /// `30b_sep1.0_ali1.0_coh1.0 (Pred)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.config_key("b"),
            if self.with_predator { "Pred" } else { "NoPred" }
        )
    }
}

/// Aggregate of a whole metrics log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: u64,
    pub mean_avg_distance_to_center: f32,
    pub total_collisions: u64,
    pub mean_collisions: f32,
    pub with_predator: bool,
}

/// Folds metric rows into a [`RunSummary`]
#[derive(Debug, Clone, Default)]
pub struct SummaryBuilder {
    steps: u64,
    distance_sum: f64,
    total_collisions: u64,
    with_predator: bool,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &MetricsRecord) {
        self.steps += 1;
        self.distance_sum += f64::from(record.avg_distance_to_center);
        self.total_collisions += u64::from(record.collisions);
        self.with_predator |= record.with_predator;
    }

    pub fn push_row(&mut self, row: &MetricsRow) {
        self.steps += 1;
        self.distance_sum += f64::from(row.avg_distance_to_center);
        self.total_collisions += u64::from(row.collisions);
        self.with_predator |= row.with_predator.unwrap_or(false);
    }

    pub fn finish(&self) -> RunSummary {
        let (mean_distance, mean_collisions) = if self.steps == 0 {
            (0.0, 0.0)
        } else {
            (
                self.distance_sum / self.steps as f64,
                self.total_collisions as f64 / self.steps as f64,
            )
        };
        RunSummary {
            steps: self.steps,
            mean_avg_distance_to_center: mean_distance as f32,
            total_collisions: self.total_collisions,
            mean_collisions: mean_collisions as f32,
            with_predator: self.with_predator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(step: u64, avg: f32, collisions: u32) -> MetricsRecord {
        MetricsRecord {
            step,
            avg_distance_to_center: avg,
            collisions,
            with_predator: true,
        }
    }

    #[test]
    fn test_header() {
        assert_eq!(
            MetricsRow::header(false),
            "Step,Avg Distance to Center,Collisions"
        );
        assert_eq!(
            MetricsRow::header(true),
            "Step,Avg Distance to Center,Collisions,With Predator"
        );
    }

    #[test]
    fn test_row_columns_follow_header_order() {
        let row = MetricsRow::from_record(&record(7, 12.5, 3), true);
        assert_eq!(row.to_csv(), "7,12.5,3,1");

        let row = MetricsRow::from_record(&record(7, 12.5, 3), false);
        assert_eq!(row.to_csv(), "7,12.5,3");
    }

    #[test]
    fn test_parse_row() {
        let row = MetricsRow::parse_csv("4, 101.25, 2, 0\n", true).unwrap();
        assert_eq!(row.step, 4);
        assert_eq!(row.avg_distance_to_center, 101.25);
        assert_eq!(row.collisions, 2);
        assert_eq!(row.with_predator, Some(false));
    }

    #[test]
    fn test_parse_row_errors() {
        assert_eq!(
            MetricsRow::parse_csv("1,2", false),
            Err(RowError::ColumnCount {
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            MetricsRow::parse_csv("x,2,3", false),
            Err(RowError::InvalidValue { column: "Step", .. })
        ));
        assert!(MetricsRow::parse_csv("1,2,3,yes", true).is_err());
    }

    #[test]
    fn test_experiment_file_name() {
        let label = ExperimentLabel::new(30, Weights::new(2.0, 0.5, 0.5), true);
        assert_eq!(
            label.file_name(),
            "simulation_log_30boids_sep2.0_ali0.5_coh0.5_pred.csv"
        );
        assert_eq!(label.to_string(), "30b_sep2.0_ali0.5_coh0.5 (Pred)");

        let calm = ExperimentLabel::new(60, Weights::default(), false);
        assert_eq!(
            calm.file_name(),
            "simulation_log_60boids_sep1.0_ali1.0_coh1.0.csv"
        );
        assert_eq!(calm.to_string(), "60b_sep1.0_ali1.0_coh1.0 (NoPred)");
    }

    #[test]
    fn test_experiment_label_from_file_name() {
        let label = ExperimentLabel::new(60, Weights::new(0.5, 2.0, 1.5), true);
        assert_eq!(ExperimentLabel::from_file_name(&label.file_name()), Some(label));

        assert_eq!(ExperimentLabel::from_file_name("simulation_log_temp.csv"), None);
    }

    #[test]
    fn test_summary() {
        let mut summary = SummaryBuilder::new();
        summary.push(&record(0, 10.0, 1));
        summary.push(&record(1, 20.0, 3));

        let result = summary.finish();
        assert_eq!(result.steps, 2);
        assert_eq!(result.mean_avg_distance_to_center, 15.0);
        assert_eq!(result.total_collisions, 4);
        assert_eq!(result.mean_collisions, 2.0);
        assert!(result.with_predator);
    }

    #[test]
    fn test_empty_summary() {
        let result = SummaryBuilder::new().finish();
        assert_eq!(result.steps, 0);
        assert_eq!(result.mean_avg_distance_to_center, 0.0);
    }

    #[test]
    fn test_run_config_from_partial_toml() {
        let config: RunConfig = toml::from_str(
            r#"
            steps = 50
            seed = 9

            [settings]
            agent_count = 12
            with_predator = true

            [environment]
            max_speed = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.steps, 50);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.settings.agent_count, 12);
        assert!(config.settings.with_predator);
        assert_eq!(config.settings.width, 800.0);
        assert_eq!(config.environment.max_speed, 3.0);
        assert_eq!(config.environment.steering.max_speed, 4.0);
    }

    #[test]
    fn test_summary_json() {
        let summary = SummaryBuilder::new().finish();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["steps"], 0);
        assert_eq!(json["with_predator"], false);
    }
}
