use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flock_shared::{ExperimentLabel, MetricsRow, SummaryBuilder};

/// Per-label averages gathered from a results directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    /// Label -> (mean avg distance to center, mean collisions)
    pub rows: BTreeMap<String, (f32, f32)>,
}

fn label_for(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    match ExperimentLabel::from_file_name(name) {
        Some(label) => label.to_string(),
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string(),
    }
}

/// Parse a metrics log written by [`crate::MetricsLog`].
pub fn read_log(path: &Path) -> Result<Vec<MetricsRow>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };
    let predator_column = header.contains(MetricsRow::WITH_PREDATOR);

    lines
        .enumerate()
        .map(|(i, line)| {
            MetricsRow::parse_csv(line, predator_column)
                .with_context(|| format!("{}: line {}", path.display(), i + 2))
        })
        .collect()
}

/// Log files (`simulation_log_*.csv`) in `dir`, sorted by name.
pub fn find_logs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let path = entry?.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("simulation_log_") && n.ends_with(".csv"));
        if is_log {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Average both metrics per label across every log in `dir`.
pub fn compare(dir: &Path) -> Result<Comparison> {
    let mut groups: BTreeMap<String, SummaryBuilder> = BTreeMap::new();

    for path in find_logs(dir)? {
        let rows = read_log(&path)?;
        if rows.is_empty() {
            log::warn!("{} is empty, skipping", path.display());
            continue;
        }
        let group = groups.entry(label_for(&path)).or_default();
        for row in &rows {
            group.push_row(row);
        }
    }

    let rows = groups
        .into_iter()
        .map(|(label, group)| {
            let summary = group.finish();
            (
                label,
                (summary.mean_avg_distance_to_center, summary.mean_collisions),
            )
        })
        .collect();
    Ok(Comparison { rows })
}

/// Write `summary_Avg_Distance_to_Center.csv` and `summary_Collisions.csv` into `dir`.
pub fn write_summaries(comparison: &Comparison, dir: &Path) -> Result<Vec<PathBuf>> {
    let metrics: [(&str, fn(&(f32, f32)) -> f32); 2] = [
        (MetricsRow::AVG_DISTANCE, |m| m.0),
        (MetricsRow::COLLISIONS, |m| m.1),
    ];

    let mut written = Vec::new();
    for (metric, value) in metrics {
        let path = dir.join(format!("summary_{}.csv", metric.replace(' ', "_")));
        let mut text = format!("Label,Average {}\n", metric);
        for (label, means) in &comparison.rows {
            text.push_str(&format!("{},{}\n", label, value(means)));
        }
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Summary exported to {}", path.display());
        written.push(path);
    }
    Ok(written)
}
