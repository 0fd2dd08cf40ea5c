use std::fs;
use std::path::PathBuf;

use flock_core::Weights;
use flock_runner::{simulation, summarize, sweep, LeaderScript, MetricsLog};
use flock_shared::{ExperimentLabel, RunConfig};

/// Scratch directory unique to this test process and test name
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flock-runner-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn short_run() -> RunConfig {
    RunConfig {
        steps: 10,
        seed: Some(3),
        ..RunConfig::default()
    }
}

#[test]
fn test_run_to_file_and_read_back() {
    let dir = scratch_dir("run");
    let path = dir.join("nested").join("simulation_log_temp.csv");

    let mut log = MetricsLog::create(&path, true).unwrap();
    let script = LeaderScript::from_json(r#"[["up"], ["up", "right"]]"#).unwrap();
    let summary = simulation::run(&short_run(), &script, &mut log).unwrap();
    log.finish().unwrap();

    let rows = summarize::read_log(&path).unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(summary.steps, 10);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.step, i as u64);
        assert_eq!(row.with_predator, Some(false));
        assert!(row.avg_distance_to_center >= 0.0);
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_sweep_then_summarize() {
    let dir = scratch_dir("sweep");
    let labels = [
        ExperimentLabel::new(8, Weights::new(1.0, 1.0, 1.0), false),
        ExperimentLabel::new(8, Weights::new(1.0, 1.0, 1.0), true),
        ExperimentLabel::new(12, Weights::new(2.0, 0.5, 0.5), true),
    ];

    let results = sweep::run_sweep(&labels, &short_run(), &dir).unwrap();
    assert_eq!(results.len(), 3);
    assert!(!results[0].1.with_predator);
    assert!(results[1].1.with_predator);

    for label in &labels {
        let rows = summarize::read_log(&dir.join(label.file_name())).unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].with_predator, Some(label.with_predator));
    }

    let comparison = summarize::compare(&dir).unwrap();
    assert_eq!(comparison.rows.len(), 3);
    assert!(comparison.rows.contains_key("8b_sep1.0_ali1.0_coh1.0 (NoPred)"));
    assert!(comparison.rows.contains_key("12b_sep2.0_ali0.5_coh0.5 (Pred)"));

    let written = summarize::write_summaries(&comparison, &dir).unwrap();
    assert_eq!(written.len(), 2);

    let distance = fs::read_to_string(dir.join("summary_Avg_Distance_to_Center.csv")).unwrap();
    let mut lines = distance.lines();
    assert_eq!(lines.next(), Some("Label,Average Avg Distance to Center"));
    assert_eq!(lines.count(), 3);

    let collisions = fs::read_to_string(dir.join("summary_Collisions.csv")).unwrap();
    assert!(collisions.starts_with("Label,Average Collisions\n"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_summarize_ignores_other_files() {
    let dir = scratch_dir("ignore");
    fs::write(dir.join("notes.txt"), "not a log").unwrap();
    fs::write(dir.join("summary_Collisions.csv"), "Label,Average Collisions\n").unwrap();

    let comparison = summarize::compare(&dir).unwrap();
    assert!(comparison.rows.is_empty());

    fs::remove_dir_all(&dir).unwrap();
}
