//! Headless collaborator for the flocking core: runs simulations, logs
//! per-step metrics as CSV, sweeps the experiment grid and compares results.

pub mod csv_log;
pub mod leader_script;
pub mod simulation;
pub mod summarize;
pub mod sweep;

pub use csv_log::MetricsLog;
pub use leader_script::LeaderScript;
