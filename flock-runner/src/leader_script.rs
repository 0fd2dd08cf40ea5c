use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flock_core::{Direction, PressedDirections};

/// Recorded leader input, one set of pressed directions per step.
///
/// Stored as JSON: `[["up"], [], ["left", "up"]]`. Steps past the end of the
/// script press nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderScript {
    steps: Vec<PressedDirections>,
}

impl LeaderScript {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<Vec<String>> =
            serde_json::from_str(json).context("Leader script must be a list of direction lists")?;

        let steps = raw
            .iter()
            .enumerate()
            .map(|(step, names)| {
                names
                    .iter()
                    .map(|name| {
                        name.parse::<Direction>()
                            .with_context(|| format!("Step {}: bad direction {:?}", step, name))
                    })
                    .collect::<Result<PressedDirections>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { steps })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read leader script {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn input_for(&self, step: u64) -> PressedDirections {
        usize::try_from(step)
            .ok()
            .and_then(|i| self.steps.get(i).copied())
            .unwrap_or_default()
    }
}
