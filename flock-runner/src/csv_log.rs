use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flock_core::MetricsRecord;
use flock_shared::MetricsRow;

/// Writes one CSV row per simulation step, header first
pub struct MetricsLog<W: Write> {
    writer: W,
    predator_column: bool,
    rows: u64,
}

impl MetricsLog<BufWriter<File>> {
    /// Create (or truncate) `path`, creating parent directories as needed.
    pub fn create(path: &Path, predator_column: bool) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        Self::new(BufWriter::new(file), predator_column)
    }
}

impl<W: Write> MetricsLog<W> {
    pub fn new(mut writer: W, predator_column: bool) -> Result<Self> {
        writeln!(writer, "{}", MetricsRow::header(predator_column))
            .context("Failed to write metrics header")?;
        Ok(Self {
            writer,
            predator_column,
            rows: 0,
        })
    }

    pub fn record(&mut self, record: &MetricsRecord) -> Result<()> {
        let row = MetricsRow::from_record(record, self.predator_column);
        writeln!(self.writer, "{}", row.to_csv()).context("Failed to write metrics row")?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush().context("Failed to flush metrics log")?;
        Ok(self.writer)
    }
}
