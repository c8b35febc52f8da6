use anyhow::{Context, Result};
use qlearning::TableStats;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only diagnostics of the value table, one `"<entries>, <mean>"` line per checkpoint.
pub struct CheckpointLog {
    path: PathBuf,
    interval: usize,
}

impl CheckpointLog {
    pub fn new(path: PathBuf, interval: usize) -> Self {
        Self { path, interval }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a checkpoint is due after `processed` fixtures. An interval of zero disables checkpoints.
    pub fn is_due(&self, processed: usize) -> bool {
        self.interval != 0 && processed % self.interval == 0
    }

    pub fn append(&self, stats: &TableStats) -> Result<()> {
        common::ensure_parent_dir(&self.path)?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open checkpoint log {:?}", self.path))?;

        writeln!(file, "{}, {}", stats.entries, stats.mean)?;

        Ok(())
    }
}
