use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::hash::Hash;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{Hyperparameters, QTable, StateKey};

#[derive(Serialize, Deserialize)]
struct TableEntry<A> {
    state: StateKey,
    action: A,
    value: f32,
}

/// Reads and writes a `QTable` as gzipped JSON, one file per hyperparameter set.
pub struct QTablePersistance {
    file_path: PathBuf,
}

impl QTablePersistance {
    pub fn new(table_dir: &Path, hyperparameters: &Hyperparameters) -> Self {
        Self {
            file_path: table_dir.join(hyperparameters.table_file_name()),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// `Ok(None)` when no table has been saved yet. A file that exists but cannot be read is an error.
    pub fn load<A>(&self) -> Result<Option<QTable<A>>>
    where
        A: Hash + Eq + DeserializeOwned,
    {
        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to open {:?}", self.file_path))
            }
        };

        let content = BufReader::new(GzDecoder::new(file));
        let entries: Vec<TableEntry<A>> = serde_json::from_reader(content)
            .with_context(|| format!("Value table {:?} is corrupt", self.file_path))?;

        let table: QTable<A> = entries
            .into_iter()
            .map(|e| (e.state, e.action, e.value))
            .collect();

        info!(
            "Loaded {} table entries from {:?}",
            table.len(),
            self.file_path
        );

        Ok(Some(table))
    }

    /// Writes to a sibling temp file first so an interrupted save never clobbers the previous table.
    pub fn save<A>(&self, table: &QTable<A>) -> Result<()>
    where
        A: Hash + Eq + Clone + Serialize,
    {
        common::ensure_parent_dir(&self.file_path)?;

        let tmp_path = self.file_path.with_extension("gz.tmp");
        let file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create {:?}", tmp_path))?;

        let entries: Vec<TableEntry<A>> = table
            .iter()
            .map(|(state, action, value)| TableEntry {
                state: *state,
                action: action.clone(),
                value,
            })
            .collect();

        let mut compressor = GzEncoder::new(BufWriter::new(file), Compression::default());
        serde_json::to_writer(&mut compressor, &entries)?;
        compressor.finish()?.flush()?;

        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("Failed to move table into {:?}", self.file_path))?;

        info!(
            "Saved {} table entries to {:?}",
            entries.len(),
            self.file_path
        );

        Ok(())
    }
}
