use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::AgentRating;

/// A rating snapshot stored as a JSON object keyed by agent name.
pub struct RatingPersistance {
    path: PathBuf,
}

impl RatingPersistance {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<BTreeMap<String, T>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to open {:?}", self.path))
            }
        };

        let ratings = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Rating snapshot {:?} is corrupt", self.path))?;

        Ok(Some(ratings))
    }

    pub fn save<T: Serialize>(&self, ratings: &BTreeMap<String, T>) -> Result<()> {
        common::ensure_parent_dir(&self.path)?;

        let tmp_path = self.path.with_extension("json.tmp");
        let file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create {:?}", tmp_path))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, ratings)?;
        writer.flush()?;

        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to move ratings into {:?}", self.path))?;

        Ok(())
    }
}

pub fn write_report(path: &Path, report: &[AgentRating]) -> Result<()> {
    common::ensure_parent_dir(path)?;

    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
