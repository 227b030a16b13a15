//! Storage for the opt-in toggle record.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::player::PlayerId;
use crate::error::ToggleError;

/// Backing store for the set of opted-in players.
pub trait ToggleStore: Send + Sync {
    /// Read the full set. A store that has never been written is empty.
    fn load(&self) -> Result<HashSet<PlayerId>, ToggleError>;

    /// Replace the stored set.
    fn save(&self, players: &HashSet<PlayerId>) -> Result<(), ToggleError>;
}

/// On-disk layout of the toggle record.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ToggleRecord {
    #[serde(default)]
    players: Vec<PlayerId>,
}

/// Toggle record kept as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ToggleStore for JsonFileStore {
    fn load(&self) -> Result<HashSet<PlayerId>, ToggleError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "toggle record not found, starting empty");
                return Ok(HashSet::new());
            }
            Err(e) => return Err(e.into()),
        };

        let record: ToggleRecord = serde_json::from_reader(BufReader::new(file))?;
        Ok(record.players.into_iter().collect())
    }

    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn save(&self, players: &HashSet<PlayerId>) -> Result<(), ToggleError> {
        let mut sorted: Vec<PlayerId> = players.iter().copied().collect();
        sorted.sort_unstable();
        let record = ToggleRecord { players: sorted };

        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&temp_path)?);
            serde_json::to_writer_pretty(&mut writer, &record)?;
            writer.flush()?;
        }
        fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), count = record.players.len(), "toggle record saved");
        Ok(())
    }
}
