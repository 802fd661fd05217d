//! Append-only tracking history.
//!
//! The history file is a JSON array rewritten wholesale on every append.
//! Entries that do not look like a [`TrackingRecord`] are kept as-is.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use cargotrack_protocols::{HistoryError, TrackingRecord};

/// JSON history file of every tracking run.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all entries.
    ///
    /// A missing file, invalid JSON or a non-array document all yield an
    /// empty history.
    pub fn load(&self) -> Vec<Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No history at {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!(
                    "History file {} is not a JSON array, starting fresh",
                    self.path.display()
                );
                Vec::new()
            }
            Err(e) => {
                warn!(
                    "History file {} is corrupt, starting fresh: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Append `record` and rewrite the file. Returns the file path.
    pub fn append(&self, record: &TrackingRecord) -> Result<PathBuf, HistoryError> {
        let mut entries = self.load();
        entries.push(serde_json::to_value(record)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| HistoryError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content).map_err(|source| HistoryError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            "Saved {} to history ({} entries)",
            record.reference_id,
            entries.len()
        );
        Ok(self.path.clone())
    }

    /// Most recent entry recorded for `reference_id`.
    pub fn latest_for(&self, reference_id: &str) -> Option<Value> {
        self.load().into_iter().rev().find(|entry| {
            entry.get("reference_id").and_then(Value::as_str) == Some(reference_id)
        })
    }

    /// [`latest_for`](Self::latest_for) read back as a record; unreadable entries yield `None`.
    pub fn latest_record(&self, reference_id: &str) -> Option<TrackingRecord> {
        let entry = self.latest_for(reference_id)?;
        match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Stored entry for {} is unreadable: {}", reference_id, e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
