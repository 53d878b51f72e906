//! Durable JSON snapshot of the result history.
//!
//! The snapshot is rewritten wholesale after every mutation and read exactly
//! once at startup. Writes go to a temporary sibling file which is then renamed
//! over the target, so a crash mid-write leaves the previous snapshot intact.
//!
//! # Write ordering
//!
//! Every [`SnapshotFile`] owns a write lock that is separate from the store's
//! lock. Concurrent saves are serialized by it, and [`SnapshotFile::save_with`]
//! takes the copy of the history *after* acquiring it, so the last completed
//! write always reflects the newest history. Lock order is write lock first,
//! store lock second; the store never takes the write lock.
//!
//! # Failure policy
//!
//! [`SnapshotFile::load`] never fails: a missing, unreadable or malformed file
//! yields an empty history. Save failures are returned to the caller, which in
//! this crate logs and absorbs them.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{RelayError, Result};
use crate::types::{ResultRecord, Snapshot};

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "ocr_results.json";

#[derive(Debug)]
pub struct SnapshotFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot and return its records verbatim.
    ///
    /// The capacity bound is not applied here; see `ResultStore::restore`.
    pub fn load(&self) -> Vec<ResultRecord> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No snapshot at {}, starting with empty history", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read snapshot {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Snapshot>(&bytes) {
            Ok(snapshot) if snapshot.is_success() => {
                tracing::info!(
                    "Loaded {} OCR results from {}",
                    snapshot.texts.len(),
                    self.path.display()
                );
                snapshot.texts
            }
            Ok(snapshot) => {
                tracing::warn!(
                    "Ignoring snapshot {} with status '{}'",
                    self.path.display(),
                    snapshot.status
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Failed to parse snapshot {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Replace the snapshot with the given records.
    pub fn save(&self, records: &[ResultRecord]) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.write_snapshot(records)
    }

    /// Serialize with other saves, then obtain the records to write from `records`.
    pub fn save_with<F>(&self, records: F) -> Result<()>
    where
        F: FnOnce() -> Vec<ResultRecord>,
    {
        let _guard = self.write_lock.lock();
        let records = records();
        self.write_snapshot(&records)
    }

    fn write_snapshot(&self, records: &[ResultRecord]) -> Result<()> {
        let snapshot = Snapshot::new(records.to_vec());
        let serialized = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                RelayError::persistence_with_source(
                    format!("Failed to create snapshot directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, &serialized).map_err(|e| {
            RelayError::persistence_with_source(
                format!("Failed to write temp snapshot {}", temp_path.display()),
                e,
            )
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            RelayError::persistence_with_source(format!("Failed to replace snapshot {}", self.path.display()), e)
        })?;

        tracing::debug!("Saved {} OCR results to {}", records.len(), self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_PATH.to_string());
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let temp_name = format!("{}.tmp.{}.{}", file_name, std::process::id(), nanos);
        self.path.with_file_name(temp_name)
    }
}
