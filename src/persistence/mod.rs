//! Snapshot persistence
//!
//! The persistence contract is whole-tree: load returns a full snapshot or
//! "use defaults", save accepts a full snapshot. No delta protocol. The
//! store itself never touches disk; the owning session decides when to
//! load and save.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progression::activity::ActivityFeed;
use crate::progression::skill::Category;
use crate::progression::stats::UserStats;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur when loading or saving snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// A full serialized copy of the store's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub categories: Vec<Category>,
    pub stats: UserStats,
    pub activity: ActivityFeed,
}

/// Persistence provider interface
///
/// `load` returning `Ok(None)` means "no saved state, use defaults".
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
}

/// Snapshot store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        tracing::debug!("Loaded snapshot from {}", self.path.display());
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, raw)?;
        tracing::debug!("Saved snapshot to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_means_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("missing.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("save.json"));

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            categories: Vec::new(),
            stats: UserStats::new(10.0),
            activity: ActivityFeed::new(),
        };
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.version, SNAPSHOT_VERSION);
        assert_eq!(loaded.stats.weekly_goal, 10.0);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        let store = JsonSnapshotStore::new(&path);

        let mut snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            categories: Vec::new(),
            stats: UserStats::new(10.0),
            activity: ActivityFeed::new(),
        };
        snapshot.version = 99;
        store.save(&snapshot).unwrap();

        assert!(matches!(
            store.load(),
            Err(SnapshotError::UnsupportedVersion { found: 99, .. })
        ));
    }
}
