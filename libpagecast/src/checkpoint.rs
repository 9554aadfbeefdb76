//! Timestamp checkpoint persisted to a local file
//!
//! The checkpoint holds the "new since" cutoff for the relay: the whole file
//! is one RFC 3339 timestamp. A missing or unparsable file is treated as
//! "three hours ago" so a fresh deployment picks up recent posts without
//! replaying the channel's history.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::error::Result;

/// How far back to look when no checkpoint exists
const DEFAULT_LOOKBACK_HOURS: i64 = 3;

/// Reads and writes the single-timestamp checkpoint file
///
/// The write is a plain truncating write; there is no locking or atomic
/// rename, so two concurrent runs sharing a checkpoint file can race.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the stored timestamp, or `now - 3h` when absent or corrupt
    ///
    /// Parse failure is deliberately treated the same as a missing file and
    /// never surfaces as an error.
    pub fn read(&self) -> DateTime<Utc> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match DateTime::parse_from_rfc3339(content.trim()) {
                Ok(ts) => ts.with_timezone(&Utc),
                Err(e) => {
                    debug!(path = %self.path.display(), error = %e, "checkpoint unparsable, using default lookback");
                    default_checkpoint()
                }
            },
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "checkpoint unreadable, using default lookback");
                default_checkpoint()
            }
        }
    }

    /// Overwrite the checkpoint file with the given timestamp
    pub fn write(&self, ts: DateTime<Utc>) -> Result<()> {
        std::fs::write(&self.path, ts.to_rfc3339())?;
        Ok(())
    }
}

fn default_checkpoint() -> DateTime<Utc> {
    Utc::now() - Duration::hours(DEFAULT_LOOKBACK_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("checkpoint.txt"));

        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap();
        store.write(ts).unwrap();

        assert_eq!(store.read(), ts);
    }

    #[test]
    fn test_missing_file_defaults_to_three_hours_ago() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("does_not_exist.txt"));

        let expected = Utc::now() - Duration::hours(3);
        let actual = store.read();

        let drift = (actual - expected).num_seconds().abs();
        assert!(drift < 5, "default checkpoint drifted by {}s", drift);
    }

    #[test]
    fn test_corrupt_file_defaults_to_three_hours_ago() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpoint.txt");
        std::fs::write(&path, "not a timestamp").unwrap();

        let store = CheckpointStore::new(&path);
        let expected = Utc::now() - Duration::hours(3);
        let actual = store.read();

        let drift = (actual - expected).num_seconds().abs();
        assert!(drift < 5, "default checkpoint drifted by {}s", drift);
    }

    #[test]
    fn test_read_tolerates_surrounding_whitespace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpoint.txt");
        std::fs::write(&path, "2024-05-01T12:30:45+00:00\n").unwrap();

        let store = CheckpointStore::new(&path);
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap();
        assert_eq!(store.read(), expected);
    }

    #[test]
    fn test_write_overwrites_previous_value() {
        let dir = tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("checkpoint.txt"));

        let first = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();

        store.write(first).unwrap();
        store.write(second).unwrap();

        assert_eq!(store.read(), second);
    }
}
