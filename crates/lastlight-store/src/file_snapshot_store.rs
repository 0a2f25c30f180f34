//! File-backed implementation of the `SnapshotStore` trait.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use lastlight_core::error::GameError;
use lastlight_core::store::{SnapshotStore, StoredSnapshot};

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    name: String,
    payload: serde_json::Value,
    saved_at: DateTime<Utc>,
}

/// Stores each record as `<dir>/<name>.json`.
///
/// Saves write a sibling temp file and rename it over the record, so a crash
/// mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, name: &str) -> Result<PathBuf, GameError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(GameError::Validation(format!(
                "invalid snapshot name: {name:?}"
            )));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> GameError {
    GameError::Persistence(format!("failed to {action} {}: {err}", path.display()))
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self, name: &str) -> Result<Option<StoredSnapshot>, GameError> {
        let path = self.record_path(name)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error("read", &path, &err)),
        };

        let file: SnapshotFile = serde_json::from_slice(&bytes).map_err(|err| {
            GameError::Persistence(format!("failed to decode {}: {err}", path.display()))
        })?;
        debug!(path = %path.display(), "snapshot loaded");
        Ok(Some(StoredSnapshot {
            name: file.name,
            payload: file.payload,
            saved_at: file.saved_at,
        }))
    }

    async fn save(&self, snapshot: &StoredSnapshot) -> Result<(), GameError> {
        let path = self.record_path(&snapshot.name)?;
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(&SnapshotFile {
            name: snapshot.name.clone(),
            payload: snapshot.payload.clone(),
            saved_at: snapshot.saved_at,
        })
        .map_err(|err| GameError::Persistence(format!("failed to encode snapshot: {err}")))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| io_error("create", &self.dir, &err))?;
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|err| io_error("write", &tmp, &err))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|err| io_error("replace", &path, &err))?;

        debug!(path = %path.display(), bytes = bytes.len(), "snapshot written");
        Ok(())
    }
}
