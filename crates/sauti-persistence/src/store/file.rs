//! File-backed store: one file per key inside a state directory.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::DurableStore;
use crate::error::{PersistenceError, Result};
use crate::keys::StoreKey;

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temp file which is synced and then renamed over the
/// target, so a crash leaves either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a state directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: StoreKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Io {
                operation: "read",
                path,
                source: e,
            }),
        }
    }

    fn set(&mut self, key: StoreKey, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(value.as_bytes())
            .map_err(|e| PersistenceError::Io {
                operation: "write",
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &path).map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source: e,
        })?;

        tracing::trace!(key = %key, path = %path.display(), "stored key");
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Io {
                operation: "remove",
                path,
                source: e,
            }),
        }
    }
}
