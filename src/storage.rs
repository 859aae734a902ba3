//! File-backed key/value store for persisted client state.
//!
//! Each key (`token`, `currentUser`, `sidebar-open`, `resetToken`) is kept as
//! a single JSON document in the state directory. Writes go to a temp file in
//! the same directory and are renamed into place, so an interrupted write never
//! leaves a truncated value behind.

use crate::config;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Persists small JSON values under string keys.
#[derive(Debug, Clone)]
pub struct LocalStore {
    /// Directory where state files are stored.
    pub state_dir: PathBuf,
}

impl LocalStore {
    /// Create a new store.
    ///
    /// If `state_dir` is `None`, uses the platform-appropriate default data directory.
    /// Creates the directory if it does not exist.
    pub fn new(state_dir: Option<PathBuf>) -> Result<Self> {
        let dir = state_dir.unwrap_or_else(config::default_state_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { state_dir: dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.state_dir.join(format!("{}.json", key))
    }

    /// Whether a value is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Load and parse the value stored under `key`.
    ///
    /// Returns `None` if nothing is stored. A file that fails to parse is
    /// removed and treated as absent, so the next write starts clean.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Corrupt state file {}: {} -- removing", path.display(), e);
                if let Err(rm) = fs::remove_file(&path) {
                    log::warn!("Could not remove corrupt state file {}: {}", path.display(), rm);
                }
                Ok(None)
            }
        }
    }

    /// Serialize `value` and store it under `key`, replacing any previous value.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.state_dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Remove all stored values and recreate the state directory.
    pub fn clear(&self) -> Result<()> {
        if self.state_dir.exists() {
            fs::remove_dir_all(&self.state_dir)?;
            fs::create_dir_all(&self.state_dir)?;
        }
        Ok(())
    }
}
