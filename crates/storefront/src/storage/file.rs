//! File-backed storage backend.
//!
//! Each origin gets one file, `<dir>/<origin>.json`, holding a JSON object of
//! string values. Writes go to a sibling temp file that is then renamed over
//! the previous one, so a crash mid-write never leaves a half-written file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Storage persisted to a JSON file per origin.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Open storage for `origin` under `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidOrigin` if the origin contains path
    /// separators or is empty, or `StorageError::Io` if the directory cannot
    /// be created.
    pub fn open(dir: impl AsRef<Path>, origin: &str) -> Result<Self, StorageError> {
        let file_stem = sanitize_origin(origin)?;
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(format!("{file_stem}.json")),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), keys = entries.len(), "storage file written");
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Turn an origin like `https://shop.example:8443` into a safe file stem.
fn sanitize_origin(origin: &str) -> Result<String, StorageError> {
    let stem: String = origin
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect();

    if stem.trim_matches(|c| c == '_' || c == '.').is_empty() {
        return Err(StorageError::InvalidOrigin(origin.to_string()));
    }
    Ok(stem)
}
