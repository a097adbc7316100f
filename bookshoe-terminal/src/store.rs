/// Settings persistence as one JSON file per key
use bookshoe_core::{SettingsStore, StorageError};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) => {
                debug!(path = %path.display(), %err, "no stored value");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_error = |err: std::io::Error| StorageError::Write {
            key: key.to_string(),
            reason: err.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(write_error)?;
        fs::write(self.path(key), value).map_err(write_error)
    }
}
