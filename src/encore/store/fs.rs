use super::KeyValueStore;
use crate::error::{EncoreError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store: each key is one JSON file under the root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(EncoreError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(path).map_err(EncoreError::Io)?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_root()?;
        fs::write(self.key_path(key), value).map_err(EncoreError::Io)?;
        Ok(())
    }
}
