//! JSON file implementation of the product store
//!
//! The whole store is a single pretty-printed JSON object mapping each domain
//! to its product URLs. Every write replaces the file.

use crate::storage::traits::{ProductMap, ResultStore, StorageError, StorageResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Product store backed by one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Points a store at `path` without touching the file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the store file, truncating it to `{}`
    pub fn create(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let mut store = Self::new(path);
        store.reset()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl ResultStore for JsonFileStore {
    fn reset(&mut self) -> StorageResult<()> {
        self.save(&ProductMap::new())
    }

    fn load(&self) -> StorageResult<ProductMap> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProductMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        match serde_json::from_str(&content) {
            Ok(products) => Ok(products),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable store {}: {}",
                    self.path.display(),
                    e
                );
                Ok(ProductMap::new())
            }
        }
    }

    fn save(&mut self, products: &ProductMap) -> StorageResult<()> {
        let encoded = serde_json::to_string_pretty(products)?;
        std::fs::write(&self.path, encoded).map_err(|e| self.io_error(e))
    }
}
