//! Storage traits and error types
//!
//! This module defines the trait interface for the product store and its
//! error type.

use std::collections::BTreeMap;
use thiserror::Error;

/// Domain identity -> sorted, deduplicated product URLs
pub type ProductMap = BTreeMap<String, Vec<String>>;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for product store implementations
///
/// Each method is a whole-store operation. Implementations are not
/// internally synchronized; concurrent callers share one instance behind a
/// single mutex (see [`crate::storage::persist_result`]).
pub trait ResultStore {
    /// Truncates the store to an empty mapping
    fn reset(&mut self) -> StorageResult<()>;

    /// Reads the whole mapping
    ///
    /// A store that does not exist yet, or cannot be decoded, reads as empty.
    fn load(&self) -> StorageResult<ProductMap>;

    /// Replaces the whole mapping
    fn save(&mut self, products: &ProductMap) -> StorageResult<()>;

    /// Unions `urls` into the domain's entry and writes the store back
    ///
    /// # Returns
    ///
    /// The number of URLs stored for the domain after the merge
    fn merge_domain(&mut self, domain: &str, urls: &[String]) -> StorageResult<usize> {
        let mut products = self.load()?;
        let count = merge_into(&mut products, domain, urls);
        self.save(&products)?;
        Ok(count)
    }
}

/// Unions `urls` into `products[domain]`, keeping it sorted and deduplicated
pub fn merge_into(products: &mut ProductMap, domain: &str, urls: &[String]) -> usize {
    let entry = products.entry(domain.to_string()).or_default();
    entry.extend(urls.iter().cloned());
    entry.sort();
    entry.dedup();
    entry.len()
}
