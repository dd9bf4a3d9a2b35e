//! Storage module for persisting discovered product URLs
//!
//! This module handles the output store shared by every domain worker:
//! - A `ResultStore` trait with whole-store read, write and merge
//! - A JSON file implementation
//! - The single lock that serializes read-merge-write across workers

mod json;
mod traits;

pub use json::JsonFileStore;
pub use traits::{merge_into, ProductMap, ResultStore, StorageError, StorageResult};

use std::sync::{Arc, Mutex};

/// A store shared by all workers behind one mutual-exclusion gate
pub type SharedStore<S> = Arc<Mutex<S>>;

/// Wraps a store for sharing between workers
pub fn shared<S: ResultStore>(store: S) -> SharedStore<S> {
    Arc::new(Mutex::new(store))
}

/// Merges one domain's URLs into the shared store
///
/// The lock is held for the whole read-merge-write sequence and released when
/// the guard drops, on success and error alike.
pub fn persist_result<S: ResultStore>(
    store: &Mutex<S>,
    domain: &str,
    urls: &[String],
) -> StorageResult<usize> {
    let mut guard = store.lock().map_err(|_| StorageError::Poisoned)?;
    guard.merge_domain(domain, urls)
}
