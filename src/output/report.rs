//! Run report types
//!
//! The orchestrator collects every completed domain into a `CrawlReport`,
//! which the binary logs and optionally renders as markdown.

use crate::crawler::{CrawlResult, CrawlStats};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A domain whose worker did not produce a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDomain {
    pub domain: String,
    pub reason: String,
}

/// Outcome of one orchestrated run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Product URLs per completed domain, keyed by caller-supplied identity
    pub results: BTreeMap<String, Vec<String>>,

    /// Crawl counters per completed domain
    pub stats: BTreeMap<String, CrawlStats>,

    /// Domains whose worker failed, in completion order
    pub failed: Vec<FailedDomain>,

    /// Domains whose result could not be written to the store
    pub unpersisted: Vec<String>,
}

impl CrawlReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            results: BTreeMap::new(),
            stats: BTreeMap::new(),
            failed: Vec::new(),
            unpersisted: Vec::new(),
        }
    }

    pub fn record_result(&mut self, result: CrawlResult) {
        self.stats.insert(result.domain.clone(), result.stats);
        self.results.insert(result.domain, result.product_urls);
    }

    pub fn record_failure(&mut self, domain: impl Into<String>, reason: impl Into<String>) {
        self.failed.push(FailedDomain {
            domain: domain.into(),
            reason: reason.into(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    pub fn total_products(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }
}

impl Default for CrawlReport {
    fn default() -> Self {
        Self::new()
    }
}
