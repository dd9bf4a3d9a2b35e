//! Crawler module for product URL discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with politeness delays, caching and 429 retries
//! - HTML link extraction
//! - Product URL classification
//! - The per-domain depth-first crawl engine
//! - Concurrent orchestration across domains

mod classifier;
mod coordinator;
mod engine;
mod fetcher;
mod parser;

pub use classifier::ProductClassifier;
pub use coordinator::Orchestrator;
pub use engine::{CrawlResult, CrawlStats, DomainCrawler};
pub use fetcher::{build_http_client, retry_after, FetchSettings, Fetcher};
pub use parser::extract_links;

use crate::config::Config;
use crate::output::CrawlReport;
use crate::url::parse_targets;
use crate::ScoutError;

/// Runs a complete crawl over `domains`
///
/// Every domain is validated before the output file is truncated, so a bad
/// domain string leaves an earlier output untouched.
pub async fn crawl<S: AsRef<str>>(config: Config, domains: &[S]) -> Result<CrawlReport, ScoutError> {
    let targets = parse_targets(domains)?;
    let orchestrator = Orchestrator::new(config)?;
    Ok(orchestrator.run(targets).await)
}
