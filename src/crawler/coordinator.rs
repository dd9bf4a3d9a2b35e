//! Crawl orchestration across domains
//!
//! This module runs one domain crawl engine per target, including:
//! - Spawning each engine as its own task, so a panic stays inside its domain
//! - Bounding how many engines run at once with a semaphore
//! - Merging each finished domain into the shared product store under one lock
//! - Collecting results in completion order into a run report

use crate::config::Config;
use crate::crawler::classifier::ProductClassifier;
use crate::crawler::engine::{CrawlResult, DomainCrawler};
use crate::output::CrawlReport;
use crate::storage::{persist_result, shared, JsonFileStore, ResultStore, SharedStore};
use crate::url::DomainTarget;
use crate::ScoutError;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::Instrument;

/// What one worker hands back to the orchestrator
#[derive(Debug)]
struct WorkerOutcome {
    result: CrawlResult,
    persisted: bool,
}

/// Runs domain crawl engines concurrently and persists their results
pub struct Orchestrator<S: ResultStore + Send + 'static> {
    config: Arc<Config>,
    classifier: Arc<ProductClassifier>,
    store: SharedStore<S>,
    workers: usize,
}

impl Orchestrator<JsonFileStore> {
    /// Creates an orchestrator writing to the configured JSON file
    ///
    /// The file is truncated to `{}` here, before any domain is crawled.
    pub fn new(config: Config) -> Result<Self, ScoutError> {
        let store = JsonFileStore::create(&config.output.path)?;
        tracing::info!("Initialized empty output file: {}", config.output.path);
        Self::with_store(config, store)
    }
}

impl<S: ResultStore + Send + 'static> Orchestrator<S> {
    /// Creates an orchestrator over an already-prepared store
    pub fn with_store(config: Config, store: S) -> Result<Self, ScoutError> {
        let classifier = ProductClassifier::new(&config.products.patterns)?;
        let workers = config.crawler.worker_limit().max(1);

        Ok(Self {
            config: Arc::new(config),
            classifier: Arc::new(classifier),
            store: shared(store),
            workers,
        })
    }

    pub fn worker_limit(&self) -> usize {
        self.workers
    }

    /// The store shared with every worker
    pub fn store(&self) -> &SharedStore<S> {
        &self.store
    }

    /// Crawls every target and returns the run report
    ///
    /// At most `worker_limit()` engines run at once. Each finished domain is
    /// merged into the store immediately; a failed domain is reported and
    /// left out of the store without affecting the others.
    pub async fn run(&self, targets: Vec<DomainTarget>) -> CrawlReport {
        tracing::info!(
            "Starting concurrent crawling of {} domain(s), max_workers={}",
            targets.len(),
            self.workers
        );

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut workers = FuturesUnordered::new();

        for target in targets {
            let domain = target.identity().to_string();
            let handle = tokio::spawn(crawl_domain(
                target,
                Arc::clone(&self.config),
                Arc::clone(&self.classifier),
                Arc::clone(&self.store),
                Arc::clone(&semaphore),
            ));
            workers.push(async move { (domain, handle.await) });
        }

        let mut report = CrawlReport::new();
        while let Some((domain, outcome)) = workers.next().await {
            match outcome {
                Ok(Ok(outcome)) => {
                    if !outcome.persisted {
                        report.unpersisted.push(domain.clone());
                    }
                    tracing::info!(
                        "Domain completed: {}, products found: {}",
                        domain,
                        outcome.result.product_urls.len()
                    );
                    report.record_result(outcome.result);
                }
                Ok(Err(e)) => {
                    tracing::error!("{} generated an error: {}", domain, e);
                    report.record_failure(domain, e.to_string());
                }
                Err(e) => {
                    let reason = describe_join_error(e);
                    tracing::error!("{} worker aborted: {}", domain, reason);
                    report.record_failure(domain, reason);
                }
            }
        }

        report.finish();
        tracing::info!(
            "All domains have been crawled: {} completed, {} failed",
            report.results.len(),
            report.failed.len()
        );
        report
    }
}

/// One worker: wait for a slot, crawl the domain, merge into the store
async fn crawl_domain<S: ResultStore + Send + 'static>(
    target: DomainTarget,
    config: Arc<Config>,
    classifier: Arc<ProductClassifier>,
    store: SharedStore<S>,
    semaphore: Arc<Semaphore>,
) -> Result<WorkerOutcome, ScoutError> {
    let domain = target.identity().to_string();
    // Errors only if the semaphore is closed; `run` never closes it.
    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|e| ScoutError::Worker {
            domain: domain.clone(),
            message: e.to_string(),
        })?;

    let span = tracing::info_span!("domain", domain = %domain);
    let result = async move { DomainCrawler::new(target, config, classifier)?.run().await }
        .instrument(span)
        .await?;

    let urls = result.product_urls.clone();
    let write = tokio::task::spawn_blocking(move || persist_result(&*store, &domain, &urls)).await;

    let persisted = match write {
        Ok(Ok(count)) => {
            tracing::info!(
                "{} finished with {} products, {} stored for the domain",
                result.domain,
                result.product_urls.len(),
                count
            );
            true
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to persist results for {}: {}", result.domain, e);
            false
        }
        Err(e) => {
            tracing::error!(
                "Persist task for {} aborted: {}",
                result.domain,
                describe_join_error(e)
            );
            false
        }
    };

    Ok(WorkerOutcome { result, persisted })
}

/// Turns a task failure into a readable reason
fn describe_join_error(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("worker panicked: {}", message)
    } else {
        "worker panicked".to_string()
    }
}
