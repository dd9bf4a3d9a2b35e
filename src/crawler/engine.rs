//! Domain crawl engine
//!
//! One engine owns one domain's traversal. It resolves the robots policy, then
//! walks same-site links depth-first from the domain root, recording every
//! link that looks like a product page. The engine never fails because of a
//! single page: fetch failures only prune that branch.

use crate::config::Config;
use crate::crawler::classifier::ProductClassifier;
use crate::crawler::fetcher::{build_http_client, FetchSettings, Fetcher};
use crate::crawler::parser::extract_links;
use crate::robots::{fetch_robots, RobotsPolicy};
use crate::state::{CrawlFrontier, EngineState};
use crate::url::{is_same_site, DomainTarget};
use crate::ScoutError;
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// Counters collected while crawling one domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched successfully (cache hits included)
    pub pages_fetched: u64,
    /// Pages whose fetch produced no content
    pub pages_failed: u64,
    /// URLs skipped because robots.txt disallows them
    pub robots_denied: u64,
    /// URLs skipped for exceeding the maximum depth
    pub depth_pruned: u64,
}

/// Final output of one domain crawl
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// The domain string as supplied by the caller
    pub domain: String,
    /// Sorted, deduplicated product URLs
    pub product_urls: Vec<String>,
    pub stats: CrawlStats,
}

/// Crawl engine bound to a single domain
pub struct DomainCrawler {
    target: DomainTarget,
    config: Arc<Config>,
    classifier: Arc<ProductClassifier>,
    client: Client,
    state: EngineState,
    robots: Option<RobotsPolicy>,
    frontier: CrawlFrontier,
    stats: CrawlStats,
}

impl DomainCrawler {
    /// Creates an engine in the `Init` state
    pub fn new(
        target: DomainTarget,
        config: Arc<Config>,
        classifier: Arc<ProductClassifier>,
    ) -> Result<Self, ScoutError> {
        let client = build_http_client(&config.crawler)?;
        tracing::info!("Initialized crawler for domain: {}", target.authority());

        Ok(Self {
            target,
            config,
            classifier,
            client,
            state: EngineState::Init,
            robots: None,
            frontier: CrawlFrontier::new(),
            stats: CrawlStats::default(),
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn target(&self) -> &DomainTarget {
        &self.target
    }

    pub fn robots(&self) -> Option<&RobotsPolicy> {
        self.robots.as_ref()
    }

    fn transition(&mut self, next: EngineState) -> Result<(), ScoutError> {
        if !self.state.can_transition_to(next) {
            return Err(ScoutError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("{}: {} -> {}", self.target.authority(), self.state, next);
        self.state = next;
        Ok(())
    }

    /// Fetches robots.txt and moves to `RobotsLoaded`
    pub async fn load_robots(&mut self) -> Result<(), ScoutError> {
        let policy = fetch_robots(&self.client, &self.target, &self.config.crawler).await;
        self.apply_robots(policy)
    }

    /// Installs an already-resolved robots policy and moves to `RobotsLoaded`
    pub fn apply_robots(&mut self, policy: RobotsPolicy) -> Result<(), ScoutError> {
        self.transition(EngineState::RobotsLoaded)?;
        self.robots = Some(policy);
        Ok(())
    }

    /// Runs the depth-first traversal from the domain root
    ///
    /// # Traversal Rules
    ///
    /// A `(url, depth)` pair is dropped without fetching when the URL was
    /// already visited, when `depth > max_depth`, or when robots.txt
    /// disallows it. Otherwise it is marked visited and fetched. Every
    /// same-site link on the page is classified and then explored at
    /// `depth + 1`, in page order.
    ///
    /// The work stack holds children in reverse page order so pops follow
    /// the same order a recursive walk would.
    pub async fn crawl(&mut self) -> Result<(), ScoutError> {
        self.transition(EngineState::Crawling)?;
        tracing::info!("Starting crawl for domain: {}", self.target.authority());

        let robots = self
            .robots
            .clone()
            .unwrap_or_else(|| RobotsPolicy::allow_all(self.target.robots_url()));
        let fetcher = Fetcher::new(
            self.client.clone(),
            robots.effective_user_agent(),
            FetchSettings::from_config(&self.config.crawler),
        );
        let max_depth = self.config.crawler.max_depth;

        let root = Url::parse(&self.target.root_url())?;
        let mut stack: Vec<(String, u32)> = vec![(root.to_string(), 0)];

        while let Some((url, depth)) = stack.pop() {
            if self.frontier.is_visited(&url) {
                tracing::debug!("Already visited: {}", url);
                continue;
            }
            if depth > max_depth {
                tracing::debug!("Max depth exceeded at: {}", url);
                self.stats.depth_pruned += 1;
                continue;
            }
            if !robots.can_fetch(&url) {
                tracing::debug!("Disallowed by robots.txt: {}", url);
                self.stats.robots_denied += 1;
                continue;
            }

            self.frontier.mark_visited(&url);
            tracing::debug!("Fetching URL: {} (depth={})", url, depth);

            let body = match fetcher.fetch(&url, &mut self.frontier.page_cache).await {
                Some(body) => body,
                None => {
                    tracing::debug!("No HTML content returned for: {}", url);
                    self.stats.pages_failed += 1;
                    continue;
                }
            };
            self.stats.pages_fetched += 1;

            let base_url = match Url::parse(&url) {
                Ok(base_url) => base_url,
                Err(e) => {
                    tracing::warn!("Cannot use {} as a base URL: {}", url, e);
                    continue;
                }
            };

            let mut children = Vec::new();
            for link in extract_links(&base_url, &body) {
                if !is_same_site(&self.target, &link) {
                    tracing::trace!("Skipping external link: {}", link);
                    continue;
                }

                let link = String::from(link);
                if self.classifier.is_product(&link) && self.frontier.record_product(&link) {
                    tracing::info!("Product URL found: {}", link);
                }
                children.push((link, depth + 1));
            }
            stack.extend(children.into_iter().rev());
        }

        self.transition(EngineState::Done)?;
        tracing::info!(
            "Finished crawl for domain: {} ({} pages visited, {} products)",
            self.target.authority(),
            self.frontier.visited_count(),
            self.frontier.product_count()
        );
        Ok(())
    }

    /// Consumes the engine, yielding the sorted product URLs and counters
    pub fn into_result(self) -> CrawlResult {
        CrawlResult {
            domain: self.target.identity().to_string(),
            product_urls: self.frontier.into_products(),
            stats: self.stats,
        }
    }

    /// Runs the full lifecycle: robots, traversal, result
    pub async fn run(mut self) -> Result<CrawlResult, ScoutError> {
        self.load_robots().await?;
        self.crawl().await?;
        Ok(self.into_result())
    }
}
