//! HTTP fetcher implementation
//!
//! This module handles all page requests for a domain engine, including:
//! - Building the shared HTTP client
//! - Serving repeat requests from the engine's page cache
//! - Randomized politeness pacing before each network request
//! - Retry logic for throttling (HTTP 429) and transient network failures

use crate::config::CrawlerConfig;
use crate::state::PageCache;
use reqwest::header::{HeaderMap, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Timing and retry knobs for the fetcher
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Per-request timeout
    pub timeout: Duration,
    /// Attempt budget per uncached fetch
    pub max_attempts: u32,
    /// Politeness delay range, `[min, max)`
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// Back-off after a network error or timeout
    pub network_retry_delay: Duration,
    /// Back-off for 429 without a usable `Retry-After` header
    pub default_retry_after: Duration,
}

impl FetchSettings {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            timeout: config.request_timeout(),
            max_attempts: config.max_attempts,
            min_delay: Duration::from_millis(config.min_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            network_retry_delay: config.network_retry_delay(),
            default_retry_after: Duration::from_secs(config.default_retry_after),
        }
    }

    /// Samples the politeness delay uniformly from `[min_delay, max_delay)`
    pub fn politeness_delay(&self) -> Duration {
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        if max <= min {
            return self.min_delay;
        }
        Duration::from_millis(rand::random_range(min..max))
    }
}

/// Builds the HTTP client shared by one engine's robots and page requests
///
/// The User-Agent is set per request, since it depends on the domain's
/// robots.txt.
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.request_timeout())
        .connect_timeout(config.request_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Reads `Retry-After` as whole seconds, falling back to `default`
///
/// HTTP-date values are not supported and count as absent.
pub fn retry_after(headers: &HeaderMap, default: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

/// Page fetcher for one domain engine
pub struct Fetcher {
    client: Client,
    user_agent: String,
    settings: FetchSettings,
}

impl Fetcher {
    /// Creates a fetcher sending `user_agent` on every page request
    pub fn new(client: Client, user_agent: &str, settings: FetchSettings) -> Self {
        Self {
            client,
            user_agent: user_agent.to_string(),
            settings,
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Fetches a page body
    ///
    /// # Request Flow
    ///
    /// 1. Cached body → returned without network I/O
    /// 2. Politeness delay, then GET with the engine's User-Agent
    /// 3. Response handling per attempt:
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 200 | Cache body and return it |
    /// | HTTP 429 | Sleep `Retry-After` seconds, retry |
    /// | Other status | Give up immediately |
    /// | Timeout / network error | Sleep fixed delay, retry |
    ///
    /// Returns `None` when the attempts run out or the status is permanent.
    /// Failures are never cached.
    pub async fn fetch(&self, url: &str, cache: &mut PageCache) -> Option<String> {
        if let Some(body) = cache.get(url) {
            tracing::debug!("Cache hit: {}", url);
            return Some(body.clone());
        }

        let max_attempts = self.settings.max_attempts;
        for attempt in 1..=max_attempts {
            let delay = self.settings.politeness_delay();
            tracing::debug!("Sleeping {:?} before request to {}", delay, url);
            tokio::time::sleep(delay).await;

            let response = self
                .client
                .get(url)
                .header(USER_AGENT, &self.user_agent)
                .timeout(self.settings.timeout)
                .send()
                .await;

            match response {
                Ok(resp) => match resp.status() {
                    StatusCode::OK => match resp.text().await {
                        Ok(body) => {
                            cache.insert(url.to_string(), body.clone());
                            return Some(body);
                        }
                        Err(e) => {
                            tracing::error!(
                                "Error reading body of {} (attempt {}/{}): {}",
                                url,
                                attempt,
                                max_attempts,
                                e
                            );
                            tokio::time::sleep(self.settings.network_retry_delay).await;
                        }
                    },
                    StatusCode::TOO_MANY_REQUESTS => {
                        let wait = retry_after(resp.headers(), self.settings.default_retry_after);
                        tracing::warn!(
                            "429 at {}; waiting {}s before retry (attempt {}/{})",
                            url,
                            wait.as_secs(),
                            attempt,
                            max_attempts
                        );
                        tokio::time::sleep(wait).await;
                    }
                    status => {
                        tracing::warn!("Non-200 status {} for {}", status.as_u16(), url);
                        return None;
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Error fetching {} (attempt {}/{}): {}",
                        url,
                        attempt,
                        max_attempts,
                        e
                    );
                    tokio::time::sleep(self.settings.network_retry_delay).await;
                }
            }
        }

        tracing::debug!("Giving up on {} after {} attempts", url, max_attempts);
        None
    }
}
