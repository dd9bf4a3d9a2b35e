//! Robots.txt handling module
//!
//! Resolves, once per domain, the agent to crawl under and the rules that
//! apply to it. Any failure to fetch robots.txt degrades to "no rules".

mod parser;

pub use parser::{declared_agents, is_wildcard, select_effective_agent, ParsedRobots};

use crate::config::CrawlerConfig;
use crate::url::DomainTarget;
use reqwest::{Client, StatusCode};

/// Per-domain robots decision, read-only once built
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    robots_url: String,
    effective_user_agent: String,
    /// Present only when the file declares a `User-agent: *` group
    rules: Option<ParsedRobots>,
}

impl RobotsPolicy {
    /// Policy used when robots.txt is missing, unreachable or empty
    pub fn allow_all(robots_url: impl Into<String>) -> Self {
        Self {
            robots_url: robots_url.into(),
            effective_user_agent: parser::WILDCARD_AGENT.to_string(),
            rules: None,
        }
    }

    /// Builds the policy from a fetched robots.txt body
    ///
    /// The effective agent follows [`select_effective_agent`]. Rules are only
    /// loaded when a wildcard group exists; a file that names specific agents
    /// only leaves the crawl unrestricted.
    pub fn from_body(robots_url: impl Into<String>, body: &str) -> Self {
        let agents = declared_agents(body);
        let effective_user_agent = select_effective_agent(&agents);
        let rules = agents
            .iter()
            .any(|agent| is_wildcard(agent))
            .then(|| ParsedRobots::from_content(body));

        Self {
            robots_url: robots_url.into(),
            effective_user_agent,
            rules,
        }
    }

    pub fn robots_url(&self) -> &str {
        &self.robots_url
    }

    pub fn effective_user_agent(&self) -> &str {
        &self.effective_user_agent
    }

    pub fn has_rules(&self) -> bool {
        self.rules.is_some()
    }

    /// Checks whether `url` may be fetched under the effective agent
    pub fn can_fetch(&self, url: &str) -> bool {
        match &self.rules {
            Some(rules) => rules.is_allowed(url, &self.effective_user_agent),
            None => true,
        }
    }
}

/// Fetches and resolves robots.txt for a domain
///
/// Never fails: network errors and non-200 responses yield
/// [`RobotsPolicy::allow_all`].
pub async fn fetch_robots(
    client: &Client,
    target: &DomainTarget,
    config: &CrawlerConfig,
) -> RobotsPolicy {
    let robots_url = target.robots_url();
    tracing::info!("Fetching robots.txt from {}", robots_url);

    let response = client
        .get(&robots_url)
        .header(reqwest::header::USER_AGENT, &config.fallback_user_agent)
        .timeout(config.robots_timeout())
        .send()
        .await;

    let body = match response {
        Ok(resp) if resp.status() == StatusCode::OK => match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read robots.txt for {}: {}", target.authority(), e);
                return RobotsPolicy::allow_all(robots_url);
            }
        },
        Ok(resp) => {
            tracing::debug!(
                "robots.txt for {} returned HTTP {}, crawling unrestricted",
                target.authority(),
                resp.status().as_u16()
            );
            return RobotsPolicy::allow_all(robots_url);
        }
        Err(e) => {
            tracing::warn!("Failed to load robots.txt for {}: {}", target.authority(), e);
            return RobotsPolicy::allow_all(robots_url);
        }
    };

    let policy = RobotsPolicy::from_body(robots_url, &body);
    tracing::info!(
        "Chose user-agent '{}' based on {}",
        policy.effective_user_agent(),
        policy.robots_url()
    );
    policy
}
