//! Robots.txt parser implementation
//!
//! Agent discovery is done here by scanning `User-agent:` lines; rule
//! evaluation is delegated to the robotstxt crate.

use robotstxt::DefaultMatcher;

/// The wildcard agent token
pub const WILDCARD_AGENT: &str = "*";

/// Rule matcher over a raw robots.txt body
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The agent token rules are evaluated for
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}

/// Lists the agent tokens declared by `User-agent:` lines, in source order
///
/// The directive name is matched case-insensitively; values keep their case.
/// Trailing `#` comments are dropped.
pub fn declared_agents(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.split('#').next().unwrap_or_default().trim();
            let (key, value) = line.split_once(':')?;
            if !key.trim().eq_ignore_ascii_case("user-agent") {
                return None;
            }
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .collect()
}

/// Picks the agent to crawl under
///
/// `*` wins if declared anywhere; otherwise the first declared agent; with no
/// declarations at all, `*`.
pub fn select_effective_agent(agents: &[String]) -> String {
    if agents.iter().any(|agent| is_wildcard(agent)) {
        return WILDCARD_AGENT.to_string();
    }

    agents
        .first()
        .cloned()
        .unwrap_or_else(|| WILDCARD_AGENT.to_string())
}

pub fn is_wildcard(agent: &str) -> bool {
    agent == WILDCARD_AGENT
}
