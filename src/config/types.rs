use serde::Deserialize;
use std::time::Duration;

/// Product URL shapes used when no `[products]` section is configured
pub const DEFAULT_PRODUCT_PATTERNS: &[&str] = &[
    r"pd_rd_r",
    r"iid=",
    r"[0-9]{6,10}/buy",
    r"product/[^/]+/[0-9]{7,}",
    r"/p/[0-9]{7,}",
];

/// Domains crawled when neither the command line nor the config names any
pub const DEFAULT_DOMAINS: &[&str] = &["amazon.com", "flipkart.com", "snapdeal.com"];

/// Main configuration structure for Product-Scout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub products: ProductConfig,
    #[serde(default)]
    pub targets: TargetConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CrawlerConfig {
    /// Maximum link-hops from the domain root (inclusive)
    pub max_depth: u32,

    /// Per-request timeout for page fetches (seconds)
    pub request_timeout: u64,

    /// Timeout for the robots.txt fetch (seconds)
    pub robots_timeout: u64,

    /// Number of domains crawled at once; defaults to available parallelism
    pub max_workers: Option<usize>,

    /// Attempt budget per uncached fetch
    pub max_attempts: u32,

    /// Lower bound of the politeness delay before each uncached fetch (milliseconds)
    pub min_delay_ms: u64,

    /// Upper bound (exclusive) of the politeness delay (milliseconds)
    pub max_delay_ms: u64,

    /// Fixed back-off after a network error or timeout (milliseconds)
    pub network_retry_delay_ms: u64,

    /// Back-off used for HTTP 429 when `Retry-After` is absent or not numeric (seconds)
    pub default_retry_after: u64,

    /// User-Agent header sent on the robots.txt request
    pub fallback_user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            request_timeout: 10,
            robots_timeout: 5,
            max_workers: None,
            max_attempts: 3,
            min_delay_ms: 1000,
            max_delay_ms: 2000,
            network_retry_delay_ms: 2000,
            default_retry_after: 5,
            fallback_user_agent: "MyDefaultAgent/1.0".to_string(),
        }
    }
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn robots_timeout(&self) -> Duration {
        Duration::from_secs(self.robots_timeout)
    }

    pub fn network_retry_delay(&self) -> Duration {
        Duration::from_millis(self.network_retry_delay_ms)
    }

    /// Resolves the worker limit, falling back to the machine's parallelism
    pub fn worker_limit(&self) -> usize {
        self.max_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputConfig {
    /// Path to the JSON product store
    pub path: String,

    /// Optional path for the markdown run summary
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "product_urls.json".to_string(),
            summary_path: None,
        }
    }
}

/// Product classification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    /// Ordered regular expressions describing product-page URLs
    pub patterns: Vec<String>,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PRODUCT_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// Default crawl targets
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Domain strings, each optionally prefixed with a scheme
    pub domains: Vec<String>,
}

impl TargetConfig {
    /// Returns the configured domains, or the built-in list when none are set
    pub fn resolved_domains(&self) -> Vec<String> {
        if self.domains.is_empty() {
            DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect()
        } else {
            self.domains.clone()
        }
    }
}
