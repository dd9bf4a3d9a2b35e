use std::collections::{BTreeSet, HashMap, HashSet};

/// Memoized page bodies, keyed by URL
pub type PageCache = HashMap<String, String>;

/// Traversal state private to one domain crawl engine
///
/// Never shared between engines, so it needs no synchronization. `visited`
/// and `discovered_products` only grow.
#[derive(Debug, Default)]
pub struct CrawlFrontier {
    /// URLs whose fetch was attempted, successful or not
    visited: HashSet<String>,

    /// Product URLs found so far, kept sorted
    discovered_products: BTreeSet<String>,

    /// Successful fetch bodies for the engine's lifetime
    pub page_cache: PageCache,
}

impl CrawlFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Marks a URL visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Records a product URL; returns true if it was new
    pub fn record_product(&mut self, url: &str) -> bool {
        self.discovered_products.insert(url.to_string())
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn product_count(&self) -> usize {
        self.discovered_products.len()
    }

    /// Consumes the frontier, yielding the sorted product URLs
    pub fn into_products(self) -> Vec<String> {
        self.discovered_products.into_iter().collect()
    }
}
