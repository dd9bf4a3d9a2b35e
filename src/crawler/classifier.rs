//! Product URL classification

use crate::{ConfigError, ConfigResult};
use regex::Regex;

/// Ordered set of product-page URL shapes
#[derive(Debug, Clone)]
pub struct ProductClassifier {
    patterns: Vec<Regex>,
}

impl ProductClassifier {
    /// Compiles the given patterns, in order
    ///
    /// # Example
    ///
    /// ```
    /// use product_scout::crawler::ProductClassifier;
    ///
    /// let classifier = ProductClassifier::new(&["product/[^/]+/[0-9]{7,}"]).unwrap();
    /// assert!(classifier.is_product("https://shop.example/product/widget/1234567"));
    /// assert!(!classifier.is_product("https://shop.example/about"));
    /// ```
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> ConfigResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|source| ConfigError::InvalidPattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// True if any pattern matches anywhere in the URL
    pub fn is_product(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(url))
    }
}
