//! URL handling module for Product-Scout
//!
//! This module provides domain target parsing and the same-site check used to
//! keep a crawl inside its domain.

mod domain;
mod matcher;

pub use domain::{authority_of, DomainTarget};
pub use matcher::is_same_site;

use crate::{ConfigError, ConfigResult};

/// Parses every domain string into a target, failing on the first bad one
///
/// An empty list is a configuration error as well, so a run never starts
/// without something to crawl.
pub fn parse_targets<S: AsRef<str>>(domains: &[S]) -> ConfigResult<Vec<DomainTarget>> {
    if domains.is_empty() {
        return Err(ConfigError::NoDomains);
    }

    domains
        .iter()
        .map(|domain| {
            DomainTarget::parse(domain.as_ref()).map_err(|source| ConfigError::InvalidDomain {
                domain: domain.as_ref().to_string(),
                source,
            })
        })
        .collect()
}
