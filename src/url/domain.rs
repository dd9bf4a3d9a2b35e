use crate::{UrlError, UrlResult};
use url::Url;

/// A domain a single crawl engine is bound to
///
/// Built from a user-supplied string such as `shop.example`,
/// `https://shop.example` or `127.0.0.1:8080`. The scheme defaults to `http`
/// when absent. The original string is kept as the domain's identity in the
/// output store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTarget {
    identity: String,
    scheme: String,
    authority: String,
}

impl DomainTarget {
    /// Parses a domain string into a target
    ///
    /// # Examples
    ///
    /// ```
    /// use product_scout::url::DomainTarget;
    ///
    /// let target = DomainTarget::parse("shop.example").unwrap();
    /// assert_eq!(target.scheme(), "http");
    /// assert_eq!(target.root_url(), "http://shop.example");
    ///
    /// let target = DomainTarget::parse("https://shop.example:8443").unwrap();
    /// assert_eq!(target.authority(), "shop.example:8443");
    /// ```
    pub fn parse(input: &str) -> UrlResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(UrlError::MissingDomain);
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }

        let authority = authority_of(&url).ok_or(UrlError::MissingDomain)?;

        Ok(Self {
            identity: input.to_string(),
            scheme: url.scheme().to_string(),
            authority,
        })
    }

    /// The domain string exactly as the caller supplied it
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host plus explicit port, if any (e.g. `shop.example:8080`)
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// `{scheme}://{authority}`, where the crawl starts at depth 0
    pub fn root_url(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }

    /// `{scheme}://{authority}/robots.txt`
    pub fn robots_url(&self) -> String {
        format!("{}/robots.txt", self.root_url())
    }
}

/// Returns the lowercase host of a URL together with its explicit port
///
/// Default ports are omitted by the `url` crate, so `http://a.example:80/`
/// yields `a.example`.
pub fn authority_of(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}
