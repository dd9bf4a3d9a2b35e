//! HTML link extraction
//!
//! Parsing is best-effort: html5ever recovers from malformed markup, so any
//! input yields some (possibly empty) list of links.

use scraper::{Html, Selector};
use url::Url;

/// Extracts every `<a href>` on a page as an absolute URL, in document order
///
/// No filtering happens here beyond dropping hrefs that cannot be resolved
/// against `base_url`; same-site and product checks belong to the engine.
///
/// # Example
///
/// ```
/// use product_scout::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/p/1234567">Widget</a></body></html>"#;
/// let base_url = Url::parse("https://shop.example/").unwrap();
/// let links = extract_links(&base_url, html);
/// assert_eq!(links[0].as_str(), "https://shop.example/p/1234567");
/// ```
pub fn extract_links(base_url: &Url, html: &str) -> Vec<Url> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves an href against the page URL
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    match base_url.join(href.trim()) {
        Ok(absolute_url) => Some(absolute_url),
        Err(e) => {
            tracing::debug!("Unresolvable href {:?} on {}: {}", href, base_url, e);
            None
        }
    }
}
