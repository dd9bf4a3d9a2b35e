use crate::url::domain::{authority_of, DomainTarget};
use url::Url;

/// Checks whether a link belongs to the target's site
///
/// The check is substring containment of the target authority within the
/// link's authority, so subdomains (`m.shop.example`) are included. This also
/// admits unrelated hosts that merely contain the target host
/// (`shop.example.evil.test`).
///
/// # Examples
///
/// ```
/// use product_scout::url::{is_same_site, DomainTarget};
/// use url::Url;
///
/// let target = DomainTarget::parse("shop.example").unwrap();
/// assert!(is_same_site(&target, &Url::parse("https://m.shop.example/x").unwrap()));
/// assert!(!is_same_site(&target, &Url::parse("https://other.example/").unwrap()));
/// ```
pub fn is_same_site(target: &DomainTarget, link: &Url) -> bool {
    match authority_of(link) {
        Some(authority) => authority.contains(target.authority()),
        None => false,
    }
}
