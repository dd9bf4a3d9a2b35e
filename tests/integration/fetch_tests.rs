//! Integration tests for page and robots.txt fetching
//!
//! These tests drive the fetcher and robots resolution against wiremock
//! servers to check retry, caching and header behavior.

use product_scout::config::CrawlerConfig;
use product_scout::crawler::{build_http_client, FetchSettings, Fetcher};
use product_scout::robots::fetch_robots;
use product_scout::state::PageCache;
use product_scout::url::DomainTarget;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config() -> CrawlerConfig {
    CrawlerConfig {
        request_timeout: 2,
        robots_timeout: 2,
        min_delay_ms: 0,
        max_delay_ms: 0,
        network_retry_delay_ms: 0,
        fallback_user_agent: "TestBot/1.0".to_string(),
        ..CrawlerConfig::default()
    }
}

fn create_fetcher(user_agent: &str) -> Fetcher {
    create_fetcher_with(fast_config(), user_agent)
}

fn create_fetcher_with(config: CrawlerConfig, user_agent: &str) -> Fetcher {
    let client = build_http_client(&config).expect("Failed to build client");
    Fetcher::new(client, user_agent, FetchSettings::from_config(&config))
}

#[tokio::test]
async fn test_retry_after_429_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_fetcher("*");
    let mut cache = PageCache::new();
    let url = format!("{}/busy", mock_server.uri());

    let started = Instant::now();
    let body = fetcher.fetch(&url, &mut cache).await;

    assert_eq!(body.as_deref(), Some("finally"));
    assert!(started.elapsed() >= Duration::from_secs(4));
    assert_eq!(cache.get(&url).map(String::as_str), Some("finally"));
}

#[tokio::test]
async fn test_429_exhausts_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let fetcher = create_fetcher("*");
    let mut cache = PageCache::new();
    let url = format!("{}/busy", mock_server.uri());

    assert!(fetcher.fetch(&url, &mut cache).await.is_none());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_timeouts_exhaust_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = CrawlerConfig {
        request_timeout: 1,
        ..fast_config()
    };
    let fetcher = create_fetcher_with(config, "*");
    let mut cache = PageCache::new();
    let url = format!("{}/slow", mock_server.uri());

    let started = Instant::now();
    assert!(fetcher.fetch(&url, &mut cache).await.is_none());
    assert!(started.elapsed() >= Duration::from_secs(3));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_timeout_then_success_recovers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = CrawlerConfig {
        request_timeout: 1,
        ..fast_config()
    };
    let fetcher = create_fetcher_with(config, "*");
    let mut cache = PageCache::new();
    let url = format!("{}/slow", mock_server.uri());

    assert_eq!(
        fetcher.fetch(&url, &mut cache).await.as_deref(),
        Some("recovered")
    );
}

#[tokio::test]
async fn test_non_200_gives_up_immediately() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_fetcher("*");
    let mut cache = PageCache::new();
    let url = format!("{}/missing", mock_server.uri());

    assert!(fetcher.fetch(&url, &mut cache).await.is_none());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
        .mount(&mock_server)
        .await;

    let fetcher = create_fetcher("*");
    let mut cache = PageCache::new();
    let url = format!("{}/old", mock_server.uri());

    assert_eq!(fetcher.fetch(&url, &mut cache).await.as_deref(), Some("moved"));
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", "Googlebot"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_fetcher("Googlebot");
    let mut cache = PageCache::new();
    let url = format!("{}/page", mock_server.uri());

    assert_eq!(fetcher.fetch(&url, &mut cache).await.as_deref(), Some("hello"));
}

#[tokio::test]
async fn test_second_fetch_served_from_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_fetcher("TestBot/1.0");
    let mut cache = PageCache::new();
    let url = format!("{}/page", mock_server.uri());

    assert_eq!(fetcher.fetch(&url, &mut cache).await.as_deref(), Some("hello"));
    assert_eq!(fetcher.fetch(&url, &mut cache).await.as_deref(), Some("hello"));
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let fetcher = create_fetcher("*");
    let mut cache = PageCache::new();
    let url = format!("{}/flaky", mock_server.uri());

    assert!(fetcher.fetch(&url, &mut cache).await.is_none());
    assert!(fetcher.fetch(&url, &mut cache).await.is_none());
}

#[tokio::test]
async fn test_robots_wildcard_group_applies_rules() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /checkout"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = fast_config();
    let client = build_http_client(&config).unwrap();
    let target = DomainTarget::parse(&mock_server.uri()).unwrap();

    let policy = fetch_robots(&client, &target, &config).await;

    assert_eq!(policy.effective_user_agent(), "*");
    assert!(policy.has_rules());
    assert!(!policy.can_fetch(&format!("{}/checkout", mock_server.uri())));
    assert!(policy.can_fetch(&format!("{}/p/1234567", mock_server.uri())));
}

#[tokio::test]
async fn test_robots_named_agent_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: Bingbot\nDisallow: /"))
        .mount(&mock_server)
        .await;

    let config = fast_config();
    let client = build_http_client(&config).unwrap();
    let target = DomainTarget::parse(&mock_server.uri()).unwrap();

    let policy = fetch_robots(&client, &target, &config).await;

    assert_eq!(policy.effective_user_agent(), "Bingbot");
    assert!(!policy.has_rules());
    assert!(policy.can_fetch(&format!("{}/anything", mock_server.uri())));
}

#[tokio::test]
async fn test_robots_missing_allows_everything() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = fast_config();
    let client = build_http_client(&config).unwrap();
    let target = DomainTarget::parse(&mock_server.uri()).unwrap();

    let policy = fetch_robots(&client, &target, &config).await;

    assert_eq!(policy.effective_user_agent(), "*");
    assert!(!policy.has_rules());
    assert!(policy.can_fetch(&format!("{}/admin", mock_server.uri())));
}
