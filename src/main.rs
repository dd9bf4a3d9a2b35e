//! Product-Scout main entry point
//!
//! This is the command-line interface for the Product-Scout crawler.

use anyhow::Context;
use clap::Parser;
use product_scout::config::{load_config_with_hash, validate, Config};
use product_scout::output::{write_markdown_summary, CrawlReport};
use product_scout::url::parse_targets;
use product_scout::{DomainTarget, Orchestrator};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Product-Scout: a polite product-page discovery crawler
///
/// Product-Scout crawls each domain depth-first from its root, respecting
/// robots.txt and spacing out requests, and writes every URL that looks like
/// a product page into a JSON file keyed by domain.
#[derive(Parser, Debug)]
#[command(name = "product-scout")]
#[command(version = "1.0.0")]
#[command(about = "A polite product-page discovery crawler", long_about = None)]
struct Cli {
    /// Domains to crawl (overrides the configured list)
    #[arg(value_name = "DOMAIN")]
    domains: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path of the JSON product store
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Maximum link depth from each domain root
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Number of domains crawled at once
    #[arg(short, long)]
    workers: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid configuration")?;

    let domains = if cli.domains.is_empty() {
        config.targets.resolved_domains()
    } else {
        cli.domains.clone()
    };
    let targets = parse_targets(&domains).context("invalid domain list")?;

    if cli.dry_run {
        print_dry_run(&config, &targets);
        return Ok(());
    }

    let report = run_crawl(config.clone(), targets).await?;

    if let Some(summary_path) = &config.output.summary_path {
        match write_markdown_summary(&report, Path::new(summary_path)) {
            Ok(()) => tracing::info!("Summary written to: {}", summary_path),
            Err(e) => tracing::error!("Failed to write summary {}: {}", summary_path, e),
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("product_scout=info,warn"),
            1 => EnvFilter::new("product_scout=debug,info"),
            2 => EnvFilter::new("product_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line values win over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
    }
    if let Some(workers) = cli.workers {
        config.crawler.max_workers = Some(workers);
    }
}

fn print_dry_run(config: &Config, targets: &[DomainTarget]) {
    println!("=== Product-Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Workers: {}", config.crawler.worker_limit());
    println!("  Attempts per fetch: {}", config.crawler.max_attempts);
    println!(
        "  Politeness delay: {}-{}ms",
        config.crawler.min_delay_ms, config.crawler.max_delay_ms
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!(
        "  Fallback user agent: {}",
        config.crawler.fallback_user_agent
    );

    println!("\nOutput:");
    println!("  Products: {}", config.output.path);
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    println!("\nProduct Patterns ({}):", config.products.patterns.len());
    for pattern in &config.products.patterns {
        println!("  - {}", pattern);
    }

    println!("\nDomains ({}):", targets.len());
    for target in targets {
        println!("  - {} (root: {})", target.identity(), target.root_url());
    }

    println!("\n✓ Configuration is valid");
}

/// Runs the orchestrator and logs the final per-domain counts
async fn run_crawl(config: Config, targets: Vec<DomainTarget>) -> anyhow::Result<CrawlReport> {
    let orchestrator = Orchestrator::new(config).context("failed to prepare output store")?;
    let report = orchestrator.run(targets).await;

    for (domain, urls) in &report.results {
        tracing::info!("{}: {} product URLs", domain, urls.len());
    }
    for failure in &report.failed {
        tracing::warn!("{}: failed ({})", failure.domain, failure.reason);
    }
    tracing::info!(
        "Crawl finished: {} product URLs across {} domain(s)",
        report.total_products(),
        report.results.len()
    );

    Ok(report)
}
