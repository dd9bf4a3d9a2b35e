//! Markdown summary generation
//!
//! This module renders a human-readable summary of a run: timings, per-domain
//! product counts and crawl counters, and any failed domains.

use crate::output::report::{CrawlReport, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary of `report` to `output_path`
pub fn write_markdown_summary(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run report as markdown
pub fn format_markdown_summary(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str("# Product-Scout Crawl Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    if let Some(finished) = &report.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = report.duration_seconds() {
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            duration,
            duration as f64 / 60.0
        ));
    }
    md.push_str(&format!(
        "- **Domains Completed**: {}\n",
        report.results.len()
    ));
    md.push_str(&format!("- **Domains Failed**: {}\n", report.failed.len()));
    md.push_str(&format!(
        "- **Product URLs**: {}\n\n",
        report.total_products()
    ));

    md.push_str("## Domains\n\n");
    if report.results.is_empty() {
        md.push_str("_No domains completed._\n\n");
    } else {
        md.push_str("| Domain | Products | Fetched | Failed | Robots Denied | Depth Pruned |\n");
        md.push_str("|--------|----------|---------|--------|---------------|--------------|\n");
        for (domain, urls) in &report.results {
            let stats = report.stats.get(domain).copied().unwrap_or_default();
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                domain,
                urls.len(),
                stats.pages_fetched,
                stats.pages_failed,
                stats.robots_denied,
                stats.depth_pruned
            ));
        }
        md.push('\n');
    }

    if !report.failed.is_empty() {
        md.push_str("## Failed Domains\n\n");
        for failure in &report.failed {
            md.push_str(&format!("- **{}**: {}\n", failure.domain, failure.reason));
        }
        md.push('\n');
    }

    if !report.unpersisted.is_empty() {
        md.push_str("## Not Persisted\n\n");
        for domain in &report.unpersisted {
            md.push_str(&format!("- {}\n", domain));
        }
        md.push('\n');
    }

    md
}
