//! Output module for run reports
//!
//! This module handles:
//! - Collecting per-domain results and failures of a run
//! - Generating a markdown summary of the run

mod markdown;
mod report;

pub use markdown::{format_markdown_summary, write_markdown_summary};
pub use report::{CrawlReport, FailedDomain, OutputError, OutputResult};
