//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `EngineState`: lifecycle of a domain crawl engine (init, robots loaded, crawling, done)
//! - `CrawlFrontier`: visited set, discovered products and page cache owned by one engine

mod engine_state;
mod frontier;

// Re-export main types
pub use engine_state::EngineState;
pub use frontier::{CrawlFrontier, PageCache};
