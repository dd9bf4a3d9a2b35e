/// Lifecycle states of a domain crawl engine
///
/// An engine moves strictly forward: `Init -> RobotsLoaded -> Crawling -> Done`.
use std::fmt;

/// Represents the current stage of a domain crawl engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Constructed from a domain target; frontier empty
    Init,

    /// Robots policy resolved; ready to traverse
    RobotsLoaded,

    /// Depth-first traversal in progress
    Crawling,

    /// Traversal complete; result available
    Done,
}

impl EngineState {
    /// Checks whether moving to `next` is a legal step
    pub fn can_transition_to(&self, next: EngineState) -> bool {
        matches!(
            (self, next),
            (Self::Init, Self::RobotsLoaded)
                | (Self::RobotsLoaded, Self::Crawling)
                | (Self::Crawling, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::RobotsLoaded => "robots_loaded",
            Self::Crawling => "crawling",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
