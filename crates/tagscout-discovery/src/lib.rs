//! Hashtag-driven creator discovery.
//!
//! The pipeline runs leaves-first: [`metrics`] parses display counts,
//! [`estimate`] turns engagement into follower estimates, [`extract`] reads
//! one rendered post, [`crawler`] drives a single hashtag listing behind the
//! [`rate_limit`] gate, and [`orchestrator`] walks a list of hashtags and
//! merges the results. Page rendering is abstracted by [`render`].

pub mod crawler;
pub mod error;
pub mod estimate;
pub mod extract;
pub mod metrics;
pub mod orchestrator;
pub mod pacing;
pub mod rate_limit;
pub mod render;

#[cfg(test)]
mod testing;

pub use crawler::{normalize_hashtag, CrawlSettings, HashtagCrawler};
pub use error::{DiscoveryError, RenderError};
pub use estimate::{estimate_followers, estimate_plays, Heuristics};
pub use extract::{extract_post, parse_hashtags, Extraction, ExtractionProfile};
pub use metrics::parse_metric;
pub use orchestrator::{discover, DiscoveryOptions};
pub use pacing::{DelayRange, Pacing};
pub use rate_limit::{RateLimitPolicy, RateLimiter};
pub use render::{PageElement, PageRenderer};
