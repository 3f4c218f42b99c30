//! Per-hashtag and per-run crawl results.
//!
//! A hashtag crawl produces a [`CrawlResult`] whose creators are already
//! unique within that hashtag. A run merges those results with
//! [`CrawlResult::merge`], which deduplicates creators across hashtags and
//! recomputes the stats block.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::creators::CreatorRecord;
use crate::posts::PostRecord;

/// Summary counters for a [`CrawlResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStats {
    pub total_scraped: usize,
    /// Number of unique creators in the result.
    pub qualified: usize,
    /// Creators dropped by deduplication.
    pub duplicates: usize,
    #[serde(rename = "timeElapsed")]
    pub time_elapsed_ms: u64,
}

/// The boundary artifact of discovery: posts, creators, accumulated error
/// messages and stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub creators: Vec<CreatorRecord>,
    pub posts: Vec<PostRecord>,
    pub errors: Vec<String>,
    pub stats: CrawlStats,
}

impl CrawlResult {
    /// Builds a single-hashtag result. `creators` must already be unique by
    /// handle, so `duplicates` is zero.
    #[must_use]
    pub fn from_parts(
        posts: Vec<PostRecord>,
        creators: Vec<CreatorRecord>,
        errors: Vec<String>,
        time_elapsed_ms: u64,
    ) -> Self {
        let stats = CrawlStats {
            total_scraped: posts.len(),
            qualified: creators.len(),
            duplicates: 0,
            time_elapsed_ms,
        };
        Self {
            creators,
            posts,
            errors,
            stats,
        }
    }

    /// A result carrying nothing but one error message.
    #[must_use]
    pub fn failed(error: impl Into<String>, time_elapsed_ms: u64) -> Self {
        Self::from_parts(Vec::new(), Vec::new(), vec![error.into()], time_elapsed_ms)
    }

    /// Merges results in order: posts and errors are concatenated, elapsed
    /// time is summed, and creators are deduplicated by handle keeping the
    /// first-seen record (and therefore its follower estimate).
    #[must_use]
    pub fn merge(parts: impl IntoIterator<Item = CrawlResult>) -> Self {
        let mut posts = Vec::new();
        let mut errors = Vec::new();
        let mut all_creators = Vec::new();
        let mut time_elapsed_ms = 0u64;

        for part in parts {
            posts.extend(part.posts);
            errors.extend(part.errors);
            all_creators.extend(part.creators);
            time_elapsed_ms = time_elapsed_ms.saturating_add(part.stats.time_elapsed_ms);
        }

        let discovered = all_creators.len();
        let creators = dedup_by_handle(all_creators);

        let stats = CrawlStats {
            total_scraped: posts.len(),
            qualified: creators.len(),
            duplicates: discovered - creators.len(),
            time_elapsed_ms,
        };

        Self {
            creators,
            posts,
            errors,
            stats,
        }
    }
}

fn dedup_by_handle(creators: Vec<CreatorRecord>) -> Vec<CreatorRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(creators.len());
    creators
        .into_iter()
        .filter(|c| seen.insert(c.handle.clone()))
        .collect()
}

#[cfg(test)]
#[path = "results_test.rs"]
mod tests;
