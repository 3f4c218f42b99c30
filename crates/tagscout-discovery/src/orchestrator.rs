//! Multi-hashtag discovery run.

use std::time::Duration;

use tagscout_core::CrawlResult;
use tokio::time::Instant;

use crate::crawler::{elapsed_ms, HashtagCrawler};
use crate::pacing::pause;
use crate::render::PageRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Upper bound on post elements read per hashtag.
    pub max_posts: usize,
    /// Whole-run budget, checked between hashtags only. A crawl already in
    /// progress is never interrupted.
    pub deadline: Option<Duration>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_posts: 8,
            deadline: None,
        }
    }
}

/// Crawls `hashtags` strictly in order and merges the results.
///
/// A hashtag that fails outright is recorded as
/// `Error processing hashtag {tag}: ...` and the run moves on. Between
/// hashtags the crawler's cool-down applies, growing with each hashtag.
/// Creators are deduplicated by handle across the whole run, keeping the
/// first-seen record.
pub async fn discover<R, S>(
    crawler: &mut HashtagCrawler<R>,
    hashtags: &[S],
    options: DiscoveryOptions,
) -> CrawlResult
where
    R: PageRenderer,
    S: AsRef<str>,
{
    let run_started = Instant::now();
    let total = hashtags.len();
    let mut parts = Vec::with_capacity(total);

    tracing::info!(hashtags = total, max_posts = options.max_posts, "starting discovery run");

    for (index, hashtag) in hashtags.iter().enumerate() {
        let hashtag = hashtag.as_ref();

        if deadline_reached(run_started, options.deadline) {
            parts.push(deadline_skip(total - index));
            break;
        }

        let crawl_started = Instant::now();
        match crawler.crawl(hashtag, options.max_posts).await {
            Ok(result) => parts.push(result),
            Err(e) => {
                tracing::warn!(hashtag, error = %e, "hashtag crawl failed");
                parts.push(CrawlResult::failed(
                    format!("Error processing hashtag {hashtag}: {e}"),
                    elapsed_ms(crawl_started),
                ));
            }
        }

        let remaining = total - index - 1;
        if remaining == 0 {
            break;
        }
        if deadline_reached(run_started, options.deadline) {
            parts.push(deadline_skip(remaining));
            break;
        }
        pause(crawler.pacing().cooldown(index), "hashtag cool-down").await;
    }

    let merged = CrawlResult::merge(parts);
    tracing::info!(
        posts = merged.stats.total_scraped,
        creators = merged.stats.qualified,
        duplicates = merged.stats.duplicates,
        errors = merged.errors.len(),
        elapsed_secs = run_started.elapsed().as_secs(),
        "discovery run complete"
    );
    merged
}

fn deadline_reached(started: Instant, deadline: Option<Duration>) -> bool {
    deadline.is_some_and(|limit| started.elapsed() >= limit)
}

fn deadline_skip(skipped: usize) -> CrawlResult {
    tracing::warn!(skipped, "discovery deadline reached");
    CrawlResult::failed(
        format!("Discovery deadline reached; skipped {skipped} remaining hashtag(s)"),
        0,
    )
}
