//! Discovery command handlers for the CLI.
//!
//! Called from `main` after config and logging are set up. Each handler
//! builds a Browserless-backed renderer from [`AppConfig`], runs the
//! pipeline, and leaves presentation of the result to [`write_output`].

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use tagscout_browserless::{BrowserlessClient, BrowserlessRenderer};
use tagscout_core::{AppConfig, CrawlResult};
use tagscout_discovery::{
    discover, normalize_hashtag, CrawlSettings, DiscoveryOptions, ExtractionProfile,
    HashtagCrawler, RateLimitPolicy,
};

const QUICK_TEST_MAX_POSTS: usize = 5;

/// One discovery run as requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunRequest {
    pub hashtags: Vec<String>,
    pub max_posts: usize,
    pub headless: bool,
}

impl RunRequest {
    /// Single hashtag, small post budget, visible browser.
    pub(crate) fn quick_test(hashtag: &str) -> anyhow::Result<Self> {
        Ok(Self {
            hashtags: clean_hashtags(&[hashtag.to_owned()])?,
            max_posts: QUICK_TEST_MAX_POSTS,
            headless: false,
        })
    }
}

/// Normalizes user-supplied hashtags: trims, strips a leading `#`, drops
/// blanks and repeats (first occurrence wins).
///
/// # Errors
///
/// Returns an error when no usable hashtag remains.
pub(crate) fn clean_hashtags(raw: &[String]) -> anyhow::Result<Vec<String>> {
    let mut seen = HashSet::new();
    let hashtags: Vec<String> = raw
        .iter()
        .filter_map(|tag| normalize_hashtag(tag))
        .filter(|tag| seen.insert(tag.clone()))
        .collect();

    if hashtags.is_empty() {
        anyhow::bail!("no hashtags provided");
    }
    Ok(hashtags)
}

/// Runs discovery over every requested hashtag.
///
/// # Errors
///
/// Returns an error only if the Browserless client cannot be built. Crawl
/// failures are reported inside the returned result's `errors`.
pub(crate) async fn run_discover(
    config: &AppConfig,
    request: &RunRequest,
) -> anyhow::Result<CrawlResult> {
    let client = BrowserlessClient::from_config(config, request.headless)
        .map_err(|e| anyhow::anyhow!("failed to build Browserless client: {e}"))?;
    let settings = CrawlSettings::from_config(config);
    let profile = ExtractionProfile::default();
    let renderer = BrowserlessRenderer::new(client)
        .wait_until_any(&profile.content_markers, settings.marker_timeout);
    let mut crawler = HashtagCrawler::new(renderer, settings)
        .with_profile(profile)
        .with_rate_limit(RateLimitPolicy::from_config(config));

    let options = DiscoveryOptions {
        max_posts: request.max_posts,
        deadline: config.run_timeout_secs.map(Duration::from_secs),
    };

    tracing::info!(
        hashtags = ?request.hashtags,
        max_posts = request.max_posts,
        headless = request.headless,
        "running discovery"
    );
    Ok(discover(&mut crawler, request.hashtags.as_slice(), options).await)
}

/// Verifies that Browserless answers and reports a browser.
///
/// # Errors
///
/// Returns an error when the client cannot be built or the instance is not
/// ready, so the process exits non-zero.
pub(crate) async fn run_check(config: &AppConfig) -> anyhow::Result<()> {
    let client = BrowserlessClient::from_config(config, true)
        .map_err(|e| anyhow::anyhow!("failed to build Browserless client: {e}"))?;

    match client.version().await {
        Ok(browser) => {
            println!("Browserless ready at {} ({browser})", config.browserless_url);
            Ok(())
        }
        Err(e) => {
            println!("Browserless not ready at {}", config.browserless_url);
            Err(anyhow::anyhow!("rendering backend check failed: {e}"))
        }
    }
}

/// Pretty-printed JSON of `result`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn render_json(result: &CrawlResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Writes the JSON result to `output`, or to stdout when `None`.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub(crate) fn write_output(result: &CrawlResult, output: Option<&Path>) -> anyhow::Result<()> {
    let json = render_json(result)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), "discovery result written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
