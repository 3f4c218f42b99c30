//! Single-hashtag crawl over one rendering session.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tagscout_core::{AppConfig, CrawlResult, CreatorRecord};
use tokio::time::Instant;

use crate::error::{DiscoveryError, RenderError};
use crate::estimate::Heuristics;
use crate::extract::{extract_post, Extraction, ExtractionProfile};
use crate::pacing::{pause, Pacing};
use crate::rate_limit::{RateLimitPolicy, RateLimiter};
use crate::render::PageRenderer;

const NO_CONTENT_ERROR: &str = "Could not find video elements on page";

/// Underscores are legal in hashtags and left readable in the URL.
const TAG_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    /// Platform origin, e.g. `https://www.tiktok.com`.
    pub base_url: String,
    pub navigation_timeout: Duration,
    /// Applied to each content marker separately.
    pub marker_timeout: Duration,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.tiktok.com".to_owned(),
            navigation_timeout: Duration::from_secs(30),
            marker_timeout: Duration::from_secs(10),
        }
    }
}

impl CrawlSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.platform_base_url.clone(),
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
            marker_timeout: Duration::from_secs(config.marker_timeout_secs),
        }
    }

    /// Listing URL for an already-normalized hashtag.
    #[must_use]
    pub fn listing_url(&self, hashtag: &str) -> String {
        format!(
            "{}/tag/{}",
            self.base_url.trim_end_matches('/'),
            utf8_percent_encode(hashtag, TAG_SEGMENT)
        )
    }
}

/// Trims whitespace and a leading `#`. Returns `None` when nothing is left.
#[must_use]
pub fn normalize_hashtag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let tag = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
    (!tag.is_empty()).then(|| tag.to_owned())
}

/// Crawls hashtag listings through one exclusively owned renderer.
///
/// Navigations go through a [`RateLimiter`] that lives as long as the
/// crawler, so quota and spacing carry over between hashtags of one run.
pub struct HashtagCrawler<R> {
    renderer: R,
    limiter: RateLimiter,
    profile: ExtractionProfile,
    heuristics: Heuristics,
    settings: CrawlSettings,
    pacing: Pacing,
}

impl<R: PageRenderer> HashtagCrawler<R> {
    #[must_use]
    pub fn new(renderer: R, settings: CrawlSettings) -> Self {
        Self {
            renderer,
            limiter: RateLimiter::new(RateLimitPolicy::default()),
            profile: ExtractionProfile::default(),
            heuristics: Heuristics::default(),
            settings,
            pacing: Pacing::default(),
        }
    }

    #[must_use]
    pub fn with_rate_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.limiter = RateLimiter::new(policy);
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: ExtractionProfile) -> Self {
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Crawls one hashtag listing and extracts up to `max_posts` posts.
    ///
    /// Page-level problems (navigation failure, no content markers, element
    /// listing failure) are recorded in the returned result's `errors`.
    /// Per-element failures are recorded as `Error processing video {n}`
    /// and do not stop the remaining elements.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidHashtag`] when `hashtag` is blank,
    /// and [`DiscoveryError::Render`] when the rendering session is lost
    /// before any element was read.
    pub async fn crawl(
        &mut self,
        hashtag: &str,
        max_posts: usize,
    ) -> Result<CrawlResult, DiscoveryError> {
        let started = Instant::now();
        let tag = normalize_hashtag(hashtag)
            .ok_or_else(|| DiscoveryError::InvalidHashtag(hashtag.to_owned()))?;
        let url = self.settings.listing_url(&tag);

        self.limiter.acquire().await;
        tracing::info!(hashtag = %tag, %url, max_posts, "crawling hashtag listing");

        if let Err(e) = self
            .renderer
            .navigate(&url, self.settings.navigation_timeout)
            .await
        {
            return page_failure(e, started);
        }

        pause(self.pacing.settle.sample(), "settle").await;

        if !self.wait_for_content().await? {
            tracing::warn!(hashtag = %tag, "no content markers appeared");
            return Ok(CrawlResult::failed(NO_CONTENT_ERROR, elapsed_ms(started)));
        }

        let mut elements = match self.renderer.query_all(&self.profile.post_items).await {
            Ok(elements) => elements,
            Err(e) => return page_failure(e, started),
        };
        tracing::debug!(hashtag = %tag, found = elements.len(), "post elements found");
        elements.truncate(max_posts);

        let mut posts = Vec::with_capacity(elements.len());
        let mut creators = Vec::new();
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (index, element) in elements.iter().enumerate() {
            if index > 0 {
                pause(self.pacing.between_posts.sample(), "between posts").await;
            }

            match extract_post(element, &self.profile, &self.heuristics, Utc::now()).await {
                Extraction::Record(post) => {
                    if seen.insert(post.handle().to_owned()) {
                        creators.push(CreatorRecord::discovered(
                            post.handle(),
                            self.profile.platform,
                            post.estimated_followers(),
                            post.timestamp(),
                        ));
                    }
                    tracing::debug!(hashtag = %tag, handle = post.handle(), "post extracted");
                    posts.push(post);
                }
                Extraction::NotExtractable => {
                    tracing::debug!(hashtag = %tag, position = index + 1, "element has no handle");
                }
                Extraction::Failed(e) => {
                    tracing::warn!(hashtag = %tag, position = index + 1, error = %e, "element extraction failed");
                    errors.push(format!("Error processing video {}: {e}", index + 1));
                    if e.is_session_lost() {
                        break;
                    }
                }
            }
        }

        tracing::info!(
            hashtag = %tag,
            posts = posts.len(),
            creators = creators.len(),
            errors = errors.len(),
            "hashtag crawl complete"
        );
        Ok(CrawlResult::from_parts(
            posts,
            creators,
            errors,
            elapsed_ms(started),
        ))
    }

    /// `true` once any content marker shows up.
    async fn wait_for_content(&mut self) -> Result<bool, DiscoveryError> {
        for marker in &self.profile.content_markers {
            match self
                .renderer
                .wait_for_selector(marker, self.settings.marker_timeout)
                .await
            {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(e) if e.is_session_lost() => return Err(e.into()),
                Err(e) => {
                    tracing::debug!(marker = marker.as_str(), error = %e, "marker wait failed");
                }
            }
        }
        Ok(false)
    }
}

fn page_failure(error: RenderError, started: Instant) -> Result<CrawlResult, DiscoveryError> {
    if error.is_session_lost() {
        return Err(error.into());
    }
    tracing::warn!(error = %error, "hashtag listing unavailable");
    Ok(CrawlResult::failed(
        format!("Hashtag scraping error: {error}"),
        elapsed_ms(started),
    ))
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "crawler_test.rs"]
mod tests;
