//! Post extraction from a rendered listing element.
//!
//! The platform's markup drifts between releases, so every field is read
//! through an ordered list of selectors kept as data in
//! [`ExtractionProfile`]. The first selector that yields non-empty text wins.
//! Adding a new markup variant means appending a selector, not adding a
//! branch.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use tagscout_core::{EngagementCounts, Platform, PostRecord};

use crate::error::RenderError;
use crate::estimate::{estimate_followers, estimate_plays, Heuristics};
use crate::metrics::parse_metric;
use crate::render::PageElement;

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"));

/// Selectors describing one platform's listing markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionProfile {
    pub platform: Platform,
    /// Alternative "content loaded" markers, tried in order.
    pub content_markers: Vec<String>,
    /// Selector matching every post element on the listing page.
    pub post_items: String,
    pub handle: Vec<String>,
    pub description: Vec<String>,
    pub likes: Vec<String>,
    pub comments: Vec<String>,
    pub shares: Vec<String>,
}

impl ExtractionProfile {
    /// Selectors for TikTok's `/tag/{hashtag}` listing page.
    #[must_use]
    pub fn tiktok() -> Self {
        Self {
            platform: Platform::Tiktok,
            content_markers: vec![
                r#"[data-e2e="challenge-item"]"#.to_owned(),
                r#"div[data-e2e="recommend-list-item-container"]"#.to_owned(),
            ],
            post_items: r#"div[data-e2e="recommend-list-item-container"], [data-e2e="challenge-item"]"#
                .to_owned(),
            handle: vec![
                r#"a[data-e2e="video-author-uniqueid"]"#.to_owned(),
                r#"span[data-e2e="video-author-uniqueid"]"#.to_owned(),
                r#"a[href*="/@"]"#.to_owned(),
                r#"span[data-e2e="video-author-name"]"#.to_owned(),
            ],
            description: vec![
                r#"div[data-e2e="video-desc"] span"#.to_owned(),
                r#"span[data-e2e="video-desc"]"#.to_owned(),
                r#"div[data-e2e="video-desc"]"#.to_owned(),
            ],
            likes: metric_selectors("like"),
            comments: metric_selectors("comment"),
            shares: metric_selectors("share"),
        }
    }
}

impl Default for ExtractionProfile {
    fn default() -> Self {
        Self::tiktok()
    }
}

fn metric_selectors(metric: &str) -> Vec<String> {
    vec![
        format!(r#"strong[data-e2e="video-{metric}-count"]"#),
        format!(r#"span[data-e2e="video-{metric}-count"]"#),
        format!(r#"[data-e2e="video-{metric}-count"]"#),
    ]
}

/// Outcome of reading one post element.
#[derive(Debug)]
pub enum Extraction {
    Record(PostRecord),
    /// No handle could be read. Expected for sponsored or non-standard
    /// tiles; not an error.
    NotExtractable,
    /// The element stopped being readable mid-extraction.
    Failed(RenderError),
}

/// Reads one post element into a [`PostRecord`].
///
/// Individual lookups that fail or come back empty are treated as absent
/// fields. Only a missing handle voids the record, and only an
/// element-fatal [`RenderError`] (see [`RenderError::is_element_fatal`])
/// produces [`Extraction::Failed`].
pub async fn extract_post<E: PageElement>(
    element: &E,
    profile: &ExtractionProfile,
    heuristics: &Heuristics,
    captured_at: DateTime<Utc>,
) -> Extraction {
    match read_post(element, profile, heuristics, captured_at).await {
        Ok(Some(post)) => Extraction::Record(post),
        Ok(None) => Extraction::NotExtractable,
        Err(e) => Extraction::Failed(e),
    }
}

async fn read_post<E: PageElement>(
    element: &E,
    profile: &ExtractionProfile,
    heuristics: &Heuristics,
    captured_at: DateTime<Utc>,
) -> Result<Option<PostRecord>, RenderError> {
    let Some(handle) = first_handle(element, &profile.handle).await? else {
        return Ok(None);
    };

    let description = first_text(element, &profile.description)
        .await?
        .unwrap_or_default();
    let hashtags = parse_hashtags(&description);

    let counts = EngagementCounts {
        likes: read_metric(element, &profile.likes).await?,
        comments: read_metric(element, &profile.comments).await?,
        shares: read_metric(element, &profile.shares).await?,
    };

    let plays = estimate_plays(counts.likes, heuristics);
    let estimated_followers = estimate_followers(counts, heuristics);

    // `first_handle` never returns an empty handle, so capture cannot fail
    // here; treat the impossible case as "not extractable" all the same.
    Ok(PostRecord::capture(
        profile.platform,
        &handle,
        description,
        hashtags,
        counts,
        plays,
        estimated_followers,
        captured_at,
    )
    .ok())
}

/// Extracts `#hashtag` tokens from free text in order of first appearance,
/// without the leading `#`.
#[must_use]
pub fn parse_hashtags(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    HASHTAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

async fn first_handle<E: PageElement>(
    element: &E,
    selectors: &[String],
) -> Result<Option<String>, RenderError> {
    for selector in selectors {
        if let Some(text) = lookup_text(element, selector).await? {
            let handle = text.strip_prefix('@').unwrap_or(&text).trim();
            if !handle.is_empty() {
                return Ok(Some(handle.to_owned()));
            }
        }
    }
    Ok(None)
}

async fn first_text<E: PageElement>(
    element: &E,
    selectors: &[String],
) -> Result<Option<String>, RenderError> {
    for selector in selectors {
        if let Some(text) = lookup_text(element, selector).await? {
            return Ok(Some(text));
        }
    }
    Ok(None)
}

async fn read_metric<E: PageElement>(
    element: &E,
    selectors: &[String],
) -> Result<u64, RenderError> {
    Ok(first_text(element, selectors)
        .await?
        .map_or(0, |text| parse_metric(&text)))
}

/// Trimmed, non-empty text of the first node matching `selector`.
///
/// Lookup errors that leave the element readable are swallowed as "absent";
/// element-fatal errors propagate.
async fn lookup_text<E: PageElement>(
    element: &E,
    selector: &str,
) -> Result<Option<String>, RenderError> {
    let node = match element.query_selector(selector).await {
        Ok(Some(node)) => node,
        Ok(None) => return Ok(None),
        Err(e) if e.is_element_fatal() => return Err(e),
        Err(e) => {
            tracing::debug!(selector, error = %e, "selector lookup failed; treating as absent");
            return Ok(None);
        }
    };

    match node.text_content().await {
        Ok(text) => Ok(text
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())),
        Err(e) if e.is_element_fatal() => Err(e),
        Err(e) => {
            tracing::debug!(selector, error = %e, "text read failed; treating as absent");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
