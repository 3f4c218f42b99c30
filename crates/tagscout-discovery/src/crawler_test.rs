use super::*;
use crate::pacing::DelayRange;
use crate::testing::{FakeElement, FakePage, FakeRenderer};

const SUN_URL: &str = "https://www.tiktok.com/tag/sun";
const CHALLENGE_MARKER: &str = r#"[data-e2e="challenge-item"]"#;
const RECOMMEND_MARKER: &str = r#"div[data-e2e="recommend-list-item-container"]"#;

fn quiet_pacing() -> Pacing {
    Pacing {
        settle: DelayRange::fixed(0),
        between_posts: DelayRange::fixed(0),
        cooldown_base: Duration::ZERO,
        cooldown_step: Duration::ZERO,
    }
}

fn crawler(renderer: FakeRenderer) -> HashtagCrawler<FakeRenderer> {
    HashtagCrawler::new(renderer, CrawlSettings::default()).with_pacing(quiet_pacing())
}

fn sun_listing(elements: Vec<FakeElement>) -> FakeRenderer {
    FakeRenderer::new().with_page(SUN_URL, FakePage::listing(CHALLENGE_MARKER, elements))
}

fn handles(result: &CrawlResult) -> Vec<&str> {
    result.posts.iter().map(|p| p.handle()).collect()
}

// -----------------------------------------------------------------------
// hashtag normalization and listing URL
// -----------------------------------------------------------------------

#[test]
fn normalize_strips_hash_and_whitespace() {
    assert_eq!(normalize_hashtag("  #sun "), Some("sun".to_owned()));
    assert_eq!(normalize_hashtag("sun"), Some("sun".to_owned()));
}

#[test]
fn normalize_rejects_blank_tags() {
    assert_eq!(normalize_hashtag("   "), None);
    assert_eq!(normalize_hashtag("#"), None);
    assert_eq!(normalize_hashtag(" # "), None);
}

#[test]
fn listing_url_encodes_tag() {
    let settings = CrawlSettings::default();
    assert_eq!(settings.listing_url("day_1"), "https://www.tiktok.com/tag/day_1");
    assert_eq!(
        settings.listing_url("sun set"),
        "https://www.tiktok.com/tag/sun%20set"
    );
    assert_eq!(
        settings.listing_url("café"),
        "https://www.tiktok.com/tag/caf%C3%A9"
    );
}

#[test]
fn listing_url_tolerates_trailing_slash_in_base() {
    let settings = CrawlSettings {
        base_url: "http://localhost:9000/".to_owned(),
        ..CrawlSettings::default()
    };
    assert_eq!(settings.listing_url("sun"), "http://localhost:9000/tag/sun");
}

// -----------------------------------------------------------------------
// crawl
// -----------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn crawl_collects_posts_and_unique_creators() {
    let renderer = sun_listing(vec![
        FakeElement::post("@alice", "#sun", "10"),
        FakeElement::post("bob", "", "1K"),
        FakeElement::post("alice", "", "100"),
    ]);
    let result = crawler(renderer).crawl("#sun", 8).await.unwrap();

    assert_eq!(handles(&result), ["alice", "bob", "alice"]);
    assert_eq!(result.creators.len(), 2);
    assert_eq!(result.creators[0].handle, "alice");
    assert_eq!(result.creators[0].estimated_followers, 300);
    assert_eq!(result.creators[1].handle, "bob");
    assert!(result.errors.is_empty());
    assert_eq!(result.stats.total_scraped, 3);
    assert_eq!(result.stats.qualified, 2);
    assert_eq!(result.stats.duplicates, 0);
}

#[tokio::test(start_paused = true)]
async fn crawl_caps_elements_at_max_posts() {
    let renderer = sun_listing(vec![
        FakeElement::post("a", "", "1"),
        FakeElement::post("b", "", "1"),
        FakeElement::post("c", "", "1"),
    ]);
    let result = crawler(renderer).crawl("sun", 2).await.unwrap();
    assert_eq!(handles(&result), ["a", "b"]);
}

#[tokio::test(start_paused = true)]
async fn crawl_skips_elements_without_handle_silently() {
    let renderer = sun_listing(vec![
        FakeElement::new(),
        FakeElement::post("dana", "", "1"),
    ]);
    let result = crawler(renderer).crawl("sun", 8).await.unwrap();
    assert_eq!(handles(&result), ["dana"]);
    assert!(result.errors.is_empty());
}

#[tokio::test(start_paused = true)]
async fn element_failure_is_recorded_with_position_and_loop_continues() {
    let renderer = sun_listing(vec![
        FakeElement::post("a", "", "1"),
        FakeElement::post("b", "", "1").detached(),
        FakeElement::post("c", "", "1"),
    ]);
    let result = crawler(renderer).crawl("sun", 8).await.unwrap();
    assert_eq!(handles(&result), ["a", "c"]);
    assert_eq!(
        result.errors,
        ["Error processing video 2: element is no longer attached to the page"]
    );
}

#[tokio::test(start_paused = true)]
async fn missing_markers_yield_single_error_after_both_timeouts() {
    let renderer = FakeRenderer::new().with_page(SUN_URL, FakePage::blank());
    let result = crawler(renderer).crawl("sun", 8).await.unwrap();

    assert!(result.posts.is_empty());
    assert!(result.creators.is_empty());
    assert_eq!(result.errors, ["Could not find video elements on page"]);
    assert_eq!(result.stats.time_elapsed_ms, 20_000);
}

#[tokio::test(start_paused = true)]
async fn second_marker_is_accepted() {
    let renderer = FakeRenderer::new().with_page(
        SUN_URL,
        FakePage::listing(RECOMMEND_MARKER, vec![FakeElement::post("eve", "", "1")]),
    );
    let result = crawler(renderer).crawl("sun", 8).await.unwrap();
    assert_eq!(handles(&result), ["eve"]);
    // Only the first marker's wait timed out.
    assert_eq!(result.stats.time_elapsed_ms, 10_000);
}

#[tokio::test(start_paused = true)]
async fn navigation_failure_is_recorded_not_raised() {
    let result = crawler(FakeRenderer::new()).crawl("sun", 8).await.unwrap();
    assert!(result.posts.is_empty());
    assert_eq!(
        result.errors,
        ["Hashtag scraping error: navigate timed out after 30000ms"]
    );
}

#[tokio::test(start_paused = true)]
async fn lost_session_is_raised() {
    let renderer = FakeRenderer::new().failing(SUN_URL, || {
        RenderError::SessionClosed("browser exited".to_owned())
    });
    let err = crawler(renderer).crawl("sun", 8).await.unwrap_err();
    assert!(matches!(
        err,
        DiscoveryError::Render(RenderError::SessionClosed(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn blank_hashtag_is_rejected_before_navigation() {
    let mut crawler = crawler(FakeRenderer::new());
    let err = crawler.crawl("  # ", 8).await.unwrap_err();
    assert!(matches!(err, DiscoveryError::InvalidHashtag(_)));
    assert!(crawler.into_renderer().visits.is_empty());
}

#[tokio::test(start_paused = true)]
async fn delays_apply_after_load_and_between_elements_only() {
    let renderer = sun_listing(vec![
        FakeElement::post("a", "", "1"),
        FakeElement::post("b", "", "1"),
        FakeElement::post("c", "", "1"),
    ]);
    let pacing = Pacing {
        settle: DelayRange::fixed(3_000),
        between_posts: DelayRange::fixed(2_000),
        ..quiet_pacing()
    };
    let result = crawler(renderer)
        .with_pacing(pacing)
        .crawl("sun", 8)
        .await
        .unwrap();
    // 3s settle + two 2s gaps.
    assert_eq!(result.stats.time_elapsed_ms, 7_000);
}

#[tokio::test(start_paused = true)]
async fn consecutive_crawls_respect_request_spacing() {
    let renderer = sun_listing(vec![FakeElement::post("a", "", "1")]);
    let mut crawler = crawler(renderer);

    crawler.crawl("sun", 8).await.unwrap();
    crawler.crawl("sun", 8).await.unwrap();

    let visits = &crawler.into_renderer().visits;
    assert_eq!(visits.len(), 2);
    assert_eq!(visits[1].1 - visits[0].1, Duration::from_secs(15));
}
