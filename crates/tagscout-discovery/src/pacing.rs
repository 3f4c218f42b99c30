//! Human-like pacing between crawl steps.
//!
//! These delays are part of the crawl contract, not a tuning knob: the
//! listing pages are served behind anti-bot detection that looks for
//! machine-regular timing.

use std::time::Duration;

use rand::Rng;

/// Uniform random delay in `[min_ms, max_ms]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    #[must_use]
    pub const fn fixed(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    /// Draws one delay. A reversed range is read as `[max_ms, min_ms]`.
    #[must_use]
    pub fn sample(&self) -> Duration {
        let (lo, hi) = if self.min_ms <= self.max_ms {
            (self.min_ms, self.max_ms)
        } else {
            (self.max_ms, self.min_ms)
        };
        if lo == hi {
            return Duration::from_millis(lo);
        }
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// After a listing page loads, before looking for content.
    pub settle: DelayRange,
    /// Between consecutive post elements of one listing.
    pub between_posts: DelayRange,
    /// Cool-down after the first hashtag of a run.
    pub cooldown_base: Duration,
    /// Added to the cool-down for every further hashtag.
    pub cooldown_step: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            settle: DelayRange::new(3_000, 6_000),
            between_posts: DelayRange::new(2_000, 4_000),
            cooldown_base: Duration::from_secs(60),
            cooldown_step: Duration::from_secs(30),
        }
    }
}

impl Pacing {
    /// Cool-down after the hashtag at zero-based `index`:
    /// `cooldown_base + cooldown_step * index`.
    #[must_use]
    pub fn cooldown(&self, index: usize) -> Duration {
        let step = u32::try_from(index).unwrap_or(u32::MAX);
        self.cooldown_base
            .saturating_add(self.cooldown_step.saturating_mul(step))
    }
}

/// Sleeps for `delay`, logging it at debug level under `reason`.
pub(crate) async fn pause(delay: Duration, reason: &'static str) {
    if delay.is_zero() {
        return;
    }
    tracing::debug!(
        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        reason,
        "pausing"
    );
    tokio::time::sleep(delay).await;
}
