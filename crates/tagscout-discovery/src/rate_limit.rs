//! Navigation rate limiting.
//!
//! Two gates guard every listing navigation and both must pass:
//!
//! - **Quota**: at most `max_requests` navigations per `window`. Once the
//!   ceiling is hit, the next navigation waits until the window that began
//!   with the first counted request has fully elapsed. A gap longer than
//!   `window` since the previous navigation resets the count.
//! - **Spacing**: consecutive navigations are at least `min_interval` apart.
//!
//! [`RateLimiter::reserve`] is the pure transition: given "now" it returns
//! how long the caller must wait and advances the state as if that wait
//! happened. [`RateLimiter::acquire`] applies it with a real sleep.
//!
//! | Policy default | Value |
//! |----------------|-------|
//! | `max_requests` | 3     |
//! | `window`       | 60 s  |
//! | `min_interval` | 15 s  |

use std::time::Duration;

use tagscout_core::AppConfig;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
    pub min_interval: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_requests: 3,
            window: Duration::from_secs(60),
            min_interval: Duration::from_secs(15),
        }
    }
}

impl RateLimitPolicy {
    /// Quota and spacing from the environment; the window stays one minute.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_requests: config.max_requests_per_minute,
            window: Duration::from_secs(60),
            min_interval: Duration::from_secs(config.min_request_interval_secs),
        }
    }
}

/// Per-session limiter state. Not shared across sessions and never
/// persisted.
#[derive(Debug)]
pub struct RateLimiter {
    policy: RateLimitPolicy,
    count: u32,
    window_start: Option<Instant>,
    last_request: Option<Instant>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            count: 0,
            window_start: None,
            last_request: None,
        }
    }

    /// Requests counted in the current window.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Reserves the next request slot at or after `now` and returns how long
    /// the caller must wait before issuing it.
    pub fn reserve(&mut self, now: Instant) -> Duration {
        let mut ready_at = now;

        if let Some(last) = self.last_request {
            if now.saturating_duration_since(last) > self.policy.window {
                self.reset_window();
            }
        }

        if self.count >= self.policy.max_requests {
            if let Some(start) = self.window_start {
                ready_at = ready_at.max(start + self.policy.window);
            }
            self.reset_window();
        }

        if let Some(last) = self.last_request {
            ready_at = ready_at.max(last + self.policy.min_interval);
        }

        self.count += 1;
        self.window_start.get_or_insert(ready_at);
        self.last_request = Some(ready_at);

        ready_at.saturating_duration_since(now)
    }

    /// Waits until the next request is allowed, then records it.
    pub async fn acquire(&mut self) {
        let wait = self.reserve(Instant::now());
        if wait.is_zero() {
            return;
        }

        tracing::info!(
            wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
            requests_in_window = self.count,
            "rate limit reached; waiting before next navigation"
        );
        tokio::time::sleep(wait).await;
    }

    fn reset_window(&mut self) {
        self.count = 0;
        self.window_start = None;
    }
}
