//! Retry with exponential back-off and jitter for Browserless requests.
//!
//! Only failures where Browserless never started loading the page are
//! retried, so a retry never costs an extra, unmetered platform load.
//! Timeouts and server errors are reported to the crawler, which owns the
//! navigation rate limit.

use std::future::Future;
use std::time::Duration;

use crate::error::BrowserlessError;

const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** connection failures, HTTP 429 (Browserless queue full)
/// and HTTP 503 (no browser available).
///
/// **Not retriable:** timeouts, other 4xx and 5xx, bad URLs, malformed
/// bodies.
pub(crate) fn is_retriable(err: &BrowserlessError) -> bool {
    match err {
        BrowserlessError::Http(e) => e.is_connect(),
        BrowserlessError::Api { status, .. } => matches!(*status, 429 | 503),
        BrowserlessError::InvalidUrl { .. } | BrowserlessError::Deserialize { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors, sleeping `backoff_base_ms × 2^(attempt-1)` ± 25 %
/// between attempts (capped at 30 s).
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, BrowserlessError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BrowserlessError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "Browserless transient error; retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
