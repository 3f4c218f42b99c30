//! [`PageRenderer`] over Browserless `/content` snapshots.
//!
//! Each navigation is exactly one `/content` render. When readiness
//! selectors are configured, Browserless is told to wait for any of them
//! before snapshotting, so the marker wait happens inside the same render.
//! Selector waits afterwards only inspect the captured snapshot and never
//! load the page again.

use std::time::Duration;

use async_trait::async_trait;
use tagscout_discovery::{PageRenderer, RenderError};

use crate::client::{BrowserlessClient, ContentRequest};
use crate::error::BrowserlessError;
use crate::html::{contains, select_all, HtmlElement};

#[derive(Debug, Clone)]
struct Snapshot {
    url: String,
    html: String,
}

/// CSS selector list plus how long Browserless may wait for it.
#[derive(Debug, Clone)]
struct ReadyWait {
    selector: String,
    timeout: Duration,
}

pub struct BrowserlessRenderer {
    client: BrowserlessClient,
    ready: Option<ReadyWait>,
    current: Option<Snapshot>,
}

impl BrowserlessRenderer {
    #[must_use]
    pub fn new(client: BrowserlessClient) -> Self {
        Self {
            client,
            ready: None,
            current: None,
        }
    }

    /// Makes every render wait until any of `selectors` is present.
    ///
    /// The selectors are sent as one selector list. A render where none of
    /// them appears within `timeout` yields an empty snapshot.
    #[must_use]
    pub fn wait_until_any<S: AsRef<str>>(mut self, selectors: &[S], timeout: Duration) -> Self {
        let selector = selectors
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        self.ready = (!selector.is_empty()).then_some(ReadyWait { selector, timeout });
        self
    }

    /// URL of the last page loaded, if any.
    #[must_use]
    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.url.as_str())
    }

    fn snapshot(&self) -> Result<&Snapshot, RenderError> {
        self.current.as_ref().ok_or(RenderError::NoPage)
    }
}

#[async_trait]
impl PageRenderer for BrowserlessRenderer {
    type Element = HtmlElement;

    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), RenderError> {
        let mut request = ContentRequest::new(url, timeout);
        if let Some(ready) = &self.ready {
            request = request.wait_for(&ready.selector, ready.timeout);
        }

        let html = match self.client.content(&request).await {
            Ok(html) => html,
            Err(BrowserlessError::Api { status: 408, .. }) if self.ready.is_some() => {
                tracing::debug!(url, "readiness selectors did not appear in time");
                String::new()
            }
            Err(e) => return Err(e.into_render_error("navigate", millis(timeout))),
        };

        tracing::debug!(url, bytes = html.len(), "page rendered");
        self.current = Some(Snapshot {
            url: url.to_owned(),
            html,
        });
        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<bool, RenderError> {
        contains(&self.snapshot()?.html, selector)
    }

    async fn query_all(&mut self, selector: &str) -> Result<Vec<Self::Element>, RenderError> {
        select_all(&self.snapshot()?.html, selector)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
