//! In-memory rendering backend for pipeline tests.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::RenderError;
use crate::render::{PageElement, PageRenderer};

/// Element tree keyed by selector: `query_selector(s)` returns `children[s]`.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeElement {
    text: Option<String>,
    children: HashMap<String, FakeElement>,
    detached: bool,
    broken_selectors: HashSet<String>,
}

impl FakeElement {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_owned()),
            ..Self::default()
        }
    }

    pub(crate) fn with(mut self, selector: &str, child: FakeElement) -> Self {
        self.children.insert(selector.to_owned(), child);
        self
    }

    pub(crate) fn with_text(self, selector: &str, text: &str) -> Self {
        self.with(selector, FakeElement::text(text))
    }

    /// Every lookup on this element fails as if it was removed from the DOM.
    pub(crate) fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    /// Lookups of `selector` fail with a non-fatal backend error.
    pub(crate) fn broken(mut self, selector: &str) -> Self {
        self.broken_selectors.insert(selector.to_owned());
        self
    }

    /// A TikTok-shaped post tile using the primary selector of every field.
    pub(crate) fn post(handle: &str, description: &str, likes: &str) -> Self {
        FakeElement::new()
            .with_text(r#"a[data-e2e="video-author-uniqueid"]"#, handle)
            .with_text(r#"div[data-e2e="video-desc"] span"#, description)
            .with_text(r#"strong[data-e2e="video-like-count"]"#, likes)
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn query_selector(&self, selector: &str) -> Result<Option<Self>, RenderError> {
        if self.detached {
            return Err(RenderError::Detached);
        }
        if self.broken_selectors.contains(selector) {
            return Err(RenderError::Backend(format!("cannot evaluate {selector}")));
        }
        Ok(self.children.get(selector).cloned())
    }

    async fn text_content(&self) -> Result<Option<String>, RenderError> {
        if self.detached {
            return Err(RenderError::Detached);
        }
        Ok(self.text.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakePage {
    markers: HashSet<String>,
    elements: Vec<FakeElement>,
}

impl FakePage {
    /// A listing page showing `marker` and holding `elements`.
    pub(crate) fn listing(marker: &str, elements: Vec<FakeElement>) -> Self {
        Self {
            markers: HashSet::from([marker.to_owned()]),
            elements,
        }
    }

    /// A page that loads but never shows any content marker.
    pub(crate) fn blank() -> Self {
        Self::default()
    }
}

pub(crate) struct FakeRenderer {
    pages: HashMap<String, FakePage>,
    failures: HashMap<String, fn() -> RenderError>,
    current: Option<String>,
    pub(crate) visits: Vec<(String, Instant)>,
}

impl FakeRenderer {
    pub(crate) fn new() -> Self {
        Self {
            pages: HashMap::new(),
            failures: HashMap::new(),
            current: None,
            visits: Vec::new(),
        }
    }

    pub(crate) fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_owned(), page);
        self
    }

    /// Navigating to `url` fails with the error built by `error`.
    pub(crate) fn failing(mut self, url: &str, error: fn() -> RenderError) -> Self {
        self.failures.insert(url.to_owned(), error);
        self
    }

    fn page(&self) -> Result<&FakePage, RenderError> {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .ok_or(RenderError::NoPage)
    }
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    type Element = FakeElement;

    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), RenderError> {
        self.visits.push((url.to_owned(), Instant::now()));
        if let Some(error) = self.failures.get(url) {
            return Err(error());
        }
        if !self.pages.contains_key(url) {
            return Err(RenderError::Timeout {
                operation: "navigate",
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            });
        }
        self.current = Some(url.to_owned());
        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<bool, RenderError> {
        if self.page()?.markers.contains(selector) {
            return Ok(true);
        }
        tokio::time::sleep(timeout).await;
        Ok(false)
    }

    async fn query_all(&mut self, _selector: &str) -> Result<Vec<Self::Element>, RenderError> {
        Ok(self.page()?.elements.clone())
    }
}
