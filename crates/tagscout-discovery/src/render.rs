//! The rendering capability the crawler drives.
//!
//! A backend renders the platform's JavaScript listing page and lets the
//! crawler wait for markers, query post elements, and read text inside them.
//! Every operation may time out or come back empty; callers decide what is
//! fatal.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::RenderError;

/// A node inside a rendered page.
#[async_trait]
pub trait PageElement: Send + Sync + Sized {
    /// First descendant matching `selector`, or `None`.
    async fn query_selector(&self, selector: &str) -> Result<Option<Self>, RenderError>;

    /// Text content of this node, or `None` when it has none.
    async fn text_content(&self) -> Result<Option<String>, RenderError>;
}

/// One rendering session. The crawler owns it exclusively, so methods take
/// `&mut self` and are never called concurrently.
#[async_trait]
pub trait PageRenderer: Send {
    type Element: PageElement;

    /// Loads `url`, failing with [`RenderError::Timeout`] if it does not load
    /// within `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), RenderError>;

    /// Waits for `selector` to appear. `Ok(false)` means it did not appear
    /// within `timeout`.
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<bool, RenderError>;

    /// Every element on the current page matching `selector`, in document
    /// order.
    async fn query_all(&mut self, selector: &str) -> Result<Vec<Self::Element>, RenderError>;
}
