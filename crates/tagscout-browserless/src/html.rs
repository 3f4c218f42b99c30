//! Elements backed by captured HTML.
//!
//! `scraper::Html` is not `Send`, so an element keeps its own outer HTML and
//! re-parses it for every lookup. Listing tiles are small, which keeps that
//! cheap.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tagscout_discovery::{PageElement, RenderError};

/// A detached copy of one element from a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    html: String,
}

impl HtmlElement {
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    #[must_use]
    pub fn outer_html(&self) -> &str {
        &self.html
    }

    fn first_match(&self, selector: &Selector) -> Option<Self> {
        let fragment = Html::parse_fragment(&self.html);
        let root = fragment_root(&fragment)?;
        root.select(selector)
            .next()
            .map(|found| Self::new(found.html()))
    }

    fn text(&self) -> Option<String> {
        let fragment = Html::parse_fragment(&self.html);
        fragment_root(&fragment).map(|root| root.text().collect())
    }
}

/// The element the fragment was parsed from, skipping the synthetic `<html>`
/// wrapper `parse_fragment` adds.
fn fragment_root(fragment: &Html) -> Option<ElementRef<'_>> {
    fragment
        .root_element()
        .children()
        .find_map(ElementRef::wrap)
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector, RenderError> {
    Selector::parse(selector).map_err(|_| RenderError::InvalidSelector(selector.to_owned()))
}

/// Every element of `document` matching `selector`, in document order.
pub(crate) fn select_all(document: &str, selector: &str) -> Result<Vec<HtmlElement>, RenderError> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(document);
    Ok(document
        .select(&selector)
        .map(|found| HtmlElement::new(found.html()))
        .collect())
}

/// `true` when `document` contains at least one match for `selector`.
pub(crate) fn contains(document: &str, selector: &str) -> Result<bool, RenderError> {
    let selector = parse_selector(selector)?;
    Ok(Html::parse_document(document)
        .select(&selector)
        .next()
        .is_some())
}

#[async_trait]
impl PageElement for HtmlElement {
    async fn query_selector(&self, selector: &str) -> Result<Option<Self>, RenderError> {
        let selector = parse_selector(selector)?;
        Ok(self.first_match(&selector))
    }

    async fn text_content(&self) -> Result<Option<String>, RenderError> {
        Ok(self.text())
    }
}
