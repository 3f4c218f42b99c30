//! Rendering backend for the discovery pipeline, backed by a Browserless
//! instance.
//!
//! [`BrowserlessClient`] talks to the Browserless HTTP API: `/content`
//! returns the fully rendered HTML of a page. [`BrowserlessRenderer`] adapts
//! that snapshot model to the [`PageRenderer`](tagscout_discovery::PageRenderer)
//! trait, answering selector queries from the captured HTML with `scraper`.

pub mod client;
pub mod error;
pub mod html;
pub mod renderer;
pub(crate) mod retry;

pub use client::{BrowserlessClient, ContentRequest};
pub use error::BrowserlessError;
pub use html::HtmlElement;
pub use renderer::BrowserlessRenderer;
