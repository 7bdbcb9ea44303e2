//! Browser abstraction for driving the search page.
//!
//! Defines the narrow async surface the scrape pipeline consumes,
//! implemented over headless Chromium in [`chromium`]. Every operation
//! that can stall takes an explicit deadline and reports exceeding it
//! distinctly from other browser failures, which is what lets the driver
//! map each stage to its own diagnostic.

pub mod chromium;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// A browser operation failure.
#[derive(Debug, Error)]
pub enum PageError {
    /// The operation did not complete within its deadline.
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    /// Any other browser-side failure.
    #[error(transparent)]
    Browser(#[from] anyhow::Error),
}

/// One live page of an exclusively-owned browser session.
#[async_trait]
pub trait SearchPage: Send {
    /// Navigate to `url`, resolving once the DOM is parsed (not network
    /// idle — slow third-party assets must not stall the scrape).
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), PageError>;

    /// Locate `selector` and click it, polling until the deadline.
    async fn click(&self, selector: &str, timeout: Duration) -> Result<(), PageError>;

    /// Wait until `selector` matches at least one element.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), PageError>;

    /// Serialize the full rendered page markup.
    async fn content(&self) -> Result<String, PageError>;

    /// Fixed-duration delay, letting client-side scripts finish.
    async fn settle(&self, delay: Duration) -> Result<(), PageError>;

    /// Close the page and release the session.
    async fn close(self: Box<Self>) -> Result<(), PageError>;
}
