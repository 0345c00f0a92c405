//! The browser capability set the scraper consumes.
//!
//! Everything above this module talks to the page only through
//! [`PageDriver`], so the collection and extraction logic can run against
//! the WebDriver session in production and an in-memory page in tests.
//!
//! Lookups never fail because nothing matched: an absent element is an
//! empty `Vec`. Errors are reserved for the browser itself misbehaving
//! (lost session, stale element, script failure, timeout).

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("could not start a browser session: {0}")]
    Session(String),

    #[error("browser command failed: {0}")]
    Command(String),

    #[error("timed out after {elapsed_ms}ms waiting for {what}")]
    Timeout { what: String, elapsed_ms: u64 },
}

/// Browser operations needed to drive a map search.
///
/// XPath is the structural pattern language throughout. Patterns passed to
/// [`PageDriver::find_all_within`] are evaluated relative to the scope
/// element and should start with `.`.
#[allow(async_fn_in_trait)]
pub trait PageDriver {
    type Element: Clone;

    /// Load `url`, failing with [`DriverError::Timeout`] if it takes longer than `timeout`.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError>;

    /// All elements matching `xpath`, in document order.
    async fn find_all(&self, xpath: &str) -> Result<Vec<Self::Element>, DriverError>;

    /// All elements matching `xpath` evaluated against `scope`, in document order.
    async fn find_all_within(
        &self,
        scope: &Self::Element,
        xpath: &str,
    ) -> Result<Vec<Self::Element>, DriverError>;

    /// Rendered text content of `element`.
    async fn text(&self, element: &Self::Element) -> Result<String, DriverError>;

    /// Value of attribute `name`, or `None` when the element does not carry it.
    async fn attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    async fn click(&self, element: &Self::Element) -> Result<(), DriverError>;

    /// Move the pointer over the element.
    async fn hover(&self, element: &Self::Element) -> Result<(), DriverError>;

    /// Replace the contents of an input with `text`.
    async fn fill(&self, element: &Self::Element, text: &str) -> Result<(), DriverError>;

    async fn press_enter(&self, element: &Self::Element) -> Result<(), DriverError>;

    /// Scroll the first element matching `panel_xpath` by `delta_y` pixels.
    /// Falls back to scrolling the window when the panel is not on the page.
    async fn scroll(&self, panel_xpath: &str, delta_y: i64) -> Result<(), DriverError>;

    async fn current_url(&self) -> Result<String, DriverError>;

    /// Suspend for `duration`. Every wait in the scraper goes through here.
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// End the browser session.
    async fn close(self) -> Result<(), DriverError>
    where
        Self: Sized;
}
