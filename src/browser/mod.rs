//! Browser session: page fetch and wait controller
//!
//! All dynamic pages are reached through one shared, stateful browser session
//! driven over the WebDriver protocol. The [`BrowserSession`] trait is the seam
//! the pipeline is written against, so tests can substitute a scripted session
//! and never need a live driver.

mod session;

pub use session::WebDriverSession;

use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// Relative path the driver binary is expected at (advisory check only)
pub const DRIVER_BINARY_PATH: &str = "./chromedriver";

/// One shared browser session for the lifetime of a run
///
/// Every extractor runs only after `await_marker` has confirmed the subtree it
/// depends on is fully rendered. The session must be released via `close` on
/// every exit path.
#[async_trait]
pub trait BrowserSession {
    /// Navigates the session to the given URL
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Blocks until an element matching `selector` is present in the DOM
    ///
    /// Fails with `ScrapeError::NavigationTimeout` when the marker does not
    /// appear within `timeout_secs`.
    async fn await_marker(&mut self, selector: &str, timeout_secs: u64) -> Result<()>;

    /// Clicks the first element matching `selector`
    async fn click(&mut self, selector: &str) -> Result<()>;

    /// Clicks the first element matching `selector` whose visible text equals
    /// `text` (needed for menu options that are only addressable by label)
    async fn click_matching_text(&mut self, selector: &str, text: &str) -> Result<()>;

    /// Returns the current fully rendered document source
    async fn current_html(&mut self) -> Result<String>;

    /// Releases the session; further calls fail with `SessionClosed`
    async fn close(&mut self) -> Result<()>;
}

/// Returns true if the driver binary exists at its conventional relative path
///
/// Purely advisory: the WebDriver endpoint may well be served by a driver
/// living elsewhere, so absence only warrants a warning.
pub fn driver_binary_exists() -> bool {
    Path::new(DRIVER_BINARY_PATH).exists()
}
