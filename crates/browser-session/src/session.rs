//! The singleton-page session guard.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::SessionError;
use crate::ports::{BrowserPort, PageToken};

/// Guards access to the one page a browser instance is allowed to have.
///
/// Using more than one page concurrently is a programming error, not a
/// runtime condition to tolerate, so every access re-verifies the page count
/// and fails fast on violation.
pub struct SinglePageSession {
    browser: Arc<dyn BrowserPort>,
}

impl SinglePageSession {
    pub fn new(browser: Arc<dyn BrowserPort>) -> Self {
        Self { browser }
    }

    pub fn is_running(&self) -> bool {
        self.browser.is_running()
    }

    /// The active page. Fails when the browser is down, no page is open, or
    /// more than one page is open.
    pub async fn page(&self) -> Result<PageToken, SessionError> {
        if !self.browser.is_running() {
            return Err(SessionError::NotRunning);
        }

        let mut pages = self.browser.pages().await?;
        match pages.len() {
            0 => Err(SessionError::NoActivePage),
            1 => {
                let page = pages.remove(0);
                debug!(target_id = page.target_id(), "resolved the singleton page");
                Ok(page)
            }
            n => {
                warn!(pages = n, "singleton page invariant violated");
                Err(SessionError::SingletonViolation(n))
            }
        }
    }

    /// Verify the singleton invariant without handing out the page.
    pub async fn verify_page_count(&self) -> Result<(), SessionError> {
        self.page().await.map(|_| ())
    }

    /// Close the browser after a final invariant check.
    pub async fn close(&self) -> Result<(), SessionError> {
        self.verify_page_count().await?;
        self.browser.close().await
    }
}
