//! Port onto the browser process, as exposed by the automation driver.

use async_trait::async_trait;

use crate::errors::SessionError;

/// Opaque token identifying one open page/tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageToken {
    target_id: String,
}

impl PageToken {
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }
}

/// Browser process surface the session guard needs. Launching and closing the
/// process itself stays with the driver.
#[async_trait]
pub trait BrowserPort: Send + Sync {
    /// Whether the browser process is up.
    fn is_running(&self) -> bool;

    /// Tokens for every currently open page.
    async fn pages(&self) -> Result<Vec<PageToken>, SessionError>;

    /// Close the browser process.
    async fn close(&self) -> Result<(), SessionError>;
}
