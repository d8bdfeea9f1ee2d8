//! Session-level error types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Operation attempted while the browser process is not active.
    #[error("browser is not running")]
    NotRunning,

    /// The browser is running but no page is open.
    #[error("no active page found")]
    NoActivePage,

    /// More than one page detected where exactly one is required.
    #[error("expected exactly one open page, found {0}")]
    SingletonViolation(usize),

    /// The underlying driver failed while listing or closing pages.
    #[error("browser driver error: {0}")]
    Driver(String),
}
