//! Singleton-page browser session guard.
//!
//! The interaction core assumes exactly one page per browser instance; all
//! operations against the page are serialized by that constraint. This crate
//! enforces the invariant at the seam to the browser driver: a session hands
//! out the page only after verifying the browser is running and exactly one
//! page is open, failing fast otherwise.

mod errors;
mod ports;
mod session;

pub use errors::SessionError;
pub use ports::{BrowserPort, PageToken};
pub use session::SinglePageSession;
