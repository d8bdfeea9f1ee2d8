//! High-level interaction with a single headless browser page.
//!
//! This crate turns high-level DOM operations into injectable scripts, routes
//! them through one execution point, and layers interaction policy on top:
//! - `CommandHandler`: one script evaluation per call, tagged result decoding
//! - Click/Input/Scroll action handlers with selector-wait preconditions and
//!   the type-and-verify retry policy for input mutation
//! - `ScrollLoader`: the convergence-detecting incremental loader for
//!   infinite-scroll feeds
//! - `PageInteractor`: the façade other subsystems depend on
//!
//! The browser itself is an external collaborator reached through the
//! `ExecutionSink` and `PageDriver` ports.

pub mod command;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod interactor;
pub mod loader;
pub mod ports;

pub use command::{CommandHandler, DecodedValue};
pub use config::InteractConfig;
pub use errors::InteractError;
pub use handlers::{ClickHandler, DomHandler, InputHandler, NavigationWait, ScrollHandler};
pub use interactor::PageInteractor;
pub use loader::{CountTarget, LoadOptions, LoadOutcome, ScrollLoader, StopReason, TickHook};
pub use ports::{ElementHandle, ExecutionSink, PageDriver};
