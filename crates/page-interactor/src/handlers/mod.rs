//! Action handlers: command execution composed with precondition waits and
//! domain-specific retry policy.

mod click;
mod dom;
mod input;
mod scroll;

pub use click::{ClickHandler, NavigationWait};
pub use dom::DomHandler;
pub use input::InputHandler;
pub use scroll::ScrollHandler;
