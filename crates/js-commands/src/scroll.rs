//! Scroll command generators: viewport movement and scroll metrics.
//!
//! Metrics read from `document.body`, matching what infinite-scroll feeds
//! actually mutate while content streams in.

use crate::command::{Command, ReturnShape};

pub fn scroll_to(x: i64, y: i64) -> Command {
    Command::new(format!("window.scrollTo({x}, {y});"), ReturnShape::Unit)
}

pub fn scroll_by(dx: i64, dy: i64) -> Command {
    Command::new(format!("window.scrollBy({dx}, {dy});"), ReturnShape::Unit)
}

pub fn scroll_to_top() -> Command {
    Command::new("window.scrollTo(0, 0);", ReturnShape::Unit)
}

/// Jump straight to the current bottom of the document.
pub fn scroll_to_bottom() -> Command {
    Command::new(
        "window.scrollTo(0, document.body.scrollHeight);",
        ReturnShape::Unit,
    )
}

pub fn scroll_height() -> Command {
    Command::new("document.body.scrollHeight", ReturnShape::Number)
}

pub fn scroll_width() -> Command {
    Command::new("document.body.scrollWidth", ReturnShape::Number)
}

pub fn scroll_top() -> Command {
    Command::new("document.body.scrollTop", ReturnShape::Number)
}

pub fn scroll_left() -> Command {
    Command::new("document.body.scrollLeft", ReturnShape::Number)
}
