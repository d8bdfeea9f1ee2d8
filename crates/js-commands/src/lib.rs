//! Pure JavaScript command generation.
//!
//! Every function in this crate maps a DOM operation to an injectable script
//! string paired with the shape its evaluation is expected to produce. The
//! generators perform no I/O and have no failure path: a malformed selector is
//! passed through verbatim, but every interpolated argument is JSON-encoded so
//! quote characters cannot break out of the generated script.

mod command;
mod dom;
mod scroll;

pub use command::{Command, ReturnShape};
pub use dom::*;
pub use scroll::*;

use serde_json::Value;

/// Encode an argument as a JavaScript string literal (quotes included).
pub(crate) fn js_str(s: &str) -> String {
    Value::String(s.to_owned()).to_string()
}
