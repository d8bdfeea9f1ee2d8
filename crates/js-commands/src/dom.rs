//! DOM command generators: element lookup, attributes, class lists, element
//! actions, text extraction and pseudo-element presence checks.
//!
//! Lookup generators use optional chaining so that a missing element yields a
//! `null` evaluation result instead of a page-side `TypeError`; the execution
//! layer decodes that `null` as an absent value.

use crate::command::{Command, ReturnShape};
use crate::js_str;

/// Script fragment selecting the first element matching `selector`.
pub fn element(selector: &str) -> String {
    format!("document.querySelector({})", js_str(selector))
}

/// Script fragment selecting all elements matching `selector`.
pub fn elements(selector: &str) -> String {
    format!("document.querySelectorAll({})", js_str(selector))
}

/// Number of elements currently matching `selector`.
pub fn count(selector: &str) -> Command {
    Command::new(format!("{}.length", elements(selector)), ReturnShape::Number)
}

// attribute access

pub fn get_attr(selector: &str, attr: &str) -> Command {
    Command::new(
        format!("{}?.getAttribute({}) ?? null", element(selector), js_str(attr)),
        ReturnShape::Text,
    )
}

pub fn set_attr(selector: &str, attr: &str, value: &str) -> Command {
    Command::new(
        format!(
            "{}?.setAttribute({}, {})",
            element(selector),
            js_str(attr),
            js_str(value)
        ),
        ReturnShape::Unit,
    )
}

// class list manipulation

/// The element's classList; serializes as an indexed object.
pub fn class_list(selector: &str) -> Command {
    Command::new(
        format!("{}?.classList", element(selector)),
        ReturnShape::TokenList,
    )
}

pub fn add_class(selector: &str, class_name: &str) -> Command {
    class_list_op(selector, "add", class_name)
}

pub fn remove_class(selector: &str, class_name: &str) -> Command {
    class_list_op(selector, "remove", class_name)
}

pub fn toggle_class(selector: &str, class_name: &str) -> Command {
    class_list_op(selector, "toggle", class_name)
}

fn class_list_op(selector: &str, op: &str, class_name: &str) -> Command {
    Command::new(
        format!("{}?.classList.{}({})", element(selector), op, js_str(class_name)),
        ReturnShape::Unit,
    )
}

// element actions

pub fn click(selector: &str) -> Command {
    element_action(selector, "click")
}

pub fn submit(selector: &str) -> Command {
    element_action(selector, "submit")
}

pub fn focus(selector: &str) -> Command {
    element_action(selector, "focus")
}

pub fn blur(selector: &str) -> Command {
    element_action(selector, "blur")
}

pub fn select(selector: &str) -> Command {
    element_action(selector, "select")
}

fn element_action(selector: &str, method: &str) -> Command {
    Command::new(
        format!("{}?.{}()", element(selector), method),
        ReturnShape::Unit,
    )
}

// text extraction

/// Text content of the first matching element, or absent when none matches.
pub fn text_content(selector: &str) -> Command {
    Command::new(
        format!("{}?.textContent ?? null", element(selector)),
        ReturnShape::Text,
    )
}

/// Text content of every matching element, in document order.
pub fn text_contents(selector: &str) -> Command {
    Command::new(
        format!(
            "Array.from({}).map((el) => el.textContent ?? \"\")",
            elements(selector)
        ),
        ReturnShape::TextList,
    )
}

// pseudo-element presence

/// Whether the first matching element renders a `::before` pseudo element.
pub fn has_before_pseudo(selector: &str) -> Command {
    pseudo_presence(selector, "::before")
}

/// Whether the first matching element renders an `::after` pseudo element.
pub fn has_after_pseudo(selector: &str) -> Command {
    pseudo_presence(selector, "::after")
}

fn pseudo_presence(selector: &str, pseudo: &str) -> Command {
    let script = format!(
        "(function(selector) {{\n\
         \x20   const el = document.querySelector(selector);\n\
         \x20   if (!el) {{ return false; }}\n\
         \x20   const style = window.getComputedStyle(el, '{pseudo}');\n\
         \x20   return style.content !== 'none';\n\
         }})({selector})",
        pseudo = pseudo,
        selector = js_str(selector),
    );
    Command::new(script, ReturnShape::Bool)
}
