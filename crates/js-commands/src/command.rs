//! The `Command` data model: an immutable script string plus its declared
//! return shape. Commands are generated fresh per invocation and never cached.

/// Shape of the value a command's evaluation is expected to produce.
///
/// The execution layer uses this tag to turn the raw evaluation result into a
/// typed value instead of pattern-matching on untyped JSON at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    /// Side-effecting command; the result is discarded.
    Unit,
    /// A single string, or absent when the target element does not exist.
    Text,
    /// A numeric value (scroll metrics).
    Number,
    /// A boolean (pseudo-element presence checks).
    Bool,
    /// An array of strings.
    TextList,
    /// A DOMTokenList, which serializes as an indexed object and is
    /// normalized to an ordered list of strings by the execution layer.
    TokenList,
}

/// An injectable script string with its expected decoded return shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    script: String,
    shape: ReturnShape,
}

impl Command {
    pub fn new(script: impl Into<String>, shape: ReturnShape) -> Self {
        Self {
            script: script.into(),
            shape,
        }
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn shape(&self) -> ReturnShape {
        self.shape
    }

    pub fn into_script(self) -> String {
        self.script
    }
}
